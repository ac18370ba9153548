//! Storage layer for persistent project and blob data.
//!
//! This module provides the storage abstraction for persisting submitted
//! projects and their uploaded file content. The shipped backend is a redb
//! embedded database with named tables and per-operation transactions.
//!
//! # Modules
//!
//! - `backend`: Storage trait abstraction for backend implementations
//! - `redb`: redb embedded database implementation
//! - `tables`: Table definitions for the redb schema
//! - `models`: Storage record types separate from domain models

pub mod backend;
pub mod models;
pub mod redb;
pub mod tables;

pub use backend::Store;
pub use models::{BlobRecord, ProjectRecord};
pub use redb::RedbStorage;
