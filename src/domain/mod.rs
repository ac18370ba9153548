//! Domain layer for the Foliovault persistence core.
//!
//! This module contains the core domain types and business rules, independent
//! of the embedded database or any presentation concerns.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`project`]: Project domain model and submission input

pub mod error;
pub mod project;

pub use error::{Result, VaultError};
pub use project::{Project, ProjectSubmission};
