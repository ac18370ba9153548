//! Infrastructure utilities for filesystem integration.
//!
//! # Architecture
//!
//! - `paths`: Storage location resolution and tilde expansion

pub mod paths;

pub use paths::{expand_tilde, get_data_dir};
