//! Error types for the Foliovault persistence core.
//!
//! This module defines the centralized error type [`VaultError`] and a type alias
//! [`Result`] for convenient error handling throughout the crate. All errors are
//! implemented using the `thiserror` crate for automatic `Error` trait implementation.

use thiserror::Error;

/// The main error type for Foliovault operations.
///
/// This enum consolidates all error conditions that can occur while operating on
/// the vault, from opening the embedded database to snapshot import. Storage
/// failures are split into the kinds callers surface differently: a host without
/// database capability, a failed read, and a failed write transaction.
///
/// None of these errors are retried internally; callers are responsible for
/// surfacing them to the user.
#[derive(Debug, Error)]
pub enum VaultError {
    /// The embedded database could not be opened or created.
    ///
    /// Raised when the host environment has no usable database capability,
    /// e.g. the data directory cannot be created or the database file is
    /// corrupt beyond recovery.
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// A read transaction against the embedded database failed.
    #[error("Storage read error: {0}")]
    Read(String),

    /// A write transaction against the embedded database failed.
    ///
    /// The underlying store's atomicity determines whether writes issued before
    /// the failure are rolled back; no compensation logic is added on top.
    #[error("Storage write error: {0}")]
    Write(String),

    /// A snapshot document is missing required structure or could not be parsed.
    ///
    /// Raised on import when the document has no `projects` array or a project
    /// entry lacks required fields.
    #[error("Malformed snapshot: {0}")]
    Snapshot(String),

    /// Filesystem or I/O operation failed.
    ///
    /// Wraps errors from standard library I/O operations. Automatically converts
    /// from `std::io::Error` using the `#[from]` attribute.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Communication with the background worker failed.
    ///
    /// Occurs when the request channel to the vault worker is closed or a
    /// response cannot be delivered.
    #[error("Worker communication error: {0}")]
    Worker(String),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A contact message failed validation at the email boundary.
    #[error("Invalid contact message: {0}")]
    Contact(String),
}

/// A specialized `Result` type for Foliovault operations.
///
/// This is a type alias for `std::result::Result<T, VaultError>` that simplifies
/// function signatures throughout the codebase.
pub type Result<T> = std::result::Result<T, VaultError>;
