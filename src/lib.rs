//! FolioVault: embedded persistence core for a portfolio project showcase.
//!
//! FolioVault stores a portfolio's project cards and their attached file
//! contents in an embedded transactional key-value database, and provides:
//! - Whole-collection save/load of project records with sequential ids
//! - Separate blob storage for file contents, linked to projects by id
//! - Cascading deletion of a project and its blobs
//! - Versioned JSON snapshot export/import (metadata only, never blob bytes)
//! - A background worker thread that serializes all storage access

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! The crate follows a layered architecture pattern:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  CLI Shim (main.rs)                                 │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Worker Layer (worker/)                             │  ← Single actor
//! │  - Request/response protocol                        │
//! │  - Dedicated storage thread                         │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Vault Façade (vault/)                              │  ← Business logic
//! │  - Save/load/delete/clear orchestration             │
//! │  - Snapshot export/import                           │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Storage Layer (storage/)                           │
//! │  - Store trait (backend API)                        │
//! │  - redb tables, records, transactions               │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Infrastructure & Domain Layers                     │
//! │  - Platform paths (infrastructure/)                 │
//! │  - Error types (domain/error)                       │
//! │  - Project model (domain/project)                   │
//! │  - Contact boundary (contact)                       │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │  ← Optional
//! │  - tracing subscriber                               │
//! │  - File-based log output                            │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`domain`]: Core domain types (Project, ProjectSubmission, errors)
//! - [`storage`]: redb persistence layer behind the [`storage::Store`] trait
//! - [`vault`]: Persistence façade and snapshot documents
//! - [`worker`]: Background worker thread with request/response channels
//! - [`contact`]: Boundary contract for the email-sending collaborator
//! - [`infrastructure`]: Platform-specific utilities (paths)
//! - `observability`: tracing subscriber setup (internal)
//!
//! # Configuration
//!
//! Configuration is read from `~/.config/foliovault/config.toml`:
//!
//! ```toml
//! data_dir = "~/.local/share/foliovault"
//! trace_level = "info"
//! contact_recipient = "owner@example.com"
//! ```
//!
//! All keys are optional; a missing file yields the defaults.
//!
//! # Initialization Flow
//!
//! 1. **Startup** (`main.rs`):
//!    - Load configuration from the TOML file (or defaults)
//!    - Initialize tracing (optional)
//!    - Spawn the vault worker, which opens the database
//!
//! 2. **Request Processing**:
//!    - The CLI translates each subcommand into one [`worker::VaultRequest`]
//!    - The worker answers with exactly one [`worker::VaultResponse`], in order
//!
//! 3. **Storage**:
//!    - Each façade operation runs as one redb transaction
//!    - Saves replace the whole collection and reassign ids 1..N
//!
//! # Examples
//!
//! ## Basic Usage (Library)
//!
//! ```no_run
//! use foliovault::domain::ProjectSubmission;
//! use foliovault::vault::Vault;
//!
//! let mut vault = Vault::open("/tmp/foliovault/vault.redb")?;
//!
//! let saved = vault.save_all(&[
//!     ProjectSubmission::new("Website Redesign", "Web", 2048),
//! ])?;
//! assert_eq!(saved[0].id, 1);
//!
//! let projects = vault.load_all()?;
//! # Ok::<(), foliovault::VaultError>(())
//! ```
//!
//! ## Worker Usage
//!
//! ```no_run
//! use foliovault::worker::{VaultRequest, VaultWorker};
//!
//! let handle = VaultWorker::spawn("/tmp/foliovault/vault.redb")?;
//! let response = handle.request(VaultRequest::LoadProjects)?;
//! handle.shutdown()?;
//! # Ok::<(), foliovault::VaultError>(())
//! ```
//!
//! # Key Design Decisions
//!
//! ## Replace-on-Save
//!
//! Saving is whole-collection replacement of projects, not incremental upsert:
//! - The store clears the projects collection, then reinserts in order
//! - Ids are reassigned sequentially from 1, so they are stable between
//!   saves but not across them
//! - Blobs from earlier saves are untouched; only cascade delete and
//!   clear-all remove them, and blob ids keep counting up across saves
//! - A single transaction keeps partial saves from ever being visible
//!
//! ## Metadata-Only Snapshots
//!
//! Snapshot export carries project records and blob metadata but never blob
//! bytes, keeping backups small and diffable. Import restores projects only
//! and preserves the ids recorded in the document.
//!
//! ## Single-Actor Storage
//!
//! All storage access funnels through one worker thread:
//! - Callers never touch the database concurrently
//! - Completion is a response message, one per request, in order
//! - An operation, once submitted, runs to completion or failure

pub mod contact;
pub mod domain;
pub mod infrastructure;
pub mod storage;
pub mod vault;
pub mod worker;

pub mod observability;

pub use domain::{Project, ProjectSubmission, Result, VaultError};
pub use vault::Vault;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Application configuration loaded from a TOML file.
///
/// All keys are optional. A missing configuration file is not an error; it
/// simply yields [`Config::default`].
///
/// # Example
///
/// ```toml
/// # ~/.config/foliovault/config.toml
/// data_dir = "~/.local/share/foliovault"
/// trace_level = "debug"
/// contact_recipient = "owner@example.com"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Directory holding the database and log files.
    ///
    /// Supports a leading `~`. Default: `~/.local/share/foliovault`
    pub data_dir: Option<String>,

    /// Tracing level for log output.
    ///
    /// Options: `trace`, `debug`, `info`, `warn`, `error`. Default: `"info"`.
    /// The `RUST_LOG` environment variable takes precedence when set.
    pub trace_level: Option<String>,

    /// Recipient address for contact-form messages.
    pub contact_recipient: Option<String>,
}

impl Config {
    /// Loads configuration from the default location.
    ///
    /// Reads `~/.config/foliovault/config.toml`; a missing file yields the
    /// defaults.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::Config`] if the file exists but cannot be read
    /// or parsed.
    pub fn load() -> Result<Self> {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        let path = PathBuf::from(home).join(".config/foliovault/config.toml");
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::from_file(&path)
    }

    /// Loads configuration from a specific TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::Config`] if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            VaultError::Config(format!("failed to read {}: {e}", path.display()))
        })?;
        toml::from_str(&contents).map_err(|e| {
            VaultError::Config(format!("failed to parse {}: {e}", path.display()))
        })
    }

    /// Resolves the data directory, expanding a leading tilde.
    #[must_use]
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir.as_ref().map_or_else(
            infrastructure::get_data_dir,
            |dir| PathBuf::from(infrastructure::expand_tilde(dir)),
        )
    }

    /// Path of the embedded database file inside the data directory.
    #[must_use]
    pub fn db_path(&self) -> PathBuf {
        self.data_dir().join("vault.redb")
    }

    /// Returns the configured contact recipient address.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::Config`] when no `contact_recipient` is set.
    pub fn contact_recipient(&self) -> Result<&str> {
        self.contact_recipient.as_deref().ok_or_else(|| {
            VaultError::Config("no contact_recipient configured".to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_file_parses_all_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "data_dir = \"/tmp/vault-data\"\ntrace_level = \"debug\"\ncontact_recipient = \"owner@example.com\"\n",
        )
        .unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.data_dir.as_deref(), Some("/tmp/vault-data"));
        assert_eq!(config.trace_level.as_deref(), Some("debug"));
        assert_eq!(config.contact_recipient.as_deref(), Some("owner@example.com"));
        assert_eq!(config.db_path(), PathBuf::from("/tmp/vault-data/vault.redb"));
    }

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "trace_level = \"warn\"\n").unwrap();

        let config = Config::from_file(&path).unwrap();
        assert!(config.data_dir.is_none());
        assert!(config.contact_recipient.is_none());
        assert_eq!(config.trace_level.as_deref(), Some("warn"));
    }

    #[test]
    fn contact_recipient_accessor_requires_the_key() {
        let configured = Config {
            contact_recipient: Some("owner@example.com".to_string()),
            ..Config::default()
        };
        assert_eq!(configured.contact_recipient().unwrap(), "owner@example.com");

        let missing = Config::default();
        assert!(matches!(
            missing.contact_recipient().unwrap_err(),
            VaultError::Config(_)
        ));
    }

    #[test]
    fn malformed_file_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "data_dir = [not toml").unwrap();

        assert!(matches!(
            Config::from_file(&path).unwrap_err(),
            VaultError::Config(_)
        ));
    }
}
