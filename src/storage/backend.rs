//! Storage backend abstraction.
//!
//! This module defines the [`Store`] trait that abstracts over embedded database
//! backends. The trait is deliberately minimal: one method per façade use case,
//! not a generic ORM. Each method is one transaction against the underlying
//! store, so the atomicity guarantees callers rely on live at this boundary.

use crate::domain::error::Result;
use crate::domain::ProjectSubmission;
use crate::storage::models::{BlobRecord, ProjectRecord};

/// Abstraction over embedded storage backends.
///
/// Implementations persist project records and their uploaded file blobs in
/// named collections with store-assigned ids. The store enforces no referential
/// integrity between blobs and projects; [`Store::delete_project`] is the one
/// path that cascades, and it must never leave orphaned blobs behind.
///
/// # Implementations
///
/// - [`RedbStorage`](crate::storage::RedbStorage): redb-backed store (default)
pub trait Store: Send {
    /// Replaces the entire projects collection with the given submissions.
    ///
    /// Clears only the projects collection, then inserts one record per
    /// submission with freshly assigned sequential ids `1..=N` matching input
    /// order, a zero download count and the current timestamp. Submissions
    /// carrying raw content also produce a blob record owned by the new
    /// project, with blob ids continuing past the highest already assigned.
    ///
    /// Blobs from earlier saves are left in place; only the cascade delete
    /// path and [`Store::clear_all`] remove them. A re-save can therefore
    /// leave blobs whose `project_id` refers to a replaced project.
    ///
    /// Must be atomic per call: a failure mid-way must not leave the store
    /// partially cleared as observed by later transactions.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::Write`](crate::domain::VaultError::Write) if the
    /// transaction fails.
    fn save_all(&mut self, submissions: &[ProjectSubmission]) -> Result<Vec<ProjectRecord>>;

    /// Retrieves all project records.
    ///
    /// Order is unspecified; callers decide presentation ordering.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::Read`](crate::domain::VaultError::Read) if the
    /// read transaction fails or a stored record is corrupt.
    fn load_all(&self) -> Result<Vec<ProjectRecord>>;

    /// Deletes one project and every blob whose `project_id` matches, in a
    /// single transaction.
    ///
    /// Deleting an id that does not exist is a no-op, not an error.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::Write`](crate::domain::VaultError::Write) if the
    /// transaction fails.
    fn delete_project(&mut self, id: u64) -> Result<()>;

    /// Empties the projects and blobs collections unconditionally.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::Write`](crate::domain::VaultError::Write) if the
    /// transaction fails.
    fn clear_all(&mut self) -> Result<()>;

    /// Retrieves the metadata of every stored blob, without raw bytes.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::Read`](crate::domain::VaultError::Read) if the
    /// read transaction fails.
    fn blob_metadata(&self) -> Result<Vec<BlobRecord>>;

    /// Retrieves one blob's metadata together with its raw bytes.
    ///
    /// Returns `Ok(None)` if no blob with that id exists.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::Read`](crate::domain::VaultError::Read) if the
    /// read fails or the content row for an existing metadata record is gone.
    fn load_blob(&self, id: u64) -> Result<Option<(BlobRecord, Vec<u8>)>>;

    /// Replaces the projects collection with pre-built records, preserving
    /// their ids.
    ///
    /// This is the snapshot-import path: blobs are left untouched, so
    /// imported projects are metadata-only.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::Write`](crate::domain::VaultError::Write) if the
    /// transaction fails.
    fn replace_projects(&mut self, records: &[ProjectRecord]) -> Result<()>;
}
