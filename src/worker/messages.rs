//! Request/response protocol between callers and the vault worker.
//!
//! Each request corresponds to one façade operation; the worker answers every
//! request with exactly one response, in submission order. Failures are not
//! propagated as panics or dropped messages — they come back as
//! [`VaultResponse::Error`] carrying the message to surface to the user.

use crate::domain::ProjectSubmission;
use crate::storage::{BlobRecord, ProjectRecord};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Requests sent to the vault worker thread.
///
/// Once submitted, an operation runs to completion or failure; there is no
/// cancellation and no timeout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum VaultRequest {
    /// Replace all stored projects with these submissions.
    SubmitProjects {
        /// The submissions, in presentation order.
        submissions: Vec<ProjectSubmission>,
    },

    /// Load all project records.
    LoadProjects,

    /// Delete one project and cascade to its blobs. Missing ids are a no-op.
    DeleteProject {
        /// Store-assigned project id.
        id: u64,
    },

    /// Empty the projects and blobs collections.
    ClearAll,

    /// Report project and blob counts.
    Stats,

    /// Export a snapshot document to a file.
    ExportSnapshot {
        /// Destination path for the backup file.
        path: PathBuf,
    },

    /// Import a snapshot document from a file.
    ImportSnapshot {
        /// Path of the backup file to restore.
        path: PathBuf,
    },

    /// Fetch one stored blob with its raw bytes.
    FetchBlob {
        /// Store-assigned blob id.
        id: u64,
    },

    /// Stop the worker after answering this request.
    Shutdown,
}

/// Responses sent from the vault worker back to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum VaultResponse {
    /// Projects were saved; carries the freshly assigned records.
    ProjectsSaved {
        /// Number of saved projects.
        count: usize,

        /// The saved records with their new sequential ids.
        projects: Vec<ProjectRecord>,
    },

    /// All project records, order unspecified.
    ProjectsLoaded {
        /// The loaded records.
        projects: Vec<ProjectRecord>,
    },

    /// The delete operation completed (including the no-op case).
    ProjectDeleted {
        /// Id that was requested for deletion.
        id: u64,
    },

    /// Both collections were emptied.
    Cleared,

    /// Current store counts.
    Stats {
        /// Number of project records.
        project_count: usize,

        /// Number of blob records.
        blob_count: usize,
    },

    /// A snapshot was written to disk.
    SnapshotExported {
        /// Path the backup was written to.
        path: PathBuf,

        /// Number of exported projects.
        project_count: usize,
    },

    /// A snapshot was restored.
    SnapshotImported {
        /// Number of restored projects.
        project_count: usize,
    },

    /// A blob was fetched with its content.
    BlobFetched {
        /// The blob's metadata record.
        metadata: BlobRecord,

        /// The raw stored bytes.
        bytes: Vec<u8>,
    },

    /// No blob exists under the requested id.
    BlobMissing {
        /// The id that was requested.
        id: u64,
    },

    /// The worker is stopping.
    ShuttingDown,

    /// An operation failed.
    Error {
        /// Human-readable error message for the user notice.
        message: String,
    },
}
