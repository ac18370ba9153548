//! redb-backed storage implementation.
//!
//! This module persists projects and blobs in a [redb](https://docs.rs/redb)
//! embedded database: a transactional key-value store with named tables. Every
//! [`Store`] method runs as a single write or read transaction, which is what
//! gives `save_all` and the cascade delete their atomicity.
//!
//! # Layout
//!
//! Five tables (see [`crate::storage::tables`]): JSON-encoded project records,
//! JSON-encoded blob metadata, raw blob bytes, a project-to-blob-ids index used
//! for cascade deletes, and a reserved `meta` table. Tables are created up
//! front when the database is opened so read transactions never race table
//! creation.

use crate::domain::error::{Result, VaultError};
use crate::domain::ProjectSubmission;
use crate::storage::backend::Store;
use crate::storage::models::{BlobRecord, ProjectRecord};
use crate::storage::tables::{BLOBS, BLOB_DATA, META, PROJECTS, PROJECT_BLOBS};
use redb::{Database, ReadableTable};
use std::path::{Path, PathBuf};

/// Maps an engine error into a write-side storage error.
fn write_err(e: impl std::fmt::Display) -> VaultError {
    VaultError::Write(e.to_string())
}

/// Maps an engine error into a read-side storage error.
fn read_err(e: impl std::fmt::Display) -> VaultError {
    VaultError::Read(e.to_string())
}

/// redb storage backend.
///
/// Owns the database handle. Opening is idempotent from the caller's point of
/// view: [`RedbStorage::open`] creates the file and all tables on first run and
/// reuses them afterwards.
///
/// # Thread Safety
///
/// The type is `Send`; it is designed to be owned by a single worker thread,
/// with redb serializing transactions internally.
pub struct RedbStorage {
    /// Path the database was opened at, kept for diagnostics.
    path: PathBuf,

    /// Open database handle.
    db: Database,
}

impl RedbStorage {
    /// Opens or creates the database at `path` and ensures all tables exist.
    ///
    /// Parent directories are created automatically.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::Unavailable`] if the directory cannot be created,
    /// the file cannot be opened, or the initial schema transaction fails —
    /// i.e. the host has no usable embedded-database capability.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        tracing::debug!(path = ?path, "opening redb storage");

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| VaultError::Unavailable(format!("cannot create data dir: {e}")))?;
        }

        let db = Database::create(&path)
            .map_err(|e| VaultError::Unavailable(format!("cannot open database: {e}")))?;

        let storage = Self { path, db };
        storage.ensure_tables()?;

        tracing::debug!("redb storage initialized");
        Ok(storage)
    }

    /// Returns the filesystem path of the database file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Opens every table once in a committed write transaction.
    ///
    /// redb creates tables lazily on first open-for-write; doing it here means
    /// later read transactions can open any table unconditionally.
    fn ensure_tables(&self) -> Result<()> {
        let txn = self
            .db
            .begin_write()
            .map_err(|e| VaultError::Unavailable(format!("cannot begin schema txn: {e}")))?;
        {
            txn.open_table(PROJECTS).map_err(write_err)?;
            txn.open_table(BLOBS).map_err(write_err)?;
            txn.open_table(BLOB_DATA).map_err(write_err)?;
            txn.open_table(PROJECT_BLOBS).map_err(write_err)?;
            txn.open_table(META).map_err(write_err)?;
        }
        txn.commit().map_err(write_err)?;
        Ok(())
    }
}

impl Store for RedbStorage {
    fn save_all(&mut self, submissions: &[ProjectSubmission]) -> Result<Vec<ProjectRecord>> {
        let _span =
            tracing::debug_span!("redb_save_all", submission_count = submissions.len()).entered();

        let txn = self.db.begin_write().map_err(write_err)?;
        let mut saved = Vec::with_capacity(submissions.len());
        {
            // Replace-on-save touches only the projects collection. Blobs from
            // earlier saves stay until a cascade delete or clear, even when
            // their projectId now refers to a replaced project.
            txn.delete_table(PROJECTS).map_err(write_err)?;

            let mut projects = txn.open_table(PROJECTS).map_err(write_err)?;
            let mut blobs = txn.open_table(BLOBS).map_err(write_err)?;
            let mut blob_data = txn.open_table(BLOB_DATA).map_err(write_err)?;
            let mut index = txn.open_table(PROJECT_BLOBS).map_err(write_err)?;

            // Blob ids keep counting up from the highest ever assigned.
            let mut next_blob_id = match blobs.last().map_err(write_err)? {
                Some((key, _)) => key.value() + 1,
                None => 1,
            };

            for (position, submission) in submissions.iter().enumerate() {
                let project_id = position as u64 + 1;
                let record = ProjectRecord::new(
                    project_id,
                    &submission.name,
                    &submission.kind,
                    submission.size,
                    &submission.description,
                );

                let encoded = serde_json::to_vec(&record).map_err(write_err)?;
                projects
                    .insert(project_id, encoded.as_slice())
                    .map_err(write_err)?;

                if let Some(content) = &submission.content {
                    let blob = BlobRecord::new(
                        next_blob_id,
                        project_id,
                        &submission.name,
                        &submission.kind,
                        content.len() as u64,
                    );
                    let blob_encoded = serde_json::to_vec(&blob).map_err(write_err)?;
                    blobs
                        .insert(next_blob_id, blob_encoded.as_slice())
                        .map_err(write_err)?;
                    blob_data
                        .insert(next_blob_id, content.as_slice())
                        .map_err(write_err)?;

                    // Append to any index entry a prior save left behind, so
                    // the cascade covers old blobs under a reused project id.
                    let mut blob_ids: Vec<u64> = match index.get(project_id).map_err(write_err)? {
                        Some(guard) => serde_json::from_slice(guard.value())
                            .map_err(|e| VaultError::Write(format!("corrupt blob index: {e}")))?,
                        None => Vec::new(),
                    };
                    blob_ids.push(next_blob_id);
                    let encoded_ids = serde_json::to_vec(&blob_ids).map_err(write_err)?;
                    index
                        .insert(project_id, encoded_ids.as_slice())
                        .map_err(write_err)?;

                    next_blob_id += 1;
                }

                saved.push(record);
            }
        }
        txn.commit().map_err(write_err)?;

        tracing::debug!(saved_count = saved.len(), "projects saved");
        Ok(saved)
    }

    fn load_all(&self) -> Result<Vec<ProjectRecord>> {
        let _span = tracing::debug_span!("redb_load_all").entered();

        let txn = self.db.begin_read().map_err(read_err)?;
        let table = txn.open_table(PROJECTS).map_err(read_err)?;

        let mut records = Vec::new();
        for entry in table.iter().map_err(read_err)? {
            let (_, value) = entry.map_err(read_err)?;
            let record: ProjectRecord = serde_json::from_slice(value.value())
                .map_err(|e| VaultError::Read(format!("corrupt project record: {e}")))?;
            records.push(record);
        }

        tracing::debug!(count = records.len(), "projects loaded");
        Ok(records)
    }

    fn delete_project(&mut self, id: u64) -> Result<()> {
        let _span = tracing::debug_span!("redb_delete_project", project_id = id).entered();

        let txn = self.db.begin_write().map_err(write_err)?;
        {
            let mut projects = txn.open_table(PROJECTS).map_err(write_err)?;
            let removed = projects.remove(id).map_err(write_err)?.is_some();
            if !removed {
                tracing::debug!(project_id = id, "project not found, delete is a no-op");
            }

            // Cascade through the secondary index, then drop the index entry.
            let mut index = txn.open_table(PROJECT_BLOBS).map_err(write_err)?;
            let blob_ids: Vec<u64> = match index.remove(id).map_err(write_err)? {
                Some(guard) => serde_json::from_slice(guard.value())
                    .map_err(|e| VaultError::Write(format!("corrupt blob index: {e}")))?,
                None => Vec::new(),
            };

            let mut blobs = txn.open_table(BLOBS).map_err(write_err)?;
            let mut blob_data = txn.open_table(BLOB_DATA).map_err(write_err)?;
            for blob_id in &blob_ids {
                blobs.remove(*blob_id).map_err(write_err)?;
                blob_data.remove(*blob_id).map_err(write_err)?;
            }

            tracing::debug!(
                project_id = id,
                cascaded_blobs = blob_ids.len(),
                "project delete complete"
            );
        }
        txn.commit().map_err(write_err)?;
        Ok(())
    }

    fn clear_all(&mut self) -> Result<()> {
        let _span = tracing::debug_span!("redb_clear_all").entered();

        let txn = self.db.begin_write().map_err(write_err)?;
        {
            txn.delete_table(PROJECTS).map_err(write_err)?;
            txn.delete_table(BLOBS).map_err(write_err)?;
            txn.delete_table(BLOB_DATA).map_err(write_err)?;
            txn.delete_table(PROJECT_BLOBS).map_err(write_err)?;

            // Recreate so later reads find empty tables instead of missing ones.
            txn.open_table(PROJECTS).map_err(write_err)?;
            txn.open_table(BLOBS).map_err(write_err)?;
            txn.open_table(BLOB_DATA).map_err(write_err)?;
            txn.open_table(PROJECT_BLOBS).map_err(write_err)?;
        }
        txn.commit().map_err(write_err)?;

        tracing::debug!("all collections cleared");
        Ok(())
    }

    fn blob_metadata(&self) -> Result<Vec<BlobRecord>> {
        let _span = tracing::debug_span!("redb_blob_metadata").entered();

        let txn = self.db.begin_read().map_err(read_err)?;
        let table = txn.open_table(BLOBS).map_err(read_err)?;

        let mut records = Vec::new();
        for entry in table.iter().map_err(read_err)? {
            let (_, value) = entry.map_err(read_err)?;
            let record: BlobRecord = serde_json::from_slice(value.value())
                .map_err(|e| VaultError::Read(format!("corrupt blob record: {e}")))?;
            records.push(record);
        }

        tracing::debug!(count = records.len(), "blob metadata loaded");
        Ok(records)
    }

    fn load_blob(&self, id: u64) -> Result<Option<(BlobRecord, Vec<u8>)>> {
        let _span = tracing::debug_span!("redb_load_blob", blob_id = id).entered();

        let txn = self.db.begin_read().map_err(read_err)?;
        let blobs = txn.open_table(BLOBS).map_err(read_err)?;

        let record: BlobRecord = match blobs.get(id).map_err(read_err)? {
            Some(guard) => serde_json::from_slice(guard.value())
                .map_err(|e| VaultError::Read(format!("corrupt blob record: {e}")))?,
            None => {
                tracing::debug!(blob_id = id, "blob not found");
                return Ok(None);
            }
        };

        let data = txn.open_table(BLOB_DATA).map_err(read_err)?;
        let bytes = data
            .get(id)
            .map_err(read_err)?
            .map(|guard| guard.value().to_vec())
            .ok_or_else(|| VaultError::Read(format!("blob content missing for id {id}")))?;

        tracing::debug!(blob_id = id, size = bytes.len(), "blob loaded");
        Ok(Some((record, bytes)))
    }

    fn replace_projects(&mut self, records: &[ProjectRecord]) -> Result<()> {
        let _span =
            tracing::debug_span!("redb_replace_projects", record_count = records.len()).entered();

        let txn = self.db.begin_write().map_err(write_err)?;
        {
            // Import touches only the projects table; blobs stay as they are.
            txn.delete_table(PROJECTS).map_err(write_err)?;
            let mut projects = txn.open_table(PROJECTS).map_err(write_err)?;
            for record in records {
                let encoded = serde_json::to_vec(record).map_err(write_err)?;
                projects
                    .insert(record.id, encoded.as_slice())
                    .map_err(write_err)?;
            }
        }
        txn.commit().map_err(write_err)?;

        tracing::debug!(count = records.len(), "projects replaced");
        Ok(())
    }
}
