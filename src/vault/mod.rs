//! Persistence façade mediating all database access.
//!
//! [`Vault`] is the single entry point to the embedded store. It owns a boxed
//! [`Store`] backend and exposes the full operation set: save, load, delete
//! with cascade, clear, statistics, blob retrieval, and versioned snapshot
//! export/import. No in-memory cache is kept consistent automatically —
//! callers re-invoke [`Vault::load_all`] after a mutation to observe current
//! state.
//!
//! # Modules
//!
//! - `snapshot`: the versioned JSON export/import document

pub mod snapshot;

pub use snapshot::{Snapshot, SNAPSHOT_VERSION};

use crate::domain::error::Result;
use crate::domain::ProjectSubmission;
use crate::storage::{BlobRecord, ProjectRecord, RedbStorage, Store};
use std::path::Path;

/// Counts shown by the database-view action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VaultStats {
    /// Number of project records in the store.
    pub project_count: usize,

    /// Number of blob records in the store.
    pub blob_count: usize,
}

/// The persistence façade.
///
/// Owns the canonical state; there are no ambient globals mirroring store
/// contents. Every method is one logical operation, one store transaction, and
/// failures surface directly without retries.
pub struct Vault {
    store: Box<dyn Store>,
}

impl Vault {
    /// Opens the vault backed by a redb database at `db_path`.
    ///
    /// Creates the database and its collections on first run.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::Unavailable`](crate::domain::VaultError::Unavailable)
    /// if the embedded database cannot be opened or created.
    pub fn open(db_path: impl AsRef<Path>) -> Result<Self> {
        let storage = RedbStorage::open(db_path.as_ref())?;
        Ok(Self::with_store(Box::new(storage)))
    }

    /// Wraps an already-constructed storage backend.
    #[must_use]
    pub fn with_store(store: Box<dyn Store>) -> Self {
        Self { store }
    }

    /// Replaces all stored projects with the given submissions.
    ///
    /// The projects collection is cleared and fully repopulated, not diffed;
    /// ids are reassigned sequentially from 1 in input order. Submissions
    /// carrying raw content also persist a blob owned by the new project.
    /// Blobs from earlier saves stay in place until a cascade delete or
    /// [`Vault::clear_all`]. Atomic per call.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::Write`](crate::domain::VaultError::Write) on
    /// transaction failure; the caller is responsible for surfacing it.
    pub fn save_all(&mut self, submissions: &[ProjectSubmission]) -> Result<Vec<ProjectRecord>> {
        let _span = tracing::debug_span!("vault_save_all", count = submissions.len()).entered();
        self.store.save_all(submissions)
    }

    /// Returns all project records, order unspecified.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::Read`](crate::domain::VaultError::Read) on
    /// transaction failure.
    pub fn load_all(&self) -> Result<Vec<ProjectRecord>> {
        self.store.load_all()
    }

    /// Deletes one project and cascades to every blob it owns.
    ///
    /// A missing id is a no-op, not an error; store contents are unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::Write`](crate::domain::VaultError::Write) on
    /// transaction failure.
    pub fn delete_project(&mut self, id: u64) -> Result<()> {
        let _span = tracing::debug_span!("vault_delete_project", project_id = id).entered();
        self.store.delete_project(id)
    }

    /// Empties the projects and blobs collections unconditionally.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::Write`](crate::domain::VaultError::Write) on
    /// transaction failure.
    pub fn clear_all(&mut self) -> Result<()> {
        let _span = tracing::debug_span!("vault_clear_all").entered();
        self.store.clear_all()
    }

    /// Returns project and blob counts for the database-view action.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::Read`](crate::domain::VaultError::Read) on
    /// transaction failure.
    pub fn stats(&self) -> Result<VaultStats> {
        let project_count = self.store.load_all()?.len();
        let blob_count = self.store.blob_metadata()?.len();
        Ok(VaultStats {
            project_count,
            blob_count,
        })
    }

    /// Retrieves one stored blob with its raw bytes, for download.
    ///
    /// Returns `Ok(None)` if no blob with that id exists. The owning project's
    /// download count is not modified.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::Read`](crate::domain::VaultError::Read) on
    /// transaction failure.
    pub fn fetch_blob(&self, id: u64) -> Result<Option<(BlobRecord, Vec<u8>)>> {
        self.store.load_blob(id)
    }

    /// Produces a snapshot of all project records and blob metadata.
    ///
    /// Raw blob bytes are never included.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::Read`](crate::domain::VaultError::Read) on
    /// transaction failure.
    pub fn export_snapshot(&self) -> Result<Snapshot> {
        let _span = tracing::debug_span!("vault_export_snapshot").entered();

        let projects = self.store.load_all()?;
        let file_metadata = self.store.blob_metadata()?;

        tracing::debug!(
            project_count = projects.len(),
            blob_count = file_metadata.len(),
            "snapshot assembled"
        );
        Ok(Snapshot::new(projects, file_metadata))
    }

    /// Restores the projects collection from a snapshot document.
    ///
    /// Only the `projects` array is consumed: records keep their snapshot ids,
    /// with missing descriptions defaulting to empty and missing download
    /// counts to zero (handled at parse time). Blob content was never exported
    /// and is not restored, so imported projects are metadata-only. Returns
    /// the number of restored projects.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::Write`](crate::domain::VaultError::Write) on
    /// transaction failure.
    pub fn import_snapshot(&mut self, snapshot: &Snapshot) -> Result<usize> {
        let _span =
            tracing::debug_span!("vault_import_snapshot", count = snapshot.projects.len())
                .entered();

        self.store.replace_projects(&snapshot.projects)?;

        tracing::debug!(restored = snapshot.projects.len(), "snapshot imported");
        Ok(snapshot.projects.len())
    }

    /// Exports a snapshot and writes it to `path` atomically.
    ///
    /// Returns the snapshot that was written.
    ///
    /// # Errors
    ///
    /// Propagates read failures from [`Vault::export_snapshot`] and I/O
    /// failures from the file write.
    pub fn export_to_file(&self, path: &Path) -> Result<Snapshot> {
        let snapshot = self.export_snapshot()?;
        snapshot.write_to_file(path)?;
        Ok(snapshot)
    }

    /// Reads a snapshot file and imports it.
    ///
    /// Returns the number of restored projects.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::Io`](crate::domain::VaultError::Io) if the file
    /// cannot be read,
    /// [`VaultError::Snapshot`](crate::domain::VaultError::Snapshot) if it is
    /// not a valid document, or
    /// [`VaultError::Write`](crate::domain::VaultError::Write) if the restore
    /// transaction fails.
    pub fn import_from_file(&mut self, path: &Path) -> Result<usize> {
        let snapshot = Snapshot::read_from_file(path)?;
        self.import_snapshot(&snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ProjectSubmission;

    fn open_temp() -> (tempfile::TempDir, Vault) {
        let dir = tempfile::tempdir().unwrap();
        let vault = Vault::open(dir.path().join("vault.redb")).unwrap();
        (dir, vault)
    }

    #[test]
    fn save_three_delete_middle_scenario() {
        let (_dir, mut vault) = open_temp();

        vault
            .save_all(&[
                ProjectSubmission::new("A", "File", 100),
                ProjectSubmission::new("B", "File", 200),
                ProjectSubmission::new("C", "File", 300),
            ])
            .unwrap();

        let loaded = vault.load_all().unwrap();
        assert_eq!(loaded.len(), 3);
        assert_eq!(
            loaded.iter().map(|r| (r.id, r.size)).collect::<Vec<_>>(),
            vec![(1, 100), (2, 200), (3, 300)]
        );

        vault.delete_project(2).unwrap();

        let remaining: Vec<u64> = vault.load_all().unwrap().iter().map(|r| r.id).collect();
        assert_eq!(remaining, vec![1, 3]);
    }

    #[test]
    fn loaded_fields_match_submissions_in_order() {
        let (_dir, mut vault) = open_temp();

        vault
            .save_all(&[
                ProjectSubmission::new("site.html", "text/html", 512).describe("landing page"),
                ProjectSubmission::new("tool.rs", "text/x-rust", 2048),
            ])
            .unwrap();

        let loaded = vault.load_all().unwrap();
        assert_eq!(loaded[0].name, "site.html");
        assert_eq!(loaded[0].kind, "text/html");
        assert_eq!(loaded[0].description, "landing page");
        assert_eq!(loaded[1].name, "tool.rs");
        assert_eq!(loaded[1].description, "");
    }

    #[test]
    fn clear_all_leaves_empty_store() {
        let (_dir, mut vault) = open_temp();

        vault
            .save_all(&[ProjectSubmission::new("A", "File", 1)])
            .unwrap();
        vault.clear_all().unwrap();

        assert!(vault.load_all().unwrap().is_empty());
        let stats = vault.stats().unwrap();
        assert_eq!(stats.project_count, 0);
        assert_eq!(stats.blob_count, 0);
    }

    #[test]
    fn stats_counts_projects_and_blobs() {
        let (_dir, mut vault) = open_temp();

        vault
            .save_all(&[
                ProjectSubmission::with_content("a.txt", "text/plain", vec![1]),
                ProjectSubmission::new("meta-only", "File", 9),
            ])
            .unwrap();

        let stats = vault.stats().unwrap();
        assert_eq!(stats.project_count, 2);
        assert_eq!(stats.blob_count, 1);
    }

    #[test]
    fn export_import_round_trips_metadata_without_content() {
        let (_dir, mut vault) = open_temp();

        vault
            .save_all(&[
                ProjectSubmission::with_content("a.rs", "text/x-rust", vec![0u8; 100]),
                ProjectSubmission::new("b.md", "text/markdown", 200),
            ])
            .unwrap();

        let snapshot = vault.export_snapshot().unwrap();
        assert_eq!(snapshot.version, SNAPSHOT_VERSION);
        assert_eq!(snapshot.projects.len(), 2);
        assert_eq!(snapshot.file_metadata.len(), 1);

        vault.clear_all().unwrap();
        let restored = vault.import_snapshot(&snapshot).unwrap();
        assert_eq!(restored, 2);

        let mut loaded = vault.load_all().unwrap();
        loaded.sort_by_key(|r| r.id);
        assert_eq!(loaded, snapshot.projects);

        // Blob content was never exported, so nothing is downloadable.
        let stats = vault.stats().unwrap();
        assert_eq!(stats.blob_count, 0);
        assert!(vault.fetch_blob(1).unwrap().is_none());
    }

    #[test]
    fn resubmit_keeps_earlier_blobs_in_exports() {
        let (_dir, mut vault) = open_temp();

        vault
            .save_all(&[ProjectSubmission::with_content(
                "first.bin",
                "application/octet-stream",
                vec![1, 2],
            )])
            .unwrap();
        vault
            .save_all(&[ProjectSubmission::new("meta-only", "File", 9)])
            .unwrap();

        let snapshot = vault.export_snapshot().unwrap();
        assert_eq!(snapshot.file_metadata.len(), 1);
        assert_eq!(snapshot.file_metadata[0].file_name, "first.bin");
        assert_eq!(vault.stats().unwrap().blob_count, 1);
    }

    #[test]
    fn export_to_file_then_import_from_file() {
        let (dir, mut vault) = open_temp();
        let backup = dir.path().join("portfolio_backup.json");

        vault
            .save_all(&[
                ProjectSubmission::new("A", "File", 100),
                ProjectSubmission::new("B", "File", 200),
            ])
            .unwrap();

        vault.export_to_file(&backup).unwrap();
        vault.clear_all().unwrap();

        let restored = vault.import_from_file(&backup).unwrap();
        assert_eq!(restored, 2);

        let names: Vec<String> = vault
            .load_all()
            .unwrap()
            .into_iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(names, vec!["A", "B"]);
    }

    #[test]
    fn import_defaults_missing_optional_fields() {
        let (_dir, mut vault) = open_temp();

        let snapshot = Snapshot::from_json(
            r#"{
                "version": "1.0",
                "exportDate": "2026-08-27T00:00:00.000Z",
                "projects": [
                    {"id": 5, "name": "bare", "type": "File", "size": 7, "timestamp": 1000}
                ]
            }"#,
        )
        .unwrap();

        vault.import_snapshot(&snapshot).unwrap();

        let loaded = vault.load_all().unwrap();
        assert_eq!(loaded[0].id, 5);
        assert_eq!(loaded[0].description, "");
        assert_eq!(loaded[0].download_count, 0);
    }

    #[test]
    fn import_from_unparseable_file_is_malformed_snapshot() {
        let (dir, mut vault) = open_temp();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{\"version\":\"1.0\"}").unwrap();

        let err = vault.import_from_file(&path).unwrap_err();
        assert!(matches!(err, crate::domain::VaultError::Snapshot(_)));
    }

    #[test]
    fn fetch_blob_does_not_touch_download_count() {
        let (_dir, mut vault) = open_temp();

        vault
            .save_all(&[ProjectSubmission::with_content(
                "a.bin",
                "application/octet-stream",
                vec![1, 2, 3],
            )])
            .unwrap();

        let blob_id = vault.export_snapshot().unwrap().file_metadata[0].id;
        let (_, bytes) = vault.fetch_blob(blob_id).unwrap().unwrap();
        assert_eq!(bytes, vec![1, 2, 3]);

        assert_eq!(vault.load_all().unwrap()[0].download_count, 0);
    }
}
