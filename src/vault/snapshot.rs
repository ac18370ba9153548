//! Versioned snapshot document for export and import.
//!
//! A snapshot is the JSON backup format of the vault: all project records plus
//! the *metadata* of every stored blob. Raw blob bytes are never part of a
//! snapshot, so imported projects are metadata-only and not independently
//! downloadable. The wire format is camelCase:
//!
//! ```json
//! {
//!   "version": "1.0",
//!   "exportDate": "2026-08-27T12:00:00.000Z",
//!   "projects": [ { "id": 1, "name": "...", "type": "...", "size": 0,
//!                   "description": "", "timestamp": 0, "downloadCount": 0 } ],
//!   "fileMetadata": [ { "id": 1, "projectId": 1, "fileName": "...",
//!                       "fileType": "...", "fileSize": 0, "timestamp": 0 } ]
//! }
//! ```

use crate::domain::error::{Result, VaultError};
use crate::storage::models::{BlobRecord, ProjectRecord};
use chrono::SecondsFormat;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Format version written into every exported snapshot.
pub const SNAPSHOT_VERSION: &str = "1.0";

/// A versioned export/import document.
///
/// `projects` is required; a document without it fails to parse and surfaces
/// as [`VaultError::Snapshot`]. `fileMetadata` defaults to empty — import only
/// consumes the projects array and round-trips file metadata for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// Snapshot format version, `"1.0"`.
    pub version: String,

    /// ISO-8601 timestamp of when the snapshot was produced.
    pub export_date: String,

    /// All project records at export time.
    pub projects: Vec<ProjectRecord>,

    /// Metadata of every stored blob, without raw bytes.
    #[serde(default)]
    pub file_metadata: Vec<BlobRecord>,
}

impl Snapshot {
    /// Builds a snapshot from current store contents, stamped with now.
    #[must_use]
    pub fn new(projects: Vec<ProjectRecord>, file_metadata: Vec<BlobRecord>) -> Self {
        Self {
            version: SNAPSHOT_VERSION.to_string(),
            export_date: chrono::Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            projects,
            file_metadata,
        }
    }

    /// Parses a snapshot from its JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::Snapshot`] if the document is not valid JSON or
    /// is missing the required `projects` array or project fields.
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| VaultError::Snapshot(e.to_string()))
    }

    /// Serializes the snapshot as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::Snapshot`] if serialization fails, which only
    /// happens with pathological data.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| VaultError::Snapshot(e.to_string()))
    }

    /// Writes the snapshot to a file using an atomic write.
    ///
    /// Writes to a temporary sibling first, then renames it into place, so a
    /// crash never leaves a half-written backup on disk.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::Io`] if the temporary file cannot be written or
    /// the rename fails.
    pub fn write_to_file(&self, path: &Path) -> Result<()> {
        tracing::debug!(path = ?path, project_count = self.projects.len(), "writing snapshot");

        let json = self.to_json()?;
        let tmp_path = path.with_extension("tmp");
        std::fs::write(&tmp_path, json)?;
        std::fs::rename(&tmp_path, path)?;

        tracing::debug!("snapshot written");
        Ok(())
    }

    /// Reads and parses a snapshot file.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::Io`] if the file cannot be read, or
    /// [`VaultError::Snapshot`] if its contents are not a valid document.
    pub fn read_from_file(path: &Path) -> Result<Self> {
        tracing::debug!(path = ?path, "reading snapshot");
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_snapshot_carries_version_and_iso_date() {
        let snapshot = Snapshot::new(vec![], vec![]);
        assert_eq!(snapshot.version, "1.0");
        assert!(snapshot.export_date.ends_with('Z'));
    }

    #[test]
    fn serializes_with_wire_field_names() {
        let snapshot = Snapshot::new(
            vec![ProjectRecord::new(1, "a", "File", 10, "")],
            vec![BlobRecord::new(1, 1, "a.txt", "text/plain", 10)],
        );
        let json = serde_json::to_value(&snapshot).unwrap();

        assert!(json.get("exportDate").is_some());
        assert!(json.get("fileMetadata").is_some());
        assert_eq!(json["projects"][0]["type"], "File");
        assert_eq!(json["fileMetadata"][0]["projectId"], 1);
    }

    #[test]
    fn missing_projects_array_is_malformed() {
        let err = Snapshot::from_json(r#"{"version":"1.0","exportDate":"now"}"#).unwrap_err();
        assert!(matches!(err, VaultError::Snapshot(_)));
    }

    #[test]
    fn file_metadata_defaults_to_empty() {
        let snapshot =
            Snapshot::from_json(r#"{"version":"1.0","exportDate":"now","projects":[]}"#).unwrap();
        assert!(snapshot.file_metadata.is_empty());
    }

    #[test]
    fn write_then_read_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("backup.json");

        let snapshot = Snapshot::new(vec![ProjectRecord::new(2, "b", "File", 20, "notes")], vec![]);
        snapshot.write_to_file(&path).unwrap();

        let loaded = Snapshot::read_from_file(&path).unwrap();
        assert_eq!(loaded, snapshot);
        assert!(!path.with_extension("tmp").exists());
    }
}
