//! Storage record models for the persistence layer.
//!
//! This module defines the raw storage record types used for persistence
//! operations. These types are separate from domain models to maintain a clear
//! boundary between storage representation and business logic. Their serde
//! field names match the snapshot wire format exactly (camelCase, `type` for
//! the kind field), so a record serializes to the same shape the export
//! document carries.

use crate::domain::Project;
use serde::{Deserialize, Serialize};

/// Represents a project record in storage.
///
/// This is the storage-layer representation of one submitted project. Ids are
/// assigned by the store: a full save re-assigns sequential ids `1..=N` in
/// input order, and an import preserves the ids carried by the snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectRecord {
    /// Store-assigned identifier, unique within the projects collection.
    pub id: u64,

    /// Display name, typically the uploaded file name.
    pub name: String,

    /// MIME type or free-form label.
    #[serde(rename = "type")]
    pub kind: String,

    /// Declared size of the uploaded content in bytes.
    pub size: u64,

    /// Free-text description; empty when none was given.
    #[serde(default)]
    pub description: String,

    /// Creation time in milliseconds since the Unix epoch.
    pub timestamp: i64,

    /// Number of times the project file was downloaded. Defaults to 0.
    #[serde(rename = "downloadCount", default)]
    pub download_count: u32,
}

impl ProjectRecord {
    /// Creates a new project record stamped with the current time.
    ///
    /// `download_count` starts at 0.
    #[must_use]
    pub fn new(
        id: u64,
        name: impl Into<String>,
        kind: impl Into<String>,
        size: u64,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            kind: kind.into(),
            size,
            description: description.into(),
            timestamp: chrono::Utc::now().timestamp_millis(),
            download_count: 0,
        }
    }

    /// Converts into the domain model, with the store-assigned id attached.
    #[must_use]
    pub fn to_project(&self) -> Project {
        Project {
            id: Some(self.id),
            name: self.name.clone(),
            kind: self.kind.clone(),
            size: self.size,
            description: self.description.clone(),
            timestamp: self.timestamp,
            download_count: self.download_count,
        }
    }
}

/// Represents the metadata of one stored file blob.
///
/// The raw bytes live in a separate content table under the same id; this
/// record is everything a snapshot export carries. `project_id` references the
/// owning project but the store enforces no referential integrity — cascade
/// deletes are the delete-project path's job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlobRecord {
    /// Store-assigned identifier, unique within the blobs collection.
    pub id: u64,

    /// Id of the owning project record.
    pub project_id: u64,

    /// Original file name of the upload.
    pub file_name: String,

    /// MIME type or free-form label of the upload.
    pub file_type: String,

    /// Size of the raw content in bytes.
    pub file_size: u64,

    /// Creation time in milliseconds since the Unix epoch.
    pub timestamp: i64,
}

impl BlobRecord {
    /// Creates a new blob metadata record stamped with the current time.
    #[must_use]
    pub fn new(
        id: u64,
        project_id: u64,
        file_name: impl Into<String>,
        file_type: impl Into<String>,
        file_size: u64,
    ) -> Self {
        Self {
            id,
            project_id,
            file_name: file_name.into(),
            file_type: file_type.into(),
            file_size,
            timestamp: chrono::Utc::now().timestamp_millis(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_record_serializes_with_wire_field_names() {
        let record = ProjectRecord::new(1, "demo.rs", "text/x-rust", 42, "");
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["id"], 1);
        assert_eq!(json["type"], "text/x-rust");
        assert_eq!(json["downloadCount"], 0);
        assert!(json.get("kind").is_none());
    }

    #[test]
    fn project_record_defaults_optional_fields_on_parse() {
        // description and downloadCount may be absent in imported documents
        let json = r#"{"id":3,"name":"a","type":"File","size":10,"timestamp":1000}"#;
        let record: ProjectRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.description, "");
        assert_eq!(record.download_count, 0);
    }

    #[test]
    fn to_project_carries_the_assigned_id() {
        let record = ProjectRecord::new(9, "demo", "File", 5, "notes");
        let project = record.to_project();

        assert_eq!(project.id, Some(9));
        assert_eq!(project.name, "demo");
        assert_eq!(project.description, "notes");
    }

    #[test]
    fn blob_record_serializes_camel_case() {
        let record = BlobRecord::new(7, 2, "a.txt", "text/plain", 9);
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["projectId"], 2);
        assert_eq!(json["fileName"], "a.txt");
        assert_eq!(json["fileSize"], 9);
    }
}
