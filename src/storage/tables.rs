//! Table definitions for the embedded redb database.
//!
//! Values are JSON-encoded records except for `blob_data`, which holds the raw
//! uploaded bytes. Keys are the store-assigned ids.

use redb::TableDefinition;

/// Project records: id -> ProjectRecord (JSON)
pub const PROJECTS: TableDefinition<u64, &[u8]> = TableDefinition::new("projects");

/// Blob metadata: id -> BlobRecord (JSON), raw bytes kept in [`BLOB_DATA`]
pub const BLOBS: TableDefinition<u64, &[u8]> = TableDefinition::new("blobs");

/// Raw uploaded file content, keyed by the owning blob id.
pub const BLOB_DATA: TableDefinition<u64, &[u8]> = TableDefinition::new("blob_data");

/// Secondary index: project id -> JSON Vec of blob ids (for cascade deletes)
pub const PROJECT_BLOBS: TableDefinition<u64, &[u8]> = TableDefinition::new("project_blobs");

/// Reserved metadata table for future schema needs. Created, never written.
pub const META: TableDefinition<&str, &[u8]> = TableDefinition::new("meta");
