//! Project domain model and submission input.
//!
//! This module defines the core [`Project`] type representing one portfolio
//! submission as the presentation layer sees it, and [`ProjectSubmission`], the
//! input carried from an upload form into the vault. Domain types are kept
//! separate from the storage records in `crate::storage::models`.

use serde::{Deserialize, Serialize};

/// Number of milliseconds in one minute.
const MILLIS_PER_MINUTE: i64 = 60_000;

/// Number of milliseconds in one hour.
const MILLIS_PER_HOUR: i64 = 3_600_000;

/// Number of milliseconds in one day.
const MILLIS_PER_DAY: i64 = 86_400_000;

/// Number of bytes in one mebibyte, used for human-readable sizes.
const BYTES_PER_MIB: f64 = 1024.0 * 1024.0;

/// Represents a submitted portfolio project.
///
/// A project describes one uploaded file that was submitted to the portfolio:
/// its display name, MIME type or label, size in bytes, and an optional free-text
/// description. The `id` is `None` for submissions not yet persisted; the vault
/// assigns sequential ids on save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: Option<u64>,
    pub name: String,
    pub kind: String,
    pub size: u64,
    pub description: String,
    pub timestamp: i64,
    pub download_count: u32,
}

impl Project {
    /// Returns the project size formatted in mebibytes, e.g. `"1.25 MB"`.
    ///
    /// Matches the two-decimal display the presentation layer uses for cards.
    #[must_use]
    pub fn size_display(&self) -> String {
        #[allow(clippy::cast_precision_loss)]
        let mib = self.size as f64 / BYTES_PER_MIB;
        format!("{mib:.2} MB")
    }

    /// Returns a human-readable string describing how long ago the project was saved.
    ///
    /// The format varies based on the time elapsed:
    /// - Less than 1 minute: "just now"
    /// - Less than 1 hour: "Xm ago"
    /// - Less than 1 day: "Xh ago"
    /// - 1 day or more: "Xd ago"
    #[must_use]
    pub fn saved_ago(&self) -> String {
        let now = chrono::Utc::now().timestamp_millis();
        let diff = now - self.timestamp;

        if diff < MILLIS_PER_MINUTE {
            "just now".to_string()
        } else if diff < MILLIS_PER_HOUR {
            let mins = diff / MILLIS_PER_MINUTE;
            format!("{mins}m ago")
        } else if diff < MILLIS_PER_DAY {
            let hours = diff / MILLIS_PER_HOUR;
            format!("{hours}h ago")
        } else {
            let days = diff / MILLIS_PER_DAY;
            format!("{days}d ago")
        }
    }
}

/// Input for submitting one project to the vault.
///
/// Carries the metadata of an uploaded file plus, optionally, its raw content.
/// Submissions with content produce a blob record alongside the project record;
/// metadata-only submissions (e.g. restored from a snapshot) do not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectSubmission {
    /// Display name, typically the uploaded file name.
    pub name: String,

    /// MIME type or free-form label, e.g. `"text/x-rust"` or `"File"`.
    pub kind: String,

    /// Size of the uploaded content in bytes.
    pub size: u64,

    /// Free-text description. Empty when the form field was left blank.
    #[serde(default)]
    pub description: String,

    /// Raw file bytes, present only when the caller uploaded actual content.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Vec<u8>>,
}

impl ProjectSubmission {
    /// Creates a metadata-only submission with an empty description.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            size,
            description: String::new(),
            content: None,
        }
    }

    /// Creates a submission carrying raw file content.
    ///
    /// The declared `size` is derived from the content length.
    #[must_use]
    pub fn with_content(
        name: impl Into<String>,
        kind: impl Into<String>,
        content: Vec<u8>,
    ) -> Self {
        let size = content.len() as u64;
        Self {
            name: name.into(),
            kind: kind.into(),
            size,
            description: String::new(),
            content: Some(content),
        }
    }

    /// Sets the description, builder-style.
    #[must_use]
    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_display_uses_two_decimals() {
        let project = Project {
            id: Some(1),
            name: "demo.rs".to_string(),
            kind: "text/x-rust".to_string(),
            size: 1_310_720, // 1.25 MiB
            description: String::new(),
            timestamp: 0,
            download_count: 0,
        };
        assert_eq!(project.size_display(), "1.25 MB");
    }

    #[test]
    fn saved_ago_reports_just_now_for_fresh_projects() {
        let project = Project {
            id: None,
            name: "demo".to_string(),
            kind: "File".to_string(),
            size: 0,
            description: String::new(),
            timestamp: chrono::Utc::now().timestamp_millis(),
            download_count: 0,
        };
        assert_eq!(project.saved_ago(), "just now");
    }

    #[test]
    fn with_content_derives_size() {
        let submission = ProjectSubmission::with_content("a.txt", "text/plain", vec![0u8; 128]);
        assert_eq!(submission.size, 128);
        assert!(submission.content.is_some());
        assert!(submission.description.is_empty());
    }

    #[test]
    fn describe_sets_description() {
        let submission = ProjectSubmission::new("a", "File", 1).describe("my project");
        assert_eq!(submission.description, "my project");
    }
}
