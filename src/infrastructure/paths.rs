//! Filesystem path utilities for storage locations.
//!
//! This module resolves where the vault keeps its database and log files, and
//! handles tilde expansion for user-supplied paths such as snapshot
//! destinations.

use std::path::PathBuf;

/// Returns the data directory for FolioVault storage.
///
/// The directory is `$HOME/.local/share/foliovault`; the embedded database
/// file `vault.redb` and the trace log live inside it. If `HOME` is unset the
/// directory resolves relative to the current working directory, which keeps
/// the tool usable in stripped-down environments.
#[must_use]
pub fn get_data_dir() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".local/share/foliovault")
}

/// Expands a leading tilde to the user's home directory.
///
/// # Examples
///
/// ```
/// use foliovault::infrastructure::expand_tilde;
///
/// std::env::set_var("HOME", "/home/user");
/// assert_eq!(expand_tilde("~/backups"), "/home/user/backups");
/// assert_eq!(expand_tilde("~"), "/home/user");
/// assert_eq!(expand_tilde("/absolute/path"), "/absolute/path");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    if path.starts_with("~/") {
        path.replacen('~', &home, 1)
    } else if path == "~" {
        home
    } else {
        path.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expand_tilde_handles_prefixed_bare_and_absolute() {
        std::env::set_var("HOME", "/home/tester");
        assert_eq!(expand_tilde("~/exports/backup.json"), "/home/tester/exports/backup.json");
        assert_eq!(expand_tilde("~"), "/home/tester");
        assert_eq!(expand_tilde("/tmp/backup.json"), "/tmp/backup.json");
        assert_eq!(expand_tilde("relative/backup.json"), "relative/backup.json");
    }

    #[test]
    fn data_dir_lives_under_home() {
        std::env::set_var("HOME", "/home/tester");
        assert_eq!(
            get_data_dir(),
            PathBuf::from("/home/tester/.local/share/foliovault")
        );
    }
}
