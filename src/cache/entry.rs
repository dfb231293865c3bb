//! Cached `.env` file contents.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::config::{CachePolicy, ConfigMap, EnvFileParser};
use crate::error::Result;

/// A parsed env file together with what is needed to revalidate it.
#[derive(Debug, Clone)]
pub struct FileCacheEntry {
    /// Absolute path of the parsed file.
    pub path: PathBuf,
    /// Parsed values.
    pub map: ConfigMap,
    /// Modification time observed just before the file was read.
    pub modified: Option<SystemTime>,
}

impl FileCacheEntry {
    /// Read and parse `path`.
    ///
    /// Returns `Ok(None)` when the file does not exist.
    pub fn load(path: &Path) -> Result<Option<Self>> {
        let modified = modified_time(path);
        let entry = EnvFileParser::load_existing(path)?.map(|map| Self {
            path: path.to_path_buf(),
            map,
            modified,
        });
        Ok(entry)
    }

    /// An entry standing in for a file that is not there.
    pub fn empty(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            map: ConfigMap::new(),
            modified: None,
        }
    }

    /// Check whether the file should be read again under `policy`.
    ///
    /// Under [`CachePolicy::Mtime`] an entry is stale once the file's
    /// modification time is newer than the recorded one, or when the file can
    /// no longer be stat'ed.
    pub fn is_stale(&self, policy: CachePolicy) -> bool {
        match policy {
            CachePolicy::LoadOnce => false,
            CachePolicy::Mtime => match (self.modified, modified_time(&self.path)) {
                (Some(cached), Some(current)) => current > cached,
                (None, Some(_)) => true,
                (_, None) => true,
            },
        }
    }
}

fn modified_time(path: &Path) -> Option<SystemTime> {
    fs::metadata(path).and_then(|m| m.modified()).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigValue;
    use std::fs::File;
    use std::time::Duration;
    use tempfile::TempDir;

    #[test]
    fn load_missing_file_returns_none() {
        let temp = TempDir::new().unwrap();
        let entry = FileCacheEntry::load(&temp.path().join(".env")).unwrap();
        assert!(entry.is_none());
    }

    #[test]
    fn load_directory_is_an_error_not_missing() {
        let temp = TempDir::new().unwrap();
        let err = FileCacheEntry::load(temp.path()).unwrap_err();
        assert!(err.is_recoverable());
    }

    #[test]
    fn load_records_values_and_mtime() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(".env");
        fs::write(&path, "A=1").unwrap();

        let entry = FileCacheEntry::load(&path).unwrap().unwrap();

        assert_eq!(entry.map["A"], ConfigValue::Integer(1));
        assert!(entry.modified.is_some());
        assert_eq!(entry.path, path);
    }

    #[test]
    fn load_once_never_stale() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(".env");
        fs::write(&path, "A=1").unwrap();
        let entry = FileCacheEntry::load(&path).unwrap().unwrap();

        let later = SystemTime::now() + Duration::from_secs(60);
        File::options()
            .write(true)
            .open(&path)
            .unwrap()
            .set_modified(later)
            .unwrap();

        assert!(!entry.is_stale(CachePolicy::LoadOnce));
        assert!(entry.is_stale(CachePolicy::Mtime));
    }

    #[test]
    fn mtime_entry_fresh_until_file_changes() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(".env");
        fs::write(&path, "A=1").unwrap();
        let entry = FileCacheEntry::load(&path).unwrap().unwrap();

        assert!(!entry.is_stale(CachePolicy::Mtime));
    }

    #[test]
    fn mtime_entry_stale_when_file_removed() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(".env");
        fs::write(&path, "A=1").unwrap();
        let entry = FileCacheEntry::load(&path).unwrap().unwrap();

        fs::remove_file(&path).unwrap();

        assert!(entry.is_stale(CachePolicy::Mtime));
    }
}
