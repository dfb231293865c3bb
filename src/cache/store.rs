//! Process-wide cache of parsed env files.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use super::entry::FileCacheEntry;
use crate::config::CachePolicy;
use crate::error::Result;

/// Memoizes parsed env files by absolute path.
///
/// Readers share entries through `Arc`; a reload swaps in a new entry rather
/// than mutating the old one, so concurrent readers never see a partial map.
///
/// # Example
///
/// ```
/// use envchain::cache::FileCache;
/// use envchain::config::{CachePolicy, ConfigValue};
/// use tempfile::TempDir;
///
/// let temp = TempDir::new().unwrap();
/// let path = temp.path().join(".env");
/// std::fs::write(&path, "A=1").unwrap();
///
/// let cache = FileCache::new(CachePolicy::LoadOnce);
/// let first = cache.get(&path).unwrap();
/// let second = cache.get(&path).unwrap();
///
/// assert_eq!(first.map["A"], ConfigValue::Integer(1));
/// assert_eq!(cache.load_count(), 1);
/// assert!(std::sync::Arc::ptr_eq(&first, &second));
/// ```
#[derive(Debug)]
pub struct FileCache {
    policy: CachePolicy,
    entries: RwLock<HashMap<PathBuf, Arc<FileCacheEntry>>>,
    loads: AtomicUsize,
}

impl Default for FileCache {
    fn default() -> Self {
        Self::new(CachePolicy::default())
    }
}

impl FileCache {
    /// Create an empty cache with the given refresh policy.
    pub fn new(policy: CachePolicy) -> Self {
        Self {
            policy,
            entries: RwLock::new(HashMap::new()),
            loads: AtomicUsize::new(0),
        }
    }

    /// The refresh policy.
    pub fn policy(&self) -> CachePolicy {
        self.policy
    }

    /// Return the parsed contents of `path`, reading it if needed.
    ///
    /// A missing file yields an empty, uncached entry. Read failures are
    /// returned to the caller and leave any previous entry in place.
    pub fn get(&self, path: &Path) -> Result<Arc<FileCacheEntry>> {
        if let Some(entry) = self.entries.read().get(path) {
            if !entry.is_stale(self.policy) {
                tracing::trace!(path = %path.display(), "env file cache hit");
                return Ok(Arc::clone(entry));
            }
            tracing::debug!(path = %path.display(), "env file changed, reloading");
        }

        match FileCacheEntry::load(path)? {
            Some(entry) => {
                let entry = Arc::new(entry);
                self.loads.fetch_add(1, Ordering::Relaxed);
                tracing::debug!(
                    path = %path.display(),
                    keys = entry.map.len(),
                    "loaded env file"
                );
                self.entries
                    .write()
                    .insert(path.to_path_buf(), Arc::clone(&entry));
                Ok(entry)
            }
            None => {
                self.entries.write().remove(path);
                Ok(Arc::new(FileCacheEntry::empty(path)))
            }
        }
    }

    /// Drop the entry for `path`. Returns true if one was cached.
    pub fn invalidate(&self, path: &Path) -> bool {
        self.entries.write().remove(path).is_some()
    }

    /// Drop every entry and reset the load counter.
    pub fn reset(&self) {
        self.entries.write().clear();
        self.loads.store(0, Ordering::Relaxed);
    }

    /// Number of times a file has been read from disk.
    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::Relaxed)
    }

    /// Number of cached files.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Check if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigValue;
    use std::fs::{self, File};
    use std::time::{Duration, SystemTime};
    use tempfile::TempDir;

    fn touch_forward(path: &Path) {
        let later = SystemTime::now() + Duration::from_secs(60);
        File::options()
            .write(true)
            .open(path)
            .unwrap()
            .set_modified(later)
            .unwrap();
    }

    fn setup(content: &str) -> (TempDir, PathBuf) {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(".env");
        fs::write(&path, content).unwrap();
        (temp, path)
    }

    #[test]
    fn caches_after_first_load() {
        let (_temp, path) = setup("A=1");
        let cache = FileCache::new(CachePolicy::LoadOnce);

        cache.get(&path).unwrap();
        cache.get(&path).unwrap();

        assert_eq!(cache.load_count(), 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn load_once_ignores_changes() {
        let (_temp, path) = setup("A=1");
        let cache = FileCache::new(CachePolicy::LoadOnce);
        cache.get(&path).unwrap();

        fs::write(&path, "A=2").unwrap();
        touch_forward(&path);

        assert_eq!(cache.get(&path).unwrap().map["A"], ConfigValue::Integer(1));
        assert_eq!(cache.load_count(), 1);
    }

    #[test]
    fn mtime_policy_reloads_changed_file() {
        let (_temp, path) = setup("A=1");
        let cache = FileCache::new(CachePolicy::Mtime);
        cache.get(&path).unwrap();

        fs::write(&path, "A=2").unwrap();
        touch_forward(&path);

        assert_eq!(cache.get(&path).unwrap().map["A"], ConfigValue::Integer(2));
        assert_eq!(cache.load_count(), 2);
    }

    #[test]
    fn mtime_policy_hits_when_unchanged() {
        let (_temp, path) = setup("A=1");
        let cache = FileCache::new(CachePolicy::Mtime);

        let first = cache.get(&path).unwrap();
        let second = cache.get(&path).unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.load_count(), 1);
    }

    #[test]
    fn missing_file_is_not_cached() {
        let temp = TempDir::new().unwrap();
        let cache = FileCache::default();

        let entry = cache.get(&temp.path().join(".env")).unwrap();

        assert!(entry.map.is_empty());
        assert!(cache.is_empty());
        assert_eq!(cache.load_count(), 0);
    }

    #[test]
    fn deleted_file_drops_entry_under_mtime() {
        let (_temp, path) = setup("A=1");
        let cache = FileCache::new(CachePolicy::Mtime);
        cache.get(&path).unwrap();

        fs::remove_file(&path).unwrap();

        assert!(cache.get(&path).unwrap().map.is_empty());
        assert!(cache.is_empty());
    }

    #[test]
    fn invalidate_forces_reload() {
        let (_temp, path) = setup("A=1");
        let cache = FileCache::new(CachePolicy::LoadOnce);
        cache.get(&path).unwrap();

        fs::write(&path, "A=2").unwrap();
        assert!(cache.invalidate(&path));
        assert!(!cache.invalidate(&path));

        assert_eq!(cache.get(&path).unwrap().map["A"], ConfigValue::Integer(2));
    }

    #[test]
    fn reset_clears_entries_and_counter() {
        let (_temp, path) = setup("A=1");
        let cache = FileCache::default();
        cache.get(&path).unwrap();

        cache.reset();

        assert!(cache.is_empty());
        assert_eq!(cache.load_count(), 0);
    }

    #[test]
    fn unreadable_path_is_an_error() {
        let temp = TempDir::new().unwrap();
        let cache = FileCache::default();

        let err = cache.get(temp.path()).unwrap_err();

        assert!(err.is_recoverable());
    }
}
