//! Upward `.env` discovery.
//!
//! Starting from a directory, look for the env file there and then in each
//! parent until the filesystem root. A process started anywhere inside a
//! project therefore finds the project's root `.env`.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Default name of the file the walker looks for.
pub const DEFAULT_FILE_NAME: &str = ".env";

/// Walks parent directories looking for an env file.
#[derive(Debug, Clone)]
pub struct DirectoryWalker {
    file_name: String,
}

impl Default for DirectoryWalker {
    fn default() -> Self {
        Self::new(DEFAULT_FILE_NAME)
    }
}

impl DirectoryWalker {
    /// Create a walker for the given file name.
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
        }
    }

    /// The file name being searched for.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Find the nearest env file at or above `start`.
    ///
    /// The start directory is canonicalized when possible so the returned
    /// path is absolute and symlinks resolve to one cache key. Each directory
    /// is visited at most once.
    ///
    /// # Returns
    ///
    /// The path to the env file, or None once the root has been checked.
    pub fn find(&self, start: &Path) -> Option<PathBuf> {
        let mut current = start
            .canonicalize()
            .unwrap_or_else(|_| start.to_path_buf());
        let mut visited = HashSet::new();

        loop {
            if !visited.insert(current.clone()) {
                tracing::debug!(dir = %current.display(), "directory already visited, stopping");
                return None;
            }

            let candidate = current.join(&self.file_name);
            tracing::trace!(path = %candidate.display(), "checking for env file");
            if candidate.is_file() {
                return Some(candidate);
            }

            // Move up one directory
            if !current.pop() {
                return None;
            }
        }
    }
}
