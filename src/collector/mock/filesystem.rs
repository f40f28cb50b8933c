//! In-memory mock filesystem for testing metrics without real `/proc`.
//!
//! This module provides `MockFs` which simulates a filesystem in memory,
//! allowing tests to run on macOS and in CI environments without Linux.

use crate::collector::traits::{DiskUsage, FileSystem};
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

#[derive(Debug, Default)]
struct MockFsInner {
    /// Map from path to file contents.
    files: HashMap<PathBuf, String>,
    /// Map from mount point to its usage.
    mounts: HashMap<PathBuf, DiskUsage>,
}

/// In-memory filesystem for testing.
///
/// Clones share the same contents, so a test can keep a handle and change
/// files between two samples of a metric that owns another clone.
#[derive(Debug, Clone, Default)]
pub struct MockFs {
    inner: Arc<RwLock<MockFsInner>>,
}

impl MockFs {
    /// Creates a new empty mock filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a file with the given content.
    pub fn add_file(&self, path: impl AsRef<Path>, content: impl Into<String>) {
        let mut inner = self.inner.write().unwrap_or_else(|e| e.into_inner());
        inner
            .files
            .insert(path.as_ref().to_path_buf(), content.into());
    }

    /// Adds or replaces a mount point with the given usage.
    pub fn add_mount(&self, path: impl AsRef<Path>, usage: DiskUsage) {
        let mut inner = self.inner.write().unwrap_or_else(|e| e.into_inner());
        inner.mounts.insert(path.as_ref().to_path_buf(), usage);
    }
}

impl FileSystem for MockFs {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        let inner = self.inner.read().unwrap_or_else(|e| e.into_inner());
        inner.files.get(path).cloned().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("file not found: {:?}", path),
            )
        })
    }

    fn disk_usage(&self, path: &Path) -> io::Result<DiskUsage> {
        let inner = self.inner.read().unwrap_or_else(|e| e.into_inner());
        inner.mounts.get(path).copied().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("mount point not found: {:?}", path),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_fs_add_file() {
        let fs = MockFs::new();
        fs.add_file("/proc/meminfo", "MemTotal: 16384 kB\n");

        let content = fs.read_to_string(Path::new("/proc/meminfo")).unwrap();
        assert_eq!(content, "MemTotal: 16384 kB\n");
    }

    #[test]
    fn test_mock_fs_clones_share_contents() {
        let fs = MockFs::new();
        let handle = fs.clone();
        handle.add_file("/proc/stat", "cpu 1 2 3 4\n");

        assert!(fs.read_to_string(Path::new("/proc/stat")).is_ok());
    }

    #[test]
    fn test_mock_fs_disk_usage() {
        let fs = MockFs::new();
        let usage = DiskUsage {
            total: 100,
            free: 40,
            used: 60,
        };
        fs.add_mount("/", usage);

        assert_eq!(fs.disk_usage(Path::new("/")).unwrap(), usage);
        assert!(fs.disk_usage(Path::new("/data")).is_err());
    }

    #[test]
    fn test_mock_fs_not_found() {
        let fs = MockFs::new();
        let result = fs.read_to_string(Path::new("/nonexistent"));
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().kind(), io::ErrorKind::NotFound);
    }
}
