//! Abstractions for filesystem access to enable testing and mocking.
//!
//! The `FileSystem` trait allows the host metrics to work with both the real
//! `/proc` filesystem and mount points on Linux, and with in-memory
//! implementations in tests.

use std::io;
use std::path::Path;

/// Space usage of a mounted filesystem, in bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiskUsage {
    /// Total size of the filesystem.
    pub total: u64,
    /// Space available to unprivileged users.
    pub free: u64,
    /// Space in use.
    pub used: u64,
}

impl DiskUsage {
    /// Builds usage figures from `statvfs` style block counts.
    pub fn from_blocks(fragment_size: u64, blocks: u64, blocks_free: u64, blocks_avail: u64) -> Self {
        Self {
            total: blocks.saturating_mul(fragment_size),
            free: blocks_avail.saturating_mul(fragment_size),
            used: blocks.saturating_sub(blocks_free).saturating_mul(fragment_size),
        }
    }

    /// Percentage of the space usable by unprivileged users that is in use.
    pub fn used_percent(&self) -> f64 {
        let usable = self.used.saturating_add(self.free);
        if usable == 0 {
            return 0.0;
        }
        self.used as f64 / usable as f64 * 100.0
    }
}

/// Abstraction for filesystem operations.
///
/// This trait allows metrics to read from the real filesystem or from
/// a mock implementation for testing purposes.
pub trait FileSystem: Send + Sync {
    /// Reads the entire contents of a file as a string.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Returns space usage of the filesystem mounted at `path`.
    fn disk_usage(&self, path: &Path) -> io::Result<DiskUsage>;
}

/// Real filesystem implementation that delegates to `std::fs` and `statvfs`.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealFs;

impl RealFs {
    /// Creates a new `RealFs` instance.
    pub fn new() -> Self {
        Self
    }
}

impl FileSystem for RealFs {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    #[cfg(unix)]
    fn disk_usage(&self, path: &Path) -> io::Result<DiskUsage> {
        use std::ffi::CString;
        use std::os::unix::ffi::OsStrExt;

        let c_path = CString::new(path.as_os_str().as_bytes())
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

        // SAFETY: `c_path` is a valid NUL-terminated string and `stat` is a
        // properly sized, writable `statvfs` struct.
        let mut stat: libc::statvfs = unsafe { std::mem::zeroed() };
        let ret = unsafe { libc::statvfs(c_path.as_ptr(), &mut stat) };
        if ret != 0 {
            return Err(io::Error::last_os_error());
        }

        Ok(DiskUsage::from_blocks(
            stat.f_frsize as u64,
            stat.f_blocks as u64,
            stat.f_bfree as u64,
            stat.f_bavail as u64,
        ))
    }

    #[cfg(not(unix))]
    fn disk_usage(&self, _path: &Path) -> io::Result<DiskUsage> {
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            "disk usage is only available on unix",
        ))
    }
}
