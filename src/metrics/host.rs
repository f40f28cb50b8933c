//! Host metrics read from `/proc` and the root mount.

use std::path::{Path, PathBuf};

use tracing::debug;

use super::{Metric, MetricError};
use crate::collector::procfs::{CpuTimes, MemInfo, parse_cpu_times, parse_meminfo};
use crate::collector::traits::FileSystem;
use crate::model::{DataSet, Point, Unit};

/// Mount point reported by the [`Disk`] metric.
pub const DISK_ROOT: &str = "/";

fn percent(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    part as f64 / whole as f64 * 100.0
}

/// Converts a `/proc/meminfo` kB figure to bytes.
fn bytes(kib: u64) -> u64 {
    kib.saturating_mul(1024)
}

fn read_meminfo<F: FileSystem>(fs: &F, path: &Path) -> Result<MemInfo, MetricError> {
    let content = fs.read_to_string(path).map_err(|source| MetricError::Read {
        what: "memory statistics",
        source,
    })?;
    parse_meminfo(&content).map_err(|source| MetricError::Parse {
        what: "memory statistics",
        source,
    })
}

/// Host CPU utilization averaged across all cores.
///
/// There is no sampling sleep: each call compares the current `/proc/stat`
/// counters with the ones read by the previous call. The first call compares
/// against zero, i.e. reports the average since boot.
pub struct Cpu<F: FileSystem> {
    fs: F,
    stat_path: PathBuf,
    previous: CpuTimes,
}

impl<F: FileSystem> Cpu<F> {
    /// # Arguments
    /// * `fs` - Filesystem implementation (real or mock)
    /// * `proc_path` - Base path to proc filesystem (usually "/proc")
    pub fn new(fs: F, proc_path: impl AsRef<Path>) -> Self {
        Self {
            fs,
            stat_path: proc_path.as_ref().join("stat"),
            previous: CpuTimes::default(),
        }
    }
}

/// Busy share of the ticks elapsed between two readings, in percent.
fn cpu_percent(previous: &CpuTimes, current: &CpuTimes) -> f64 {
    let total = current.total().saturating_sub(previous.total());
    let busy = current.busy().saturating_sub(previous.busy());
    percent(busy, total).clamp(0.0, 100.0)
}

impl<F: FileSystem> Metric for Cpu<F> {
    fn name(&self) -> &'static str {
        "cpu"
    }

    fn sample(&mut self) -> Result<DataSet, MetricError> {
        debug!("gathering CPU info");
        let content = self
            .fs
            .read_to_string(&self.stat_path)
            .map_err(|source| MetricError::Read {
                what: "cpu statistics",
                source,
            })?;
        let current = parse_cpu_times(&content).map_err(|source| MetricError::Parse {
            what: "cpu statistics",
            source,
        })?;

        let utilization = cpu_percent(&self.previous, &current);
        self.previous = current;

        Ok(DataSet::from(vec![Point::new(
            "CPUUtilization",
            utilization,
            Unit::Percent,
        )]))
    }
}

/// Host memory usage.
///
/// Points: `MemoryUtilization` (percent), `MemoryUsed` and `MemoryAvailable` (bytes).
pub struct Memory<F: FileSystem> {
    fs: F,
    meminfo_path: PathBuf,
}

impl<F: FileSystem> Memory<F> {
    pub fn new(fs: F, proc_path: impl AsRef<Path>) -> Self {
        Self {
            fs,
            meminfo_path: proc_path.as_ref().join("meminfo"),
        }
    }
}

impl<F: FileSystem> Metric for Memory<F> {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn sample(&mut self) -> Result<DataSet, MetricError> {
        debug!("gathering memory info");
        let info = read_meminfo(&self.fs, &self.meminfo_path)?;

        let cache = info
            .mem_free
            .saturating_add(info.buffers)
            .saturating_add(info.cached);
        let used = bytes(info.mem_total.saturating_sub(cache));
        let available = bytes(info.mem_available.unwrap_or(cache));
        let total = bytes(info.mem_total);

        Ok(DataSet::from(vec![
            Point::new("MemoryUtilization", percent(used, total), Unit::Percent),
            Point::new("MemoryUsed", used as f64, Unit::Bytes),
            Point::new("MemoryAvailable", available as f64, Unit::Bytes),
        ]))
    }
}

/// Host swap usage.
///
/// Points: `SwapUtilization` (percent), `SwapUsed` and `SwapFree` (bytes).
pub struct Swap<F: FileSystem> {
    fs: F,
    meminfo_path: PathBuf,
}

impl<F: FileSystem> Swap<F> {
    pub fn new(fs: F, proc_path: impl AsRef<Path>) -> Self {
        Self {
            fs,
            meminfo_path: proc_path.as_ref().join("meminfo"),
        }
    }
}

impl<F: FileSystem> Metric for Swap<F> {
    fn name(&self) -> &'static str {
        "swap"
    }

    fn sample(&mut self) -> Result<DataSet, MetricError> {
        debug!("gathering swap info");
        let info = read_meminfo(&self.fs, &self.meminfo_path)?;

        let total = bytes(info.swap_total);
        let free = bytes(info.swap_free);
        let used = total.saturating_sub(free);

        Ok(DataSet::from(vec![
            Point::new("SwapUtilization", percent(used, total), Unit::Percent),
            Point::new("SwapUsed", used as f64, Unit::Bytes),
            Point::new("SwapFree", free as f64, Unit::Bytes),
        ]))
    }
}

/// Usage of one mounted filesystem, [`DISK_ROOT`] by default.
///
/// Points: `DiskUtilization` (percent), `DiskUsed` and `DiskFree` (bytes).
pub struct Disk<F: FileSystem> {
    fs: F,
    mount: PathBuf,
}

impl<F: FileSystem> Disk<F> {
    pub fn new(fs: F, mount: impl Into<PathBuf>) -> Self {
        Self {
            fs,
            mount: mount.into(),
        }
    }
}

impl<F: FileSystem> Metric for Disk<F> {
    fn name(&self) -> &'static str {
        "disk"
    }

    fn sample(&mut self) -> Result<DataSet, MetricError> {
        debug!("gathering disk info");
        let usage = self
            .fs
            .disk_usage(&self.mount)
            .map_err(|source| MetricError::Read {
                what: "disk usage",
                source,
            })?;

        Ok(DataSet::from(vec![
            Point::new("DiskUtilization", usage.used_percent(), Unit::Percent),
            Point::new("DiskUsed", usage.used as f64, Unit::Bytes),
            Point::new("DiskFree", usage.free as f64, Unit::Bytes),
        ]))
    }
}
