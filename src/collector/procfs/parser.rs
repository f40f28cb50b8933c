//! Parsers for `/proc` filesystem files.
//!
//! These are pure functions that parse the content of various `/proc` files
//! into structured data. They are designed to be easily testable with string inputs.

/// Error type for parsing failures.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("parse error: {message}")]
pub struct ParseError {
    pub message: String,
}

impl ParseError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
        }
    }
}

/// Parsed data from `/proc/meminfo`, in kilobytes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemInfo {
    pub mem_total: u64,
    pub mem_free: u64,
    /// `None` on kernels older than 3.14, which do not report it.
    pub mem_available: Option<u64>,
    pub buffers: u64,
    pub cached: u64,
    pub swap_total: u64,
    pub swap_free: u64,
}

/// Parses `/proc/meminfo` content.
///
/// Fails if `MemTotal` is missing, since every other figure is relative to it.
pub fn parse_meminfo(content: &str) -> Result<MemInfo, ParseError> {
    let mut info = MemInfo::default();
    let mut has_total = false;

    let parse_kb = |line: &str| -> u64 {
        line.split_whitespace()
            .nth(1)
            .and_then(|s| s.parse().ok())
            .unwrap_or(0)
    };

    for line in content.lines() {
        if line.starts_with("MemTotal:") {
            info.mem_total = parse_kb(line);
            has_total = true;
        } else if line.starts_with("MemFree:") {
            info.mem_free = parse_kb(line);
        } else if line.starts_with("MemAvailable:") {
            info.mem_available = Some(parse_kb(line));
        } else if line.starts_with("Buffers:") {
            info.buffers = parse_kb(line);
        } else if line.starts_with("Cached:") {
            info.cached = parse_kb(line);
        } else if line.starts_with("SwapTotal:") {
            info.swap_total = parse_kb(line);
        } else if line.starts_with("SwapFree:") {
            info.swap_free = parse_kb(line);
        }
    }

    if !has_total {
        return Err(ParseError::new("missing MemTotal in meminfo"));
    }

    Ok(info)
}

/// Cumulative CPU time counters, in clock ticks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CpuTimes {
    pub user: u64,
    pub nice: u64,
    pub system: u64,
    pub idle: u64,
    pub iowait: u64,
    pub irq: u64,
    pub softirq: u64,
    pub steal: u64,
}

impl CpuTimes {
    pub fn total(&self) -> u64 {
        [
            self.nice,
            self.system,
            self.idle,
            self.iowait,
            self.irq,
            self.softirq,
            self.steal,
        ]
        .into_iter()
        .fold(self.user, u64::saturating_add)
    }

    /// Time spent neither idle nor waiting on I/O.
    pub fn busy(&self) -> u64 {
        self.total()
            .saturating_sub(self.idle)
            .saturating_sub(self.iowait)
    }
}

/// Parses the aggregate `cpu` line of `/proc/stat`.
///
/// Guest time is already accounted in `user`/`nice` and is left out.
pub fn parse_cpu_times(content: &str) -> Result<CpuTimes, ParseError> {
    let line = content
        .lines()
        .find(|line| line.split_whitespace().next() == Some("cpu"))
        .ok_or_else(|| ParseError::new("missing aggregate cpu line in stat"))?;

    let fields: Vec<u64> = line
        .split_whitespace()
        .skip(1)
        .map(|s| s.parse())
        .collect::<Result<_, _>>()
        .map_err(|_| ParseError::new("invalid counter in cpu line"))?;

    if fields.len() < 4 {
        return Err(ParseError::new(format!(
            "not enough fields in cpu line: expected 4+, got {}",
            fields.len()
        )));
    }

    let get = |idx: usize| fields.get(idx).copied().unwrap_or(0);

    Ok(CpuTimes {
        user: get(0),
        nice: get(1),
        system: get(2),
        idle: get(3),
        iowait: get(4),
        irq: get(5),
        softirq: get(6),
        steal: get(7),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const MEMINFO: &str = "\
MemTotal:       16384000 kB
MemFree:         8192000 kB
MemAvailable:   12000000 kB
Buffers:          512000 kB
Cached:          2048000 kB
SwapCached:         1000 kB
SwapTotal:       4096000 kB
SwapFree:        3072000 kB
";

    #[test]
    fn test_parse_meminfo() {
        let info = parse_meminfo(MEMINFO).unwrap();
        assert_eq!(info.mem_total, 16_384_000);
        assert_eq!(info.mem_free, 8_192_000);
        assert_eq!(info.mem_available, Some(12_000_000));
        assert_eq!(info.buffers, 512_000);
        assert_eq!(info.cached, 2_048_000);
        assert_eq!(info.swap_total, 4_096_000);
        assert_eq!(info.swap_free, 3_072_000);
    }

    #[test]
    fn test_parse_meminfo_without_available() {
        let info = parse_meminfo("MemTotal: 1000 kB\nMemFree: 500 kB\n").unwrap();
        assert_eq!(info.mem_available, None);
    }

    #[test]
    fn test_parse_meminfo_missing_total() {
        let err = parse_meminfo("MemFree: 500 kB\n").unwrap_err();
        assert!(err.message.contains("MemTotal"));
    }

    #[test]
    fn test_parse_cpu_times() {
        let content = "\
cpu  10000 500 3000 80000 1000 200 100 50 0 0
cpu0 2500 125 750 20000 250 50 25 0 0 0
ctxt 500000
";
        let times = parse_cpu_times(content).unwrap();
        assert_eq!(times.user, 10_000);
        assert_eq!(times.idle, 80_000);
        assert_eq!(times.steal, 50);
        assert_eq!(times.total(), 94_850);
        assert_eq!(times.busy(), 13_850);
    }

    #[test]
    fn test_parse_cpu_times_short_line() {
        let times = parse_cpu_times("cpu 1 2 3 4\n").unwrap();
        assert_eq!(times.iowait, 0);
        assert_eq!(times.total(), 10);
    }

    #[test]
    fn test_parse_cpu_times_ignores_per_cpu_lines() {
        let result = parse_cpu_times("cpu0 1 2 3 4\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_cpu_totals_saturate() {
        let max = u64::MAX.to_string();
        let line = format!("cpu {max} {max} 1 {max} {max} 0 0 0\n");
        let times = parse_cpu_times(&line).unwrap();
        assert_eq!(times.total(), u64::MAX);
        assert_eq!(times.busy(), 0);
    }

    #[test]
    fn test_parse_cpu_times_invalid_counter() {
        let result = parse_cpu_times("cpu 1 2 x 4\n");
        assert!(result.is_err());
    }
}
