//! Pre-built mock scenarios for testing.
//!
//! These scenarios provide realistic host and container runtime states.

use super::filesystem::MockFs;
use super::runtime::MockRuntime;
use crate::collector::docker::{ContainerDetails, ContainerSummary, StatsSnapshot};
use crate::collector::traits::DiskUsage;

impl MockFs {
    /// Creates a typical host with memory, swap, CPU counters and a root mount.
    pub fn typical_host() -> Self {
        let fs = Self::new();

        fs.add_file(
            "/proc/meminfo",
            "\
MemTotal:       16384000 kB
MemFree:         8192000 kB
MemAvailable:   12000000 kB
Buffers:          512000 kB
Cached:          2048000 kB
SwapCached:            0 kB
Active:          4096000 kB
Inactive:        2048000 kB
SwapTotal:       4096000 kB
SwapFree:        3072000 kB
Dirty:              1024 kB
Writeback:             0 kB
",
        );
        fs.add_file(
            "/proc/stat",
            "\
cpu  10000 500 3000 80000 1000 200 100 0 0 0
cpu0 2500 125 750 20000 250 50 25 0 0 0
cpu1 2500 125 750 20000 250 50 25 0 0 0
cpu2 2500 125 750 20000 250 50 25 0 0 0
cpu3 2500 125 750 20000 250 50 25 0 0 0
intr 1000000 50 0 0 0 0 0 0 0 1 0 0 0 100 0 0 1000
ctxt 500000
btime 1700000000
processes 10000
procs_running 2
procs_blocked 0
",
        );
        fs.add_mount(
            "/",
            DiskUsage {
                total: 100 * 1024 * 1024 * 1024,
                free: 60 * 1024 * 1024 * 1024,
                used: 40 * 1024 * 1024 * 1024,
            },
        );

        fs
    }
}

impl MockRuntime {
    /// Two running containers: a healthy web server and a worker without
    /// a health check.
    pub fn two_containers() -> Self {
        let web = serde_json::json!({
            "Id": "3f4e8b2a91c7",
            "Names": ["/web"],
            "Labels": {"com.example.service": "frontend"}
        });
        let worker = serde_json::json!({
            "Id": "8a1d0c6e5b24",
            "Names": ["/worker"],
            "Labels": {}
        });

        let runtime = Self::new();
        runtime.add_container(
            summary(web),
            stats(serde_json::json!({
                "cpu_stats": {
                    "cpu_usage": {"total_usage": 400, "percpu_usage": [100, 100, 100, 100]},
                    "system_cpu_usage": 1000,
                    "online_cpus": 4
                },
                "memory_stats": {"usage": 52428800}
            })),
            details(serde_json::json!({"State": {"Health": {"Status": "healthy"}}})),
        );
        runtime.add_container(
            summary(worker),
            stats(serde_json::json!({
                "cpu_stats": {
                    "cpu_usage": {"total_usage": 50},
                    "system_cpu_usage": 1000,
                    "online_cpus": 2
                },
                "memory_stats": {"usage": 1048576}
            })),
            details(serde_json::json!({"State": {"Status": "running"}})),
        );
        runtime
    }
}

fn summary(value: serde_json::Value) -> ContainerSummary {
    serde_json::from_value(value).expect("valid fixture")
}

fn stats(value: serde_json::Value) -> StatsSnapshot {
    serde_json::from_value(value).expect("valid fixture")
}

fn details(value: serde_json::Value) -> ContainerDetails {
    serde_json::from_value(value).expect("valid fixture")
}
