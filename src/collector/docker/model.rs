//! Subset of the Docker Engine API responses used by the container metrics.
//!
//! Counters the engine leaves out, or reports as `null`, decode to zero.

use std::collections::HashMap;

use serde::{Deserialize, Deserializer};

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Entry of `GET /containers/json`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ContainerSummary {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default)]
    pub names: Option<Vec<String>>,
    #[serde(default)]
    pub labels: Option<HashMap<String, String>>,
}

impl ContainerSummary {
    pub fn label(&self, key: &str) -> Option<&str> {
        self.labels.as_ref()?.get(key).map(String::as_str)
    }

    pub fn first_name(&self) -> Option<&str> {
        self.names.as_ref()?.first().map(String::as_str)
    }
}

/// Body of `GET /containers/{id}/stats?stream=false`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct StatsSnapshot {
    #[serde(default)]
    pub cpu_stats: CpuStats,
    #[serde(default)]
    pub memory_stats: MemoryStats,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CpuStats {
    #[serde(default)]
    pub cpu_usage: CpuUsage,
    #[serde(default, deserialize_with = "null_as_default")]
    pub system_cpu_usage: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub online_cpus: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CpuUsage {
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_usage: u64,
    /// Not reported on cgroup v2 hosts.
    #[serde(default)]
    pub percpu_usage: Option<Vec<u64>>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MemoryStats {
    #[serde(default, deserialize_with = "null_as_default")]
    pub usage: u64,
}

impl StatsSnapshot {
    /// Number of cores the counters are spread over.
    pub fn core_count(&self) -> u32 {
        match &self.cpu_stats.cpu_usage.percpu_usage {
            Some(per_cpu) if !per_cpu.is_empty() => per_cpu.len() as u32,
            _ => self.cpu_stats.online_cpus,
        }
    }

    /// CPU usage from the cumulative counters of this single snapshot.
    ///
    /// `total_usage / system_cpu_usage * cores`. Zero when the system counter is zero.
    pub fn cpu_utilization(&self) -> f64 {
        let system = self.cpu_stats.system_cpu_usage;
        if system == 0 {
            return 0.0;
        }
        self.cpu_stats.cpu_usage.total_usage as f64 / system as f64 * self.core_count() as f64
    }
}

/// Body of `GET /containers/{id}/json`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ContainerDetails {
    #[serde(rename = "State", default)]
    pub state: Option<ContainerState>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ContainerState {
    #[serde(rename = "Health", default)]
    pub health: Option<Health>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Health {
    #[serde(rename = "Status", default, deserialize_with = "null_as_default")]
    pub status: String,
}

impl ContainerDetails {
    /// True only when a health check exists and reports "healthy".
    pub fn is_healthy(&self) -> bool {
        self.state
            .as_ref()
            .and_then(|state| state.health.as_ref())
            .is_some_and(|health| health.status.eq_ignore_ascii_case("healthy"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_with_null_fields() {
        let summary: ContainerSummary =
            serde_json::from_str(r#"{"Id": "abc", "Names": null, "Labels": null, "Image": "x"}"#)
                .unwrap();
        assert_eq!(summary.id, "abc");
        assert_eq!(summary.first_name(), None);
        assert_eq!(summary.label("any"), None);
    }

    #[test]
    fn test_cpu_utilization_uses_percpu_length() {
        let stats: StatsSnapshot = serde_json::from_str(
            r#"{"cpu_stats": {"cpu_usage": {"total_usage": 200, "percpu_usage": [1, 2]},
                "system_cpu_usage": 1000, "online_cpus": 8}}"#,
        )
        .unwrap();
        assert_eq!(stats.core_count(), 2);
        assert!((stats.cpu_utilization() - 0.4).abs() < 1e-9);
    }

    #[test]
    fn test_cpu_utilization_falls_back_to_online_cpus() {
        let stats: StatsSnapshot = serde_json::from_str(
            r#"{"cpu_stats": {"cpu_usage": {"total_usage": 250},
                "system_cpu_usage": 1000, "online_cpus": 4}}"#,
        )
        .unwrap();
        assert_eq!(stats.core_count(), 4);
        assert!((stats.cpu_utilization() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_null_counters_decode_to_zero() {
        let stats: StatsSnapshot = serde_json::from_str(
            r#"{"cpu_stats": {"cpu_usage": {"total_usage": 10, "percpu_usage": null},
                "system_cpu_usage": null, "online_cpus": null},
                "memory_stats": {"usage": null, "limit": null}}"#,
        )
        .unwrap();
        assert_eq!(stats.cpu_stats.cpu_usage.total_usage, 10);
        assert_eq!(stats.cpu_stats.system_cpu_usage, 0);
        assert_eq!(stats.core_count(), 0);
        assert_eq!(stats.memory_stats.usage, 0);
        assert_eq!(stats.cpu_utilization(), 0.0);
    }

    #[test]
    fn test_cpu_utilization_without_system_usage() {
        let stats = StatsSnapshot::default();
        assert_eq!(stats.cpu_utilization(), 0.0);
    }

    #[test]
    fn test_health_status() {
        let parse = |s: &str| serde_json::from_str::<ContainerDetails>(s).unwrap();

        assert!(parse(r#"{"State": {"Health": {"Status": "healthy"}}}"#).is_healthy());
        assert!(parse(r#"{"State": {"Health": {"Status": "HEALTHY"}}}"#).is_healthy());
        assert!(!parse(r#"{"State": {"Health": {"Status": "unhealthy"}}}"#).is_healthy());
        assert!(!parse(r#"{"State": {"Health": {"Status": "starting"}}}"#).is_healthy());
        assert!(!parse(r#"{"State": {"Status": "running"}}"#).is_healthy());
        assert!(!parse(r#"{"State": null}"#).is_healthy());
        assert!(!parse(r#"{}"#).is_healthy());
    }
}
