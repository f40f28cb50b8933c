//! Monitoring configuration and its validation.

use std::path::PathBuf;
use std::time::Duration;

use crate::model::Dimension;
use crate::publish::BATCH_SIZE;
use crate::util::MultiError;

/// Default namespace data points are published under.
pub const DEFAULT_NAMESPACE: &str = "CWMonitor";
/// Metrics sampled when none are configured explicitly.
pub const DEFAULT_METRICS: &str = "cpu,memory";

/// A single configuration problem.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("namespace cannot be empty")]
    EmptyNamespace,
    #[error("interval cannot be zero")]
    ZeroInterval,
    #[error("hostid cannot be empty")]
    EmptyHostId,
    #[error("metrics cannot be empty")]
    EmptyMetrics,
    #[error("batch size cannot be zero")]
    ZeroBatchSize,
}

/// Settings of one monitoring run.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Namespace the data points are published under.
    pub namespace: String,
    /// Time between two collection cycles.
    pub interval: Duration,
    /// Value of the `Host` dimension added to every point.
    pub host_id: String,
    /// Comma separated metric names.
    pub metrics: String,
    /// Run a single cycle and return.
    pub once: bool,
    /// Container label whose value names containers in their dimension.
    pub docker_label: Option<String>,
    /// Maximum number of points per publish call.
    pub batch_size: usize,
    /// Base path of the proc filesystem.
    pub proc_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            interval: Duration::from_secs(60),
            host_id: String::new(),
            metrics: DEFAULT_METRICS.to_string(),
            once: false,
            docker_label: None,
            batch_size: BATCH_SIZE,
            proc_path: PathBuf::from("/proc"),
        }
    }
}

impl Config {
    /// Checks every setting and reports all problems at once.
    pub fn validate(&self) -> Result<(), MultiError<ConfigError>> {
        let mut errors = MultiError::new();

        if self.namespace.trim().is_empty() {
            errors.push(ConfigError::EmptyNamespace);
        }
        if self.interval.is_zero() {
            errors.push(ConfigError::ZeroInterval);
        }
        if self.host_id.trim().is_empty() {
            errors.push(ConfigError::EmptyHostId);
        }
        if self.metrics.trim().is_empty() {
            errors.push(ConfigError::EmptyMetrics);
        }
        if self.batch_size == 0 {
            errors.push(ConfigError::ZeroBatchSize);
        }

        errors.into_result()
    }

    /// Dimensions appended to every collected point.
    pub fn extra_dimensions(&self) -> Vec<Dimension> {
        vec![Dimension::fixed("Host", self.host_id.clone())]
    }

    /// Human readable summary, one setting per line.
    pub fn summary_lines(&self) -> Vec<String> {
        vec![
            format!("namespace: {}", self.namespace),
            format!("interval: {}", format_interval(self.interval)),
            format!("hostid: {}", self.host_id),
            format!("metrics: {}", self.metrics),
            format!("once: {}", self.once),
            format!("docker label: {}", self.docker_label.as_deref().unwrap_or("-")),
            format!("batch size: {}", self.batch_size),
            format!("proc path: {}", self.proc_path.display()),
        ]
    }
}

/// Formats an interval as whole minutes or seconds when possible.
fn format_interval(interval: Duration) -> String {
    let secs = interval.as_secs();
    if interval.subsec_nanos() != 0 || secs == 0 {
        format!("{:?}", interval)
    } else if secs.is_multiple_of(60) {
        format!("{}m", secs / 60)
    } else {
        format!("{}s", secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> Config {
        Config {
            host_id: "i-0123456789".into(),
            ..Config::default()
        }
    }

    #[test]
    fn test_valid_config() {
        assert!(valid().validate().is_ok());
    }

    #[test]
    fn test_default_requires_host_id() {
        let errors = Config::default().validate().unwrap_err();
        assert_eq!(errors.errors(), &[ConfigError::EmptyHostId]);
    }

    #[test]
    fn test_all_violations_reported() {
        let config = Config {
            namespace: "".into(),
            interval: Duration::ZERO,
            host_id: " ".into(),
            metrics: "".into(),
            batch_size: 0,
            ..Config::default()
        };
        let errors = config.validate().unwrap_err();
        assert_eq!(
            errors.errors(),
            &[
                ConfigError::EmptyNamespace,
                ConfigError::ZeroInterval,
                ConfigError::EmptyHostId,
                ConfigError::EmptyMetrics,
                ConfigError::ZeroBatchSize,
            ]
        );
        assert!(errors.to_string().starts_with("5 errors occurred:\n"));
        assert!(errors.to_string().contains("\t* hostid cannot be empty\n"));
    }

    #[test]
    fn test_extra_dimensions() {
        let dims = valid().extra_dimensions();
        assert_eq!(dims.len(), 1);
        assert_eq!(dims[0].name(), "Host");
        assert_eq!(dims[0].value(), "i-0123456789");
    }

    #[test]
    fn test_summary_lines() {
        let config = Config {
            docker_label: Some("com.example.service".into()),
            ..valid()
        };
        let lines = config.summary_lines();
        assert!(lines.contains(&"interval: 1m".to_string()));
        assert!(lines.contains(&"docker label: com.example.service".to_string()));
        assert!(lines.contains(&"metrics: cpu,memory".to_string()));
    }

    #[test]
    fn test_format_interval() {
        assert_eq!(format_interval(Duration::from_secs(300)), "5m");
        assert_eq!(format_interval(Duration::from_secs(90)), "90s");
        assert_eq!(format_interval(Duration::from_millis(250)), "250ms");
    }
}
