//! Collector that samples a list of metrics into one `DataSet`.

use std::time::{Duration, Instant};

use tracing::{debug, error};

use crate::metrics::Metric;
use crate::model::DataSet;

/// Timing information for one `collect` call.
///
/// Used for debugging slow data sources.
#[derive(Debug, Clone, Default)]
pub struct CollectorTiming {
    /// Total collection time.
    pub total: Duration,
    /// Time spent in each metric, in sampling order.
    pub metrics: Vec<(&'static str, Duration)>,
}

/// Samples an ordered list of metrics.
///
/// A failing metric is logged and skipped; the points of the others are
/// concatenated in metric order.
pub struct Collector {
    metrics: Vec<Box<dyn Metric + Send>>,
    /// Timing information from the last collect call.
    last_timing: Option<CollectorTiming>,
}

impl Collector {
    pub fn new(metrics: Vec<Box<dyn Metric + Send>>) -> Self {
        Self {
            metrics,
            last_timing: None,
        }
    }

    /// Names of the metrics in sampling order.
    pub fn metric_names(&self) -> Vec<&'static str> {
        self.metrics.iter().map(|m| m.name()).collect()
    }

    /// Samples every metric once. Never fails.
    pub fn collect(&mut self) -> DataSet {
        let start = Instant::now();
        let mut timing = CollectorTiming::default();
        let mut data = DataSet::new();

        for metric in &mut self.metrics {
            let metric_start = Instant::now();
            match metric.sample() {
                Ok(points) => {
                    debug!("metric [{}] produced {} data points", metric.name(), points.len());
                    data.append(points);
                }
                Err(e) => error!("failed to gather data from metric [{}]: {}", metric.name(), e),
            }
            timing.metrics.push((metric.name(), metric_start.elapsed()));
        }

        timing.total = start.elapsed();
        self.last_timing = Some(timing);
        data
    }

    /// Returns timing information from the last collect call.
    pub fn last_timing(&self) -> Option<&CollectorTiming> {
        self.last_timing.as_ref()
    }
}
