//! Per-container metrics read from the container runtime.

use tracing::{debug, warn};

use super::{Metric, MetricError};
use crate::collector::docker::{ContainerRuntime, ContainerSummary, LazyRuntime};
use crate::model::{DataSet, Dimension, Point, Unit};

/// Name of the dimension identifying a container.
pub const CONTAINER_DIMENSION: &str = "Container";

/// Builds the dimension that identifies `container` in its points.
///
/// The value of `label` wins when the container carries it; otherwise the
/// first container name with surrounding `/` trimmed, otherwise the ID.
pub fn container_dimension(container: &ContainerSummary, label: Option<&str>) -> Dimension {
    let value = label
        .and_then(|key| container.label(key))
        .or_else(|| {
            container
                .first_name()
                .map(|n| n.trim_matches('/'))
                .filter(|n| !n.is_empty())
        })
        .unwrap_or(container.id.as_str());
    Dimension::fixed(CONTAINER_DIMENSION, value)
}

fn list<R: ContainerRuntime>(
    runtime: &mut LazyRuntime<R>,
) -> Result<(&R, Vec<ContainerSummary>), MetricError> {
    let client = runtime.get().map_err(MetricError::Connect)?;
    let containers = client
        .list_containers()
        .map_err(MetricError::ListContainers)?;
    Ok((client, containers))
}

/// CPU and memory usage of every running container.
pub struct ContainerStats<R: ContainerRuntime> {
    runtime: LazyRuntime<R>,
    label: Option<String>,
}

impl<R: ContainerRuntime> ContainerStats<R> {
    pub fn new(runtime: LazyRuntime<R>, label: Option<String>) -> Self {
        Self { runtime, label }
    }
}

impl<R: ContainerRuntime> Metric for ContainerStats<R> {
    fn name(&self) -> &'static str {
        "docker-stats"
    }

    fn sample(&mut self) -> Result<DataSet, MetricError> {
        debug!("gathering docker stats");
        let (client, containers) = list(&mut self.runtime)?;

        let mut data = DataSet::new();
        for container in &containers {
            let stats = match client.stats(&container.id) {
                Ok(stats) => stats,
                Err(e) => {
                    warn!("unable to get stats of container [{}]: {}", container.id, e);
                    continue;
                }
            };
            let dimension = container_dimension(container, self.label.as_deref());
            data.push(
                Point::new("CPUUtilization", stats.cpu_utilization(), Unit::Percent)
                    .with_dimensions(std::slice::from_ref(&dimension)),
            );
            data.push(
                Point::new(
                    "MemoryUtilization",
                    stats.memory_stats.usage as f64,
                    Unit::Bytes,
                )
                .with_dimensions(&[dimension]),
            );
        }
        Ok(data)
    }
}

/// Health check status of every running container: 1 when healthy, else 0.
pub struct ContainerHealth<R: ContainerRuntime> {
    runtime: LazyRuntime<R>,
    label: Option<String>,
}

impl<R: ContainerRuntime> ContainerHealth<R> {
    pub fn new(runtime: LazyRuntime<R>, label: Option<String>) -> Self {
        Self { runtime, label }
    }
}

impl<R: ContainerRuntime> Metric for ContainerHealth<R> {
    fn name(&self) -> &'static str {
        "docker-health"
    }

    fn sample(&mut self) -> Result<DataSet, MetricError> {
        debug!("gathering docker health");
        let (client, containers) = list(&mut self.runtime)?;

        let mut data = DataSet::new();
        for container in &containers {
            let details = match client.inspect(&container.id) {
                Ok(details) => details,
                Err(e) => {
                    warn!("unable to inspect container [{}]: {}", container.id, e);
                    continue;
                }
            };
            let value = if details.is_healthy() { 1.0 } else { 0.0 };
            data.push(
                Point::new("Health", value, Unit::Count)
                    .with_dimensions(&[container_dimension(container, self.label.as_deref())]),
            );
        }
        Ok(data)
    }
}
