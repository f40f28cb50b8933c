//! Metric contract and its implementations.
//!
//! Every metric reads one data source per [`Metric::sample`] call and turns
//! the reading into zero or more [`Point`](crate::model::Point)s:
//!
//! | name            | type                | source                          |
//! |-----------------|---------------------|---------------------------------|
//! | `cpu`           | [`Cpu`]             | `/proc/stat`                    |
//! | `memory`        | [`Memory`]          | `/proc/meminfo`                 |
//! | `swap`          | [`Swap`]            | `/proc/meminfo`                 |
//! | `disk`          | [`Disk`]            | `statvfs("/")`                  |
//! | `docker-stats`  | [`ContainerStats`]  | container runtime stats         |
//! | `docker-health` | [`ContainerHealth`] | container runtime inspect       |
//!
//! The [`Registry`] maps these names to constructors and is used to select
//! the metrics requested by the configuration.

mod container;
mod host;
mod registry;

use std::io;

use crate::collector::docker::RuntimeError;
use crate::collector::procfs::ParseError;
use crate::model::DataSet;

pub use container::{CONTAINER_DIMENSION, ContainerHealth, ContainerStats, container_dimension};
pub use host::{Cpu, DISK_ROOT, Disk, Memory, Swap};
pub use registry::{Registry, select_metrics};

/// Error returned by a failed [`Metric::sample`].
#[derive(Debug, thiserror::Error)]
pub enum MetricError {
    #[error("unable to read {what}: {source}")]
    Read {
        what: &'static str,
        #[source]
        source: io::Error,
    },
    #[error("unable to parse {what}: {source}")]
    Parse {
        what: &'static str,
        #[source]
        source: ParseError,
    },
    #[error("unable to create container runtime client: {0}")]
    Connect(#[source] RuntimeError),
    #[error("unable to list containers: {0}")]
    ListContainers(#[source] RuntimeError),
}

/// A source of data points.
pub trait Metric {
    /// Stable identifier used for selection and diagnostics.
    fn name(&self) -> &'static str;

    /// Performs one read of the underlying source.
    fn sample(&mut self) -> Result<DataSet, MetricError>;
}
