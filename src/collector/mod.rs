//! Data sources for the metrics.
//!
//! Host metrics read the Linux `/proc` filesystem and mount points through
//! the [`FileSystem`] trait; container metrics talk to the container runtime
//! through the [`ContainerRuntime`](docker::ContainerRuntime) trait. Both
//! have in-memory implementations in [`mock`] for testing.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                         Collector                           │
//! │         Vec<Box<dyn Metric>>, sampled in order              │
//! │  ┌─────────────────────┐   ┌─────────────────────────────┐  │
//! │  │    host metrics     │   │     container metrics       │  │
//! │  │  - /proc/stat       │   │  - GET /containers/json     │  │
//! │  │  - /proc/meminfo    │   │  - GET /containers/*/stats  │  │
//! │  │  - statvfs("/")     │   │  - GET /containers/*/json   │  │
//! │  └──────────┬──────────┘   └──────────────┬──────────────┘  │
//! │      ┌──────▼──────┐           ┌──────────▼───────┐         │
//! │      │  FileSystem │ (trait)   │ ContainerRuntime │ (trait) │
//! │      └──────┬──────┘           └──────────┬───────┘         │
//! └─────────────┼─────────────────────────────┼─────────────────┘
//!        ┌──────┴──────┐              ┌───────┴───────┐
//!  ┌─────▼────┐ ┌──────▼───┐   ┌──────▼──────┐ ┌──────▼──────┐
//!  │  RealFs  │ │  MockFs  │   │ DockerClient│ │ MockRuntime │
//!  └──────────┘ └──────────┘   └─────────────┘ └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```
//! use cwmonitor::collector::{Collector, MockFs};
//! use cwmonitor::metrics::{Memory, Metric};
//!
//! let memory: Box<dyn Metric + Send> = Box::new(Memory::new(MockFs::typical_host(), "/proc"));
//! let mut collector = Collector::new(vec![memory]);
//! let data = collector.collect();
//! assert_eq!(data.len(), 3);
//! ```

#[allow(clippy::module_inception)]
mod collector;
pub mod docker;
pub mod mock;
pub mod procfs;
pub mod traits;

pub use collector::{Collector, CollectorTiming};
pub use docker::{ContainerRuntime, DockerClient, LazyRuntime, RuntimeError};
pub use mock::{MockFs, MockRuntime};
pub use traits::{DiskUsage, FileSystem, RealFs};
