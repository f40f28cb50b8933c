//! cwmonitor - host and container metrics agent library.
//!
//! Metrics ([`metrics`]) read their data sources ([`collector`]) into
//! [`model::DataSet`]s; the monitoring loop ([`monitor`]) collects them on an
//! interval, tags every point with the host and hands the result to a
//! [`publish::PublishSink`] in batches.
//!
//! ```
//! use cwmonitor::collector::MockFs;
//! use cwmonitor::metrics::{Memory, Registry};
//! use cwmonitor::monitor::{self, Config, Shutdown};
//! use cwmonitor::publish::RecordingSink;
//!
//! let mut registry = Registry::new();
//! registry.register("memory", || Box::new(Memory::new(MockFs::typical_host(), "/proc")));
//!
//! let config = Config {
//!     host_id: "i-0abc".into(),
//!     metrics: "memory".into(),
//!     once: true,
//!     ..Config::default()
//! };
//! let mut sink = RecordingSink::new();
//! monitor::run(&config, &registry, &mut sink, &Shutdown::new()).unwrap();
//! assert_eq!(sink.point_count(), 3);
//! ```

pub mod collector;
pub mod logging;
pub mod metrics;
pub mod model;
pub mod monitor;
pub mod publish;
pub mod util;
