//! Monitoring loop.
//!
//! [`run`] validates a [`Config`], samples the selected metrics once right
//! away and then once per interval on a background thread, publishing each
//! cycle's data, until the [`Shutdown`] handle is triggered.

mod config;
mod scheduler;
mod shutdown;

use std::io;

use crate::publish::PublishError;
use crate::util::MultiError;

pub use config::{Config, ConfigError, DEFAULT_METRICS, DEFAULT_NAMESPACE};
pub use scheduler::{run, run_cycle};
pub use shutdown::Shutdown;

/// Error returned by [`run`].
#[derive(Debug, thiserror::Error)]
pub enum MonitorError {
    #[error("invalid inputs: {0}")]
    InvalidConfig(MultiError<ConfigError>),
    #[error(transparent)]
    Publish(#[from] PublishError),
    #[error("failed to start ticker thread: {0}")]
    Spawn(#[source] io::Error),
    #[error("ticker thread panicked")]
    Panicked,
}
