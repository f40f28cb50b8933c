//! Batching and publishing of collected data.
//!
//! [`publish`] splits a [`DataSet`] into batches, converts each to
//! [`WireDatum`]s and hands it to a [`PublishSink`]. Every batch gets one
//! attempt; failures are collected and reported together.

mod sink;
mod wire;

use std::error::Error;

use tracing::{debug, warn};

use crate::model::DataSet;
use crate::util::MultiError;

pub use sink::{JsonLinesSink, RecordedCall, RecordingSink};
pub use wire::{WireDatum, WireDimension, WireError};

/// Maximum number of data points sent in one call.
pub const BATCH_SIZE: usize = 20;

/// Error returned by a sink for one batch.
pub type SinkError = Box<dyn Error + Send + Sync>;

/// Destination of published batches.
pub trait PublishSink {
    /// Sends one batch of data points under `namespace`.
    fn put_metric_data(&mut self, namespace: &str, data: &[WireDatum]) -> Result<(), SinkError>;
}

impl<S: PublishSink + ?Sized> PublishSink for &mut S {
    fn put_metric_data(&mut self, namespace: &str, data: &[WireDatum]) -> Result<(), SinkError> {
        (**self).put_metric_data(namespace, data)
    }
}

impl<S: PublishSink + ?Sized> PublishSink for Box<S> {
    fn put_metric_data(&mut self, namespace: &str, data: &[WireDatum]) -> Result<(), SinkError> {
        (**self).put_metric_data(namespace, data)
    }
}

/// Every batch that failed to publish, in batch order.
#[derive(Debug, thiserror::Error)]
#[error("failed to put metric data: {0}")]
pub struct PublishError(pub MultiError<SinkError>);

impl PublishError {
    pub fn errors(&self) -> &[SinkError] {
        self.0.errors()
    }
}

/// Publishes `data` in batches of at most `batch_size` points.
///
/// A `batch_size` of zero is treated as one. Empty data makes no sink call.
pub fn publish<S: PublishSink + ?Sized>(
    data: &DataSet,
    batch_size: usize,
    namespace: &str,
    sink: &mut S,
) -> Result<(), PublishError> {
    let mut errors = MultiError::new();

    for (index, batch) in data.batches(batch_size).enumerate() {
        let wire: Vec<WireDatum> = batch.iter().map(WireDatum::from).collect();
        debug!("publishing batch {} with {} data points", index, wire.len());
        if let Err(e) = sink.put_metric_data(namespace, &wire) {
            warn!("batch {} was rejected: {}", index, e);
            errors.push(e);
        }
    }

    errors.into_result().map_err(PublishError)
}
