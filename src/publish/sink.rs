//! Publish sinks: JSON lines writer and an in-memory recorder.

use std::fs::{File, OpenOptions};
use std::io::{self, Stdout, Write};
use std::path::Path;

use serde::Serialize;

use super::{PublishSink, SinkError, WireDatum};

#[derive(Serialize)]
struct Envelope<'a> {
    namespace: &'a str,
    metric_data: &'a [WireDatum],
}

/// Writes each batch as one JSON object per line.
///
/// ```text
/// {"namespace":"CWMonitor","metric_data":[{"metric_name":"CPUUtilization",...}]}
/// ```
#[derive(Debug)]
pub struct JsonLinesSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl JsonLinesSink<Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl JsonLinesSink<File> {
    /// Opens `path` for appending, creating it if needed.
    pub fn append_to(path: impl AsRef<Path>) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self::new(file))
    }
}

impl<W: Write> PublishSink for JsonLinesSink<W> {
    fn put_metric_data(&mut self, namespace: &str, data: &[WireDatum]) -> Result<(), SinkError> {
        let envelope = Envelope {
            namespace,
            metric_data: data,
        };
        serde_json::to_writer(&mut self.writer, &envelope)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }
}

/// One recorded `put_metric_data` call.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub namespace: String,
    pub data: Vec<WireDatum>,
}

/// Sink that keeps every call in memory, for tests.
///
/// Calls listed with [`RecordingSink::fail_call`] are recorded and then
/// rejected.
#[derive(Debug, Default)]
pub struct RecordingSink {
    calls: Vec<RecordedCall>,
    failing: Vec<usize>,
    fail_all: bool,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the `index`-th call (0-based) fail.
    pub fn fail_call(mut self, index: usize) -> Self {
        self.failing.push(index);
        self
    }

    /// Makes every call fail.
    pub fn fail_always(mut self) -> Self {
        self.fail_all = true;
        self
    }

    pub fn calls(&self) -> &[RecordedCall] {
        &self.calls
    }

    /// Total number of data points received.
    pub fn point_count(&self) -> usize {
        self.calls.iter().map(|c| c.data.len()).sum()
    }
}

impl PublishSink for RecordingSink {
    fn put_metric_data(&mut self, namespace: &str, data: &[WireDatum]) -> Result<(), SinkError> {
        let index = self.calls.len();
        self.calls.push(RecordedCall {
            namespace: namespace.to_string(),
            data: data.to_vec(),
        });
        if self.fail_all || self.failing.contains(&index) {
            return Err(format!("batch {} rejected", index).into());
        }
        Ok(())
    }
}
