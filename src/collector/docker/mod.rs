//! Container runtime access.
//!
//! The [`ContainerRuntime`] trait is what the container metrics need from a
//! runtime: list running containers, read one stats snapshot, inspect one
//! container. [`DockerClient`] implements it against the Docker Engine API
//! through `bollard`.

mod client;
mod model;

use std::fmt;
use std::io;

pub use client::{DEFAULT_SOCKET, DockerClient};
pub use model::{
    ContainerDetails, ContainerState, ContainerSummary, CpuStats, CpuUsage, Health, MemoryStats,
    StatsSnapshot,
};

/// Error talking to the container runtime.
#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    #[error("unsupported docker host: {0}")]
    UnsupportedHost(String),
    #[error("cannot start client runtime: {0}")]
    Io(#[source] io::Error),
    #[error("runtime returned status {status}: {message}")]
    Status { status: u16, message: String },
    #[error("docker engine error: {0}")]
    Engine(#[source] bollard::errors::Error),
    #[error("no stats returned for container {0}")]
    MissingStats(String),
    #[error("cannot decode response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("runtime is not connected")]
    NotConnected,
}

impl From<bollard::errors::Error> for RuntimeError {
    fn from(e: bollard::errors::Error) -> Self {
        match e {
            bollard::errors::Error::DockerResponseServerError {
                status_code,
                message,
            } => RuntimeError::Status {
                status: status_code,
                message,
            },
            other => RuntimeError::Engine(other),
        }
    }
}

/// Operations the container metrics need from a runtime.
pub trait ContainerRuntime: Send {
    /// Lists running containers.
    fn list_containers(&self) -> Result<Vec<ContainerSummary>, RuntimeError>;

    /// Reads one non-streaming stats snapshot.
    fn stats(&self, id: &str) -> Result<StatsSnapshot, RuntimeError>;

    /// Returns low-level details of one container.
    fn inspect(&self, id: &str) -> Result<ContainerDetails, RuntimeError>;
}

type Connect<R> = Box<dyn FnMut() -> Result<R, RuntimeError> + Send>;

/// Runtime handle created on first use and reused afterwards.
///
/// Metrics are sampled sequentially, so no synchronization is needed here.
pub struct LazyRuntime<R> {
    connect: Connect<R>,
    handle: Option<R>,
}

impl<R: ContainerRuntime> LazyRuntime<R> {
    /// Defers creation of the runtime to the first [`LazyRuntime::get`].
    pub fn new<F>(connect: F) -> Self
    where
        F: FnMut() -> Result<R, RuntimeError> + Send + 'static,
    {
        Self {
            connect: Box::new(connect),
            handle: None,
        }
    }

    /// Wraps an already created runtime.
    pub fn ready(runtime: R) -> Self {
        Self {
            connect: Box::new(|| Err(RuntimeError::NotConnected)),
            handle: Some(runtime),
        }
    }

    /// Returns the runtime, creating it if this is the first successful call.
    pub fn get(&mut self) -> Result<&R, RuntimeError> {
        let runtime = match self.handle.take() {
            Some(runtime) => runtime,
            None => (self.connect)()?,
        };
        Ok(self.handle.insert(runtime))
    }

    pub fn is_initialized(&self) -> bool {
        self.handle.is_some()
    }
}

impl LazyRuntime<DockerClient> {
    /// Docker client configured from the environment on first use.
    pub fn docker() -> Self {
        Self::new(DockerClient::from_env)
    }
}

impl<R> fmt::Debug for LazyRuntime<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LazyRuntime")
            .field("initialized", &self.handle.is_some())
            .finish()
    }
}
