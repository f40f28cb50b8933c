//! Name to constructor mapping used to select metrics.

use std::collections::HashSet;
use std::fmt;

use tracing::warn;

use super::{ContainerHealth, ContainerStats, Cpu, DISK_ROOT, Disk, Memory, Metric, Swap};
use crate::collector::docker::LazyRuntime;
use crate::collector::traits::RealFs;
use crate::monitor::Config;

type Factory = Box<dyn Fn() -> Box<dyn Metric + Send> + Send + Sync>;

/// Ordered set of named metric constructors.
///
/// Each [`Registry::select`] call builds fresh metric instances, so state
/// such as the previous CPU reading or a runtime connection is never shared
/// between two selections.
#[derive(Default)]
pub struct Registry {
    entries: Vec<(&'static str, Factory)>,
}

impl Registry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `factory` under `name`, replacing a previous registration.
    pub fn register<F>(&mut self, name: &'static str, factory: F) -> &mut Self
    where
        F: Fn() -> Box<dyn Metric + Send> + Send + Sync + 'static,
    {
        let factory: Factory = Box::new(factory);
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = factory,
            None => self.entries.push((name, factory)),
        }
        self
    }

    /// Registry of the host and container metrics backed by real sources.
    pub fn standard(config: &Config) -> Self {
        let mut registry = Self::new();

        let proc_path = config.proc_path.clone();
        registry.register("cpu", move || Box::new(Cpu::new(RealFs::new(), &proc_path)));
        let proc_path = config.proc_path.clone();
        registry.register("memory", move || {
            Box::new(Memory::new(RealFs::new(), &proc_path))
        });
        let proc_path = config.proc_path.clone();
        registry.register("swap", move || Box::new(Swap::new(RealFs::new(), &proc_path)));
        registry.register("disk", || Box::new(Disk::new(RealFs::new(), DISK_ROOT)));

        let label = config.docker_label.clone();
        registry.register("docker-stats", move || {
            Box::new(ContainerStats::new(LazyRuntime::docker(), label.clone()))
        });
        let label = config.docker_label.clone();
        registry.register("docker-health", move || {
            Box::new(ContainerHealth::new(LazyRuntime::docker(), label.clone()))
        });

        registry
    }

    /// Registered names in registration order.
    pub fn names(&self) -> Vec<&'static str> {
        self.entries.iter().map(|(name, _)| *name).collect()
    }

    /// Builds the metrics named in a comma separated list.
    ///
    /// Tokens are trimmed and empty ones ignored. Unknown names are logged
    /// and skipped; a name listed twice is built once, at its first position.
    pub fn select(&self, list: &str) -> Vec<Box<dyn Metric + Send>> {
        let mut seen = HashSet::new();
        let mut metrics = Vec::new();

        for token in list.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            let Some((name, factory)) = self.entries.iter().find(|(n, _)| *n == token) else {
                warn!("unknown metric: {}", token);
                continue;
            };
            if seen.insert(*name) {
                metrics.push(factory());
            }
        }

        metrics
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("names", &self.names())
            .finish()
    }
}

/// Builds the metrics requested by `config` from the standard registry.
pub fn select_metrics(config: &Config) -> Vec<Box<dyn Metric + Send>> {
    Registry::standard(config).select(&config.metrics)
}
