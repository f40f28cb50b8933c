//! In-memory container runtime for testing container metrics.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use crate::collector::docker::{
    ContainerDetails, ContainerRuntime, ContainerSummary, RuntimeError, StatsSnapshot,
};

#[derive(Debug, Default)]
struct MockRuntimeState {
    containers: Vec<ContainerSummary>,
    stats: HashMap<String, StatsSnapshot>,
    details: HashMap<String, ContainerDetails>,
    failing: HashSet<String>,
    list_failure: Option<String>,
    list_calls: usize,
}

/// Container runtime backed by in-memory fixtures.
///
/// Clones share state, so a test can keep a handle to inspect calls.
#[derive(Debug, Clone, Default)]
pub struct MockRuntime {
    state: Arc<Mutex<MockRuntimeState>>,
}

impl MockRuntime {
    /// Creates a runtime with no containers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a running container with its stats and inspect responses.
    pub fn add_container(
        &self,
        summary: ContainerSummary,
        stats: StatsSnapshot,
        details: ContainerDetails,
    ) {
        let mut state = self.lock();
        state.stats.insert(summary.id.clone(), stats);
        state.details.insert(summary.id.clone(), details);
        state.containers.push(summary);
    }

    /// Makes stats and inspect requests for `id` fail.
    pub fn fail_container(&self, id: &str) {
        self.lock().failing.insert(id.to_string());
    }

    /// Makes listing containers fail with `message`.
    pub fn fail_listing(&self, message: &str) {
        self.lock().list_failure = Some(message.to_string());
    }

    /// Number of times containers were listed.
    pub fn list_calls(&self) -> usize {
        self.lock().list_calls
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MockRuntimeState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn check(state: &MockRuntimeState, id: &str) -> Result<(), RuntimeError> {
        if state.failing.contains(id) {
            return Err(RuntimeError::Status {
                status: 500,
                message: format!("container {} is unavailable", id),
            });
        }
        Ok(())
    }

    fn not_found(id: &str) -> RuntimeError {
        RuntimeError::Status {
            status: 404,
            message: format!("No such container: {}", id),
        }
    }
}

impl ContainerRuntime for MockRuntime {
    fn list_containers(&self) -> Result<Vec<ContainerSummary>, RuntimeError> {
        let mut state = self.lock();
        state.list_calls += 1;
        if let Some(message) = &state.list_failure {
            return Err(RuntimeError::Status {
                status: 500,
                message: message.clone(),
            });
        }
        Ok(state.containers.clone())
    }

    fn stats(&self, id: &str) -> Result<StatsSnapshot, RuntimeError> {
        let state = self.lock();
        Self::check(&state, id)?;
        state.stats.get(id).cloned().ok_or_else(|| Self::not_found(id))
    }

    fn inspect(&self, id: &str) -> Result<ContainerDetails, RuntimeError> {
        let state = self.lock();
        Self::check(&state, id)?;
        state
            .details
            .get(id)
            .cloned()
            .ok_or_else(|| Self::not_found(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_containers_scenario() {
        let runtime = MockRuntime::two_containers();
        let containers = runtime.list_containers().unwrap();
        assert_eq!(containers.len(), 2);
        assert_eq!(runtime.list_calls(), 1);

        for c in &containers {
            assert!(runtime.stats(&c.id).is_ok());
            assert!(runtime.inspect(&c.id).is_ok());
        }
    }

    #[test]
    fn test_failing_container() {
        let runtime = MockRuntime::two_containers();
        runtime.fail_container("3f4e8b2a91c7");
        assert!(runtime.stats("3f4e8b2a91c7").is_err());
        assert!(runtime.inspect("3f4e8b2a91c7").is_err());
        assert!(runtime.stats("8a1d0c6e5b24").is_ok());
    }

    #[test]
    fn test_unknown_container() {
        let runtime = MockRuntime::new();
        let err = runtime.inspect("nope").unwrap_err();
        assert!(err.to_string().contains("No such container"));
    }
}
