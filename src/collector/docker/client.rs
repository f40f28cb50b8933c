//! Docker Engine API client over the local unix socket.
//!
//! `bollard` is async; each client owns a current-thread tokio runtime and
//! blocks on it, so callers stay synchronous.

use std::fmt;
use std::path::PathBuf;

use bollard::Docker;
use bollard::container::{InspectContainerOptions, ListContainersOptions, StatsOptions};
use futures_util::StreamExt;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::runtime::{Builder, Runtime};
use tracing::trace;

use super::model::{ContainerDetails, ContainerSummary, StatsSnapshot};
use super::{ContainerRuntime, RuntimeError};

/// Socket used when `DOCKER_HOST` is not set.
pub const DEFAULT_SOCKET: &str = "/var/run/docker.sock";

/// Request timeout, in seconds.
const TIMEOUT_SECS: u64 = 10;

/// Docker Engine API client.
pub struct DockerClient {
    socket: PathBuf,
    docker: Docker,
    runtime: Runtime,
}

impl DockerClient {
    /// Creates a client for the given socket path.
    ///
    /// No connection is made until the first request.
    pub fn new(socket: impl Into<PathBuf>) -> Result<Self, RuntimeError> {
        let socket = socket.into();
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(RuntimeError::Io)?;
        let docker = {
            let _guard = runtime.enter();
            connect_unix(&socket)?
        };
        Ok(Self {
            socket,
            docker,
            runtime,
        })
    }

    /// Creates a client from `DOCKER_HOST`, falling back to the default socket.
    ///
    /// Only `unix://` hosts are supported.
    pub fn from_env() -> Result<Self, RuntimeError> {
        match std::env::var("DOCKER_HOST") {
            Ok(host) if !host.is_empty() => Self::from_host(&host),
            _ => Self::new(DEFAULT_SOCKET),
        }
    }

    /// Creates a client from a `DOCKER_HOST` style address.
    pub fn from_host(host: &str) -> Result<Self, RuntimeError> {
        match host.strip_prefix("unix://") {
            Some(path) if !path.is_empty() => Self::new(path),
            _ => Err(RuntimeError::UnsupportedHost(host.to_string())),
        }
    }
}

#[cfg(unix)]
fn connect_unix(socket: &std::path::Path) -> Result<Docker, RuntimeError> {
    Ok(Docker::connect_with_unix(
        &socket.to_string_lossy(),
        TIMEOUT_SECS,
        bollard::API_DEFAULT_VERSION,
    )?)
}

#[cfg(not(unix))]
fn connect_unix(socket: &std::path::Path) -> Result<Docker, RuntimeError> {
    Err(RuntimeError::UnsupportedHost(format!(
        "unix://{}",
        socket.display()
    )))
}

/// Re-reads an engine response as the local model.
///
/// The models only keep the fields the metrics use and tolerate `null`s
/// where the engine omits a counter.
fn convert<S: Serialize, T: DeserializeOwned>(value: S) -> Result<T, RuntimeError> {
    Ok(serde_json::from_value(serde_json::to_value(value)?)?)
}

impl ContainerRuntime for DockerClient {
    fn list_containers(&self) -> Result<Vec<ContainerSummary>, RuntimeError> {
        trace!("listing containers via {}", self.socket.display());
        let options = ListContainersOptions::<String>::default();
        let containers = self
            .runtime
            .block_on(self.docker.list_containers(Some(options)))?;
        containers.into_iter().map(convert).collect()
    }

    fn stats(&self, id: &str) -> Result<StatsSnapshot, RuntimeError> {
        trace!("reading stats of {} via {}", id, self.socket.display());
        let options = StatsOptions {
            stream: false,
            one_shot: false,
        };
        let mut stream = Box::pin(self.docker.stats(id, Some(options)));
        match self.runtime.block_on(stream.next()) {
            Some(stats) => convert(stats?),
            None => Err(RuntimeError::MissingStats(id.to_string())),
        }
    }

    fn inspect(&self, id: &str) -> Result<ContainerDetails, RuntimeError> {
        trace!("inspecting {} via {}", id, self.socket.display());
        let details = self
            .runtime
            .block_on(self.docker.inspect_container(id, None::<InspectContainerOptions>))?;
        convert(details)
    }
}

impl fmt::Debug for DockerClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DockerClient")
            .field("socket", &self.socket)
            .finish()
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use bollard::models::{
        ContainerInspectResponse, ContainerState, Health, HealthStatusEnum,
    };
    use std::collections::HashMap;
    use std::io::{Read, Write};
    use std::os::unix::net::UnixListener;
    use std::path::Path;
    use std::thread::{self, JoinHandle};

    /// Answers one request on `socket` with `response` and returns the request head.
    fn serve_once(socket: &Path, response: &'static str) -> JoinHandle<String> {
        let listener = UnixListener::bind(socket).unwrap();
        thread::spawn(move || {
            let (mut conn, _) = listener.accept().unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 512];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = conn.read(&mut buf).unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            conn.write_all(response.as_bytes()).unwrap();
            String::from_utf8(request).unwrap()
        })
    }

    #[test]
    fn test_from_host_unix() {
        let client = DockerClient::from_host("unix:///run/user/1000/docker.sock").unwrap();
        assert_eq!(client.socket, Path::new("/run/user/1000/docker.sock"));
    }

    #[test]
    fn test_from_host_rejects_tcp() {
        let err = DockerClient::from_host("tcp://10.0.0.1:2375").unwrap_err();
        assert!(matches!(err, RuntimeError::UnsupportedHost(_)));
    }

    #[test]
    fn test_from_host_rejects_empty_path() {
        let err = DockerClient::from_host("unix://").unwrap_err();
        assert!(matches!(err, RuntimeError::UnsupportedHost(_)));
    }

    #[test]
    fn test_list_containers_over_socket() {
        let dir = tempfile::tempdir().unwrap();
        let socket = dir.path().join("docker.sock");
        let server = serve_once(
            &socket,
            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nTransfer-Encoding: chunked\r\nConnection: close\r\n\r\n\
             e\r\n[{\"Id\":\"abc\",\"\r\n\
             11\r\nNames\":[\"/web\"]}]\r\n\
             0\r\n\r\n",
        );

        let client = DockerClient::new(&socket).unwrap();
        let containers = client.list_containers().unwrap();
        let request = server.join().unwrap();

        assert!(request.starts_with("GET /"));
        assert!(request.contains("/containers/json"));
        assert_eq!(containers.len(), 1);
        assert_eq!(containers[0].id, "abc");
        assert_eq!(containers[0].first_name(), Some("/web"));
    }

    #[test]
    fn test_inspect_not_found_maps_to_status() {
        let dir = tempfile::tempdir().unwrap();
        let socket = dir.path().join("docker.sock");
        let server = serve_once(
            &socket,
            "HTTP/1.1 404 Not Found\r\nContent-Type: application/json\r\nContent-Length: 36\r\nConnection: close\r\n\r\n\
             {\"message\":\"No such container: abc\"}",
        );

        let client = DockerClient::new(&socket).unwrap();
        let err = client.inspect("abc").unwrap_err();
        let request = server.join().unwrap();

        assert!(request.contains("/containers/abc/json"));
        assert!(matches!(
            err,
            RuntimeError::Status { status: 404, ref message } if message.contains("No such container")
        ));
    }

    #[test]
    fn test_connect_failure() {
        let client = DockerClient::new("/nonexistent/docker.sock").unwrap();
        let err = client.list_containers().unwrap_err();
        assert!(matches!(err, RuntimeError::Engine(_)));
    }

    #[test]
    fn test_convert_summary() {
        let summary = bollard::models::ContainerSummary {
            id: Some("3f4e8b2a91c7".into()),
            names: Some(vec!["/web".into()]),
            labels: Some(HashMap::from([(
                "com.example.service".to_string(),
                "frontend".to_string(),
            )])),
            ..Default::default()
        };

        let converted: ContainerSummary = convert(summary).unwrap();
        assert_eq!(converted.id, "3f4e8b2a91c7");
        assert_eq!(converted.first_name(), Some("/web"));
        assert_eq!(converted.label("com.example.service"), Some("frontend"));
    }

    #[test]
    fn test_convert_inspect_health() {
        let with_health = |status| ContainerInspectResponse {
            state: Some(ContainerState {
                health: Some(Health {
                    status: Some(status),
                    ..Default::default()
                }),
                ..Default::default()
            }),
            ..Default::default()
        };

        let healthy: ContainerDetails = convert(with_health(HealthStatusEnum::HEALTHY)).unwrap();
        assert!(healthy.is_healthy());
        let starting: ContainerDetails = convert(with_health(HealthStatusEnum::STARTING)).unwrap();
        assert!(!starting.is_healthy());
        let none: ContainerDetails = convert(ContainerInspectResponse::default()).unwrap();
        assert!(!none.is_healthy());
    }
}
