use async_trait::async_trait;
use models::PortBindingTable;
use serde::Serialize;
use std::fmt;

/// Everything needed to create the emulator container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContainerSpec {
    pub image: String,
    pub env: Vec<String>,
    pub port_bindings: PortBindingTable,
}

/// The operations lstack needs from a container engine.
///
/// Every call completes before returning; none of them retry.
#[async_trait]
pub trait ContainerRuntime: Send + Sync {
    /// Pulls `image`, draining the progress stream. Pulling an image that is
    /// already present just re-verifies it.
    async fn pull_image(&self, image: &str) -> Result<(), ContainerError>;

    /// Creates a stopped container and returns its id.
    async fn create_container(&self, spec: &ContainerSpec) -> Result<String, ContainerError>;

    async fn start_container(&self, id: &str) -> Result<(), ContainerError>;

    /// Asks the container to stop, leaving the kill timeout to the engine.
    async fn stop_container(&self, id: &str) -> Result<(), ContainerError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContainerError {
    ConnectionFailed(String),
    ImagePullFailed(String),
    ContainerCreateFailed(String),
    ContainerStartFailed(String),
    ContainerStopFailed(String),
}

impl fmt::Display for ContainerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContainerError::ConnectionFailed(msg) => {
                write!(f, "Failed to connect to Docker: {}", msg)
            }
            ContainerError::ImagePullFailed(msg) => write!(f, "Failed to pull image: {}", msg),
            ContainerError::ContainerCreateFailed(msg) => {
                write!(f, "Failed to create container: {}", msg)
            }
            ContainerError::ContainerStartFailed(msg) => {
                write!(f, "Failed to start container: {}", msg)
            }
            ContainerError::ContainerStopFailed(msg) => {
                write!(f, "Failed to stop container: {}", msg)
            }
        }
    }
}

impl std::error::Error for ContainerError {}
