use crate::container::{ContainerError, ContainerRuntime, ContainerSpec};
use async_trait::async_trait;
use bollard::{
    container::{Config, CreateContainerOptions},
    image::CreateImageOptions,
    models::{HostConfig, PortBinding as DockerPortBinding},
    Docker,
};
use futures_util::StreamExt;
use std::collections::HashMap;

pub struct DockerRuntime {
    docker: Docker,
}

impl DockerRuntime {
    /// Connects using `DOCKER_HOST` or the platform's default socket.
    pub fn new() -> Result<Self, ContainerError> {
        let docker = Docker::connect_with_local_defaults()
            .map_err(|e| ContainerError::ConnectionFailed(e.to_string()))?;

        Ok(DockerRuntime { docker })
    }
}

pub async fn is_available() -> bool {
    match Docker::connect_with_local_defaults() {
        Ok(docker) => match docker.ping().await {
            Ok(_) => true,
            Err(e) => {
                logging::error(&format!("Docker ping failed: {}", e));
                false
            }
        },
        Err(e) => {
            logging::error(&format!("Docker connection failed: {}", e));
            false
        }
    }
}

/// Translates a `ContainerSpec` into the create-container body Docker expects.
pub fn docker_config(spec: &ContainerSpec) -> Config<String> {
    let mut exposed_ports = HashMap::new();
    let mut port_bindings = HashMap::new();

    for (internal, bindings) in &spec.port_bindings {
        exposed_ports.insert(internal.to_string(), HashMap::new());
        port_bindings.insert(
            internal.to_string(),
            Some(
                bindings
                    .iter()
                    .map(|b| DockerPortBinding {
                        host_ip: Some(b.host_ip.clone()),
                        host_port: Some(b.host_port.to_string()),
                    })
                    .collect(),
            ),
        );
    }

    let host_config = HostConfig {
        port_bindings: Some(port_bindings),
        ..Default::default()
    };

    Config {
        image: Some(spec.image.clone()),
        env: if spec.env.is_empty() {
            None
        } else {
            Some(spec.env.clone())
        },
        exposed_ports: Some(exposed_ports),
        host_config: Some(host_config),
        ..Default::default()
    }
}

#[async_trait]
impl ContainerRuntime for DockerRuntime {
    async fn pull_image(&self, image: &str) -> Result<(), ContainerError> {
        logging::info(&format!("🐳 Pulling image: {}", image));

        let options = CreateImageOptions {
            from_image: image,
            ..Default::default()
        };

        let mut stream = self.docker.create_image(Some(options), None, None);

        while let Some(result) = stream.next().await {
            match result {
                Ok(info) => {
                    if let Some(status) = info.status {
                        match info.id {
                            Some(id) => logging::debug(&format!("{}: {}", id, status)),
                            None => logging::debug(&status),
                        }
                    }
                }
                Err(e) => return Err(ContainerError::ImagePullFailed(e.to_string())),
            }
        }

        logging::info(&format!("🐳 Successfully pulled image: {}", image));
        Ok(())
    }

    async fn create_container(&self, spec: &ContainerSpec) -> Result<String, ContainerError> {
        let options = Some(CreateContainerOptions {
            name: format!("lstack-{}", uuid::Uuid::new_v4()),
            platform: None,
        });

        let response = self
            .docker
            .create_container(options, docker_config(spec))
            .await
            .map_err(|e| ContainerError::ContainerCreateFailed(e.to_string()))?;

        for warning in &response.warnings {
            logging::warning(&format!("Docker: {}", warning));
        }

        Ok(response.id)
    }

    async fn start_container(&self, id: &str) -> Result<(), ContainerError> {
        self.docker
            .start_container::<String>(id, None)
            .await
            .map_err(|e| ContainerError::ContainerStartFailed(e.to_string()))
    }

    async fn stop_container(&self, id: &str) -> Result<(), ContainerError> {
        self.docker
            .stop_container(id, None)
            .await
            .map_err(|e| ContainerError::ContainerStopFailed(e.to_string()))
    }
}
