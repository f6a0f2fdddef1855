use crate::env::compose_environment;
use crate::error::EnvironmentError;
use crate::ports::resolve_port_bindings;
use crate::settings::EnvironmentSettings;
use models::{InternalPort, Service, ServiceRegistry, ServiceSelection};
use runtime::{ContainerRuntime, ContainerSpec, DockerRuntime};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvironmentState {
    Created,
    Running,
    Stopped,
}

impl fmt::Display for EnvironmentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnvironmentState::Created => write!(f, "created"),
            EnvironmentState::Running => write!(f, "running"),
            EnvironmentState::Stopped => write!(f, "stopped"),
        }
    }
}

/// Handle to the one LocalStack container this process manages.
///
/// There is no remove operation: a stopped container stays in the engine's
/// storage until something else reclaims it.
pub struct Localstack<R: ContainerRuntime = DockerRuntime> {
    id: String,
    runtime: R,
    spec: ContainerSpec,
    settings: EnvironmentSettings,
    state: EnvironmentState,
}

impl Localstack<DockerRuntime> {
    /// Connects to the local Docker engine and creates a container for
    /// `selections`, using settings from the process environment.
    pub async fn new(selections: &[ServiceSelection]) -> Result<Self, EnvironmentError> {
        let runtime = DockerRuntime::new().map_err(EnvironmentError::Connection)?;
        Self::with_runtime(runtime, EnvironmentSettings::from_env(), selections).await
    }
}

impl<R: ContainerRuntime> Localstack<R> {
    /// Resolves the container configuration, pulls the image and creates the
    /// container. Nothing is returned unless every step succeeds.
    pub async fn with_runtime(
        runtime: R,
        settings: EnvironmentSettings,
        selections: &[ServiceSelection],
    ) -> Result<Self, EnvironmentError> {
        let port_bindings = resolve_port_bindings(selections)?;
        let env = compose_environment(selections);

        runtime
            .pull_image(&settings.image)
            .await
            .map_err(EnvironmentError::ImagePull)?;

        let spec = ContainerSpec {
            image: settings.image.clone(),
            env,
            port_bindings,
        };

        match serde_json::to_string_pretty(&spec) {
            Ok(json) => logging::info(&format!("Container config is {}", json)),
            Err(e) => logging::debug(&format!("Could not render container config: {}", e)),
        }

        let id = runtime
            .create_container(&spec)
            .await
            .map_err(EnvironmentError::ContainerCreate)?;

        logging::info(&format!("🐳 Created LocalStack container {}", id));

        Ok(Localstack {
            id,
            runtime,
            spec,
            settings,
            state: EnvironmentState::Created,
        })
    }

    /// Starts the container, then waits out the settle delay so the emulator
    /// can bind its ports. Readiness is assumed, not checked.
    pub async fn start(&mut self) -> Result<(), EnvironmentError> {
        if self.state == EnvironmentState::Running {
            logging::debug(&format!("Container {} is already running", self.id));
        }

        self.runtime
            .start_container(&self.id)
            .await
            .map_err(EnvironmentError::ContainerStart)?;

        tokio::time::sleep(self.settings.settle_delay).await;
        self.state = EnvironmentState::Running;
        logging::info(&format!("🐳 Started LocalStack container {}", self.id));
        Ok(())
    }

    /// Stops the container with the engine's default timeout, then waits out
    /// the settle delay.
    pub async fn stop(&mut self) -> Result<(), EnvironmentError> {
        if self.state != EnvironmentState::Running {
            logging::debug(&format!(
                "Container {} is {}, not running; stopping anyway",
                self.id, self.state
            ));
        }

        self.runtime
            .stop_container(&self.id)
            .await
            .map_err(EnvironmentError::ContainerStop)?;

        tokio::time::sleep(self.settings.settle_delay).await;
        self.state = EnvironmentState::Stopped;
        logging::info(&format!("🐳 Stopped LocalStack container {}", self.id));
        Ok(())
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn state(&self) -> EnvironmentState {
        self.state
    }

    pub fn spec(&self) -> &ContainerSpec {
        &self.spec
    }

    pub fn settings(&self) -> &EnvironmentSettings {
        &self.settings
    }

    /// Host endpoint for `service`, if the container publishes it.
    pub fn endpoint(&self, service: Service) -> Option<String> {
        let default = ServiceRegistry::standard().default_port(service).ok()?;
        let binding = self
            .spec
            .port_bindings
            .get(&InternalPort::tcp(default))?
            .first()?;
        Some(format!("http://{}:{}", binding.host_ip, binding.host_port))
    }
}
