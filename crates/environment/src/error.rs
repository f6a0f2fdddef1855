use models::{Service, ServiceError};
use runtime::ContainerError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolutionError {
    #[error("Cannot resolve ports for {service}: {source}")]
    Lookup {
        service: Service,
        #[source]
        source: ServiceError,
    },

    #[error("Port {port} requested for {service} is out of range")]
    PortOutOfRange { service: Service, port: i32 },
}

#[derive(Error, Debug)]
pub enum EnvironmentError {
    #[error(transparent)]
    Resolution(#[from] ResolutionError),

    #[error("Docker connection error: {0}")]
    Connection(ContainerError),

    #[error("Image pull error: {0}")]
    ImagePull(ContainerError),

    #[error("Container create error: {0}")]
    ContainerCreate(ContainerError),

    #[error("Container start error: {0}")]
    ContainerStart(ContainerError),

    #[error("Container stop error: {0}")]
    ContainerStop(ContainerError),
}
