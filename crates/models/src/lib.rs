// models crate

pub mod ports;
pub mod registry;
pub mod selection;
pub mod service;

pub use ports::{InternalPort, PortBinding, PortBindingTable, DEFAULT_HOST_IP};
pub use registry::{get_default_port, supported_services, ServiceRegistry};
pub use selection::{SelectionParseError, ServiceSelection};
pub use service::Service;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    #[error("Unsupported service: {0}")]
    UnsupportedService(String),
}
