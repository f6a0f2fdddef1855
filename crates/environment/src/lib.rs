// environment crate

pub mod env;
pub mod error;
pub mod lifecycle;
pub mod ports;
pub mod settings;

// Re-export public items
pub use env::compose_environment;
pub use error::{EnvironmentError, ResolutionError};
pub use lifecycle::{EnvironmentState, Localstack};
pub use ports::{resolve_port_bindings, resolve_port_bindings_with};
pub use settings::{EnvironmentSettings, DEFAULT_IMAGE, DEFAULT_SETTLE_DELAY};
