// runtime crate

pub mod container;
pub mod docker;

pub use container::{ContainerError, ContainerRuntime, ContainerSpec};
pub use docker::DockerRuntime;
