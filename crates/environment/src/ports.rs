use crate::error::ResolutionError;
use models::{InternalPort, PortBinding, PortBindingTable, ServiceRegistry, ServiceSelection};

/// Computes the container's port bindings against the standard registry.
pub fn resolve_port_bindings(
    selections: &[ServiceSelection],
) -> Result<PortBindingTable, ResolutionError> {
    resolve_port_bindings_with(ServiceRegistry::standard(), selections)
}

/// Computes the container's port bindings.
///
/// Each selection publishes its service's default port on the override port,
/// if positive, else on the default. An empty list publishes every service
/// in `registry` on its default port.
///
/// Duplicate selections for one service share an internal port, so the last
/// one wins. A lookup failure aborts the whole table.
pub fn resolve_port_bindings_with(
    registry: &ServiceRegistry,
    selections: &[ServiceSelection],
) -> Result<PortBindingTable, ResolutionError> {
    let mut table = PortBindingTable::new();

    if selections.is_empty() {
        for (_, port) in registry.iter() {
            table.insert(
                InternalPort::tcp(port),
                vec![PortBinding::on_all_interfaces(port)],
            );
        }
        return Ok(table);
    }

    for selection in selections {
        let (internal, binding) = mapping_for_selection(registry, selection)?;
        table.insert(internal, vec![binding]);
    }

    Ok(table)
}

fn mapping_for_selection(
    registry: &ServiceRegistry,
    selection: &ServiceSelection,
) -> Result<(InternalPort, PortBinding), ResolutionError> {
    let service = selection.service;
    let default = registry
        .default_port(service)
        .map_err(|source| ResolutionError::Lookup { service, source })?;

    let host_port = match selection.port_override() {
        Some(port) => {
            u16::try_from(port).map_err(|_| ResolutionError::PortOutOfRange { service, port })?
        }
        None => default,
    };

    Ok((
        InternalPort::tcp(default),
        PortBinding::on_all_interfaces(host_port),
    ))
}
