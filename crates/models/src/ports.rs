use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;

/// Host address every published port is bound to.
pub const DEFAULT_HOST_IP: &str = "0.0.0.0";

/// A TCP port inside the container, rendered the way Docker keys it
/// (`4572/tcp`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(into = "String")]
pub struct InternalPort(u16);

impl InternalPort {
    pub fn tcp(port: u16) -> Self {
        InternalPort(port)
    }

    pub fn port(&self) -> u16 {
        self.0
    }

    pub fn protocol(&self) -> &'static str {
        "tcp"
    }
}

impl fmt::Display for InternalPort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.0, self.protocol())
    }
}

impl From<InternalPort> for String {
    fn from(port: InternalPort) -> Self {
        port.to_string()
    }
}

/// Host side of a published port.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PortBinding {
    pub host_ip: String,
    pub host_port: u16,
}

impl PortBinding {
    pub fn on_all_interfaces(host_port: u16) -> Self {
        PortBinding {
            host_ip: DEFAULT_HOST_IP.to_string(),
            host_port,
        }
    }
}

/// Internal port to host bindings, in insertion order.
pub type PortBindingTable = IndexMap<InternalPort, Vec<PortBinding>>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_internal_port_renders_with_protocol() {
        assert_eq!(InternalPort::tcp(4572).to_string(), "4572/tcp");
    }

    #[test]
    fn test_table_serializes_with_docker_keys() {
        let mut table = PortBindingTable::new();
        table.insert(
            InternalPort::tcp(4572),
            vec![PortBinding::on_all_interfaces(9000)],
        );
        let json = serde_json::to_value(&table).unwrap();
        assert_eq!(json["4572/tcp"][0]["host_ip"], "0.0.0.0");
        assert_eq!(json["4572/tcp"][0]["host_port"], 9000);
    }
}
