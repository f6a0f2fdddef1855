use crate::{Service, ServiceError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A request to run `service`, optionally published on a host port other
/// than the service default.
///
/// A missing or non-positive `port` means "use the default".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceSelection {
    pub service: Service,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<i32>,
}

impl ServiceSelection {
    pub fn new(service: Service) -> Self {
        ServiceSelection {
            service,
            port: None,
        }
    }

    pub fn with_port(service: Service, port: i32) -> Self {
        ServiceSelection {
            service,
            port: Some(port),
        }
    }

    /// The override port, if one was given and it is positive.
    pub fn port_override(&self) -> Option<i32> {
        self.port.filter(|p| *p > 0)
    }
}

impl From<Service> for ServiceSelection {
    fn from(service: Service) -> Self {
        ServiceSelection::new(service)
    }
}

impl fmt::Display for ServiceSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.port {
            Some(port) => write!(f, "{}:{}", self.service, port),
            None => write!(f, "{}", self.service),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionParseError {
    #[error(transparent)]
    Service(#[from] ServiceError),

    #[error("Invalid port '{port}' for service {service}")]
    InvalidPort { service: String, port: String },
}

// Accepts `name` or `name:port`
impl FromStr for ServiceSelection {
    type Err = SelectionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(':') {
            Some((name, port)) => {
                let service: Service = name.parse()?;
                let port = port
                    .trim()
                    .parse::<i32>()
                    .map_err(|_| SelectionParseError::InvalidPort {
                        service: service.to_string(),
                        port: port.to_string(),
                    })?;
                Ok(ServiceSelection::with_port(service, port))
            }
            None => Ok(ServiceSelection::new(s.parse()?)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_name_only() {
        let selection: ServiceSelection = "s3".parse().unwrap();
        assert_eq!(selection, ServiceSelection::new(Service::S3));
    }

    #[test]
    fn test_parse_name_and_port() {
        let selection: ServiceSelection = "sqs:9324".parse().unwrap();
        assert_eq!(selection, ServiceSelection::with_port(Service::Sqs, 9324));
        assert_eq!(selection.to_string(), "sqs:9324");
    }

    #[test]
    fn test_parse_bad_port() {
        let err = "sns:abc".parse::<ServiceSelection>().unwrap_err();
        assert_eq!(
            err,
            SelectionParseError::InvalidPort {
                service: "sns".to_string(),
                port: "abc".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_unknown_service() {
        let err = "nope:1234".parse::<ServiceSelection>().unwrap_err();
        assert!(matches!(
            err,
            SelectionParseError::Service(ServiceError::UnsupportedService(_))
        ));
    }

    #[test]
    fn test_non_positive_port_is_not_an_override() {
        assert_eq!(ServiceSelection::with_port(Service::S3, 0).port_override(), None);
        assert_eq!(ServiceSelection::with_port(Service::S3, -5).port_override(), None);
        assert_eq!(ServiceSelection::new(Service::S3).port_override(), None);
        assert_eq!(
            ServiceSelection::with_port(Service::S3, 9000).port_override(),
            Some(9000)
        );
    }
}
