use crate::{Service, ServiceError};
use indexmap::IndexMap;
use once_cell::sync::Lazy;

// Default edge ports of the LocalStack image, one per service
const DEFAULT_PORTS: [(Service, u16); 25] = [
    (Service::ApiGateway, 4567),
    (Service::Kinesis, 4568),
    (Service::DynamoDb, 4569),
    (Service::DynamoDbStreams, 4570),
    (Service::Elasticsearch, 4571),
    (Service::S3, 4572),
    (Service::Firehose, 4573),
    (Service::Lambda, 4574),
    (Service::Sns, 4575),
    (Service::Sqs, 4576),
    (Service::Redshift, 4577),
    (Service::Es, 4578),
    (Service::Ses, 4579),
    (Service::Route53, 4580),
    (Service::CloudFormation, 4581),
    (Service::CloudWatch, 4582),
    (Service::Ssm, 4583),
    (Service::SecretsManager, 4584),
    (Service::StepFunctions, 4585),
    (Service::Logs, 4586),
    (Service::Events, 4587),
    (Service::Sts, 4592),
    (Service::Iam, 4593),
    (Service::Ec2, 4597),
    (Service::Kms, 4599),
];

static STANDARD_REGISTRY: Lazy<ServiceRegistry> =
    Lazy::new(|| ServiceRegistry::from_entries(DEFAULT_PORTS));

/// Catalog of the services an emulator image supports and the port each one
/// listens on inside the container.
///
/// Enumeration order is insertion order, which keeps everything derived from
/// the registry deterministic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceRegistry {
    ports: IndexMap<Service, u16>,
}

impl ServiceRegistry {
    /// The full catalog shipped with the LocalStack image.
    pub fn standard() -> &'static ServiceRegistry {
        &STANDARD_REGISTRY
    }

    /// Builds a restricted catalog, e.g. for an image that only ships a
    /// subset of services.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (Service, u16)>,
    {
        ServiceRegistry {
            ports: entries.into_iter().collect(),
        }
    }

    pub fn default_port(&self, service: Service) -> Result<u16, ServiceError> {
        self.ports
            .get(&service)
            .copied()
            .ok_or_else(|| ServiceError::UnsupportedService(service.to_string()))
    }

    pub fn supported_services(&self) -> Vec<Service> {
        self.ports.keys().copied().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Service, u16)> + '_ {
        self.ports.iter().map(|(service, port)| (*service, *port))
    }

    pub fn len(&self) -> usize {
        self.ports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ports.is_empty()
    }
}

/// Default port of `service` in the standard registry.
pub fn get_default_port(service: Service) -> Result<u16, ServiceError> {
    ServiceRegistry::standard().default_port(service)
}

/// All services in the standard registry, in enumeration order.
pub fn supported_services() -> Vec<Service> {
    ServiceRegistry::standard().supported_services()
}
