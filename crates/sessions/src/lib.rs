// sessions crate
//
// Client sessions pointed at the emulator's default endpoints. Configuration
// is passed in explicitly; `SessionConfig::default()` carries the placeholder
// credentials LocalStack accepts.

use models::{Service, ServiceError};
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error(transparent)]
    Service(#[from] ServiceError),

    #[error("Invalid endpoint '{endpoint}': {message}")]
    InvalidEndpoint { endpoint: String, message: String },

    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub access_key_id: String,
    pub secret_access_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_token: Option<String>,
}

impl Credentials {
    pub fn new(
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
        session_token: Option<String>,
    ) -> Self {
        Credentials {
            access_key_id: access_key_id.into(),
            secret_access_key: secret_access_key.into(),
            session_token,
        }
    }
}

impl Default for Credentials {
    fn default() -> Self {
        Credentials::new("AKID", "SECRET", Some("SESSION".to_string()))
    }
}

// Keep secrets out of debug output
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"<redacted>")
            .field("session_token", &self.session_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    pub credentials: Credentials,
    pub region: String,
    pub disable_ssl: bool,
    pub host: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            credentials: Credentials::default(),
            region: "eu-west-1".to_string(),
            disable_ssl: true,
            host: "localhost".to_string(),
        }
    }
}

impl SessionConfig {
    fn scheme(&self) -> &'static str {
        if self.disable_ssl {
            "http"
        } else {
            "https"
        }
    }

    /// Endpoint URL for `service` on its default port.
    pub fn endpoint_for(&self, service: Service) -> Result<Url, SessionError> {
        let port = models::get_default_port(service)?;
        let endpoint = format!("{}://{}:{}", self.scheme(), self.host, port);
        Url::parse(&endpoint).map_err(|e| SessionError::InvalidEndpoint {
            endpoint,
            message: e.to_string(),
        })
    }
}

/// A ready-to-use client bound to one emulated service.
#[derive(Debug, Clone)]
pub struct Session {
    service: Service,
    endpoint: Url,
    region: String,
    credentials: Credentials,
    client: reqwest::Client,
}

impl Session {
    pub fn service(&self) -> Service {
        self.service
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }

    /// Resolves `path` against the service endpoint.
    pub fn url(&self, path: &str) -> Result<Url, SessionError> {
        self.endpoint
            .join(path)
            .map_err(|e| SessionError::InvalidEndpoint {
                endpoint: format!("{}{}", self.endpoint, path),
                message: e.to_string(),
            })
    }
}

/// Builds a session for `service` at its default local endpoint.
pub fn session_for(service: Service, config: &SessionConfig) -> Result<Session, SessionError> {
    let endpoint = config.endpoint_for(service)?;
    let client = reqwest::Client::builder()
        .user_agent(concat!("lstack/", env!("CARGO_PKG_VERSION")))
        .build()?;

    Ok(Session {
        service,
        endpoint,
        region: config.region.clone(),
        credentials: config.credentials.clone(),
        client,
    })
}

macro_rules! session_constructors {
    ($($name:ident => $service:ident),* $(,)?) => {
        $(
            #[doc = concat!("Session for the emulated `", stringify!($service), "` service.")]
            pub fn $name(config: &SessionConfig) -> Result<Session, SessionError> {
                session_for(Service::$service, config)
            }
        )*
    };
}

session_constructors! {
    apigateway_session => ApiGateway,
    kinesis_session => Kinesis,
    dynamodb_session => DynamoDb,
    dynamodbstreams_session => DynamoDbStreams,
    elasticsearch_session => Elasticsearch,
    s3_session => S3,
    firehose_session => Firehose,
    lambda_session => Lambda,
    sns_session => Sns,
    sqs_session => Sqs,
    redshift_session => Redshift,
    es_session => Es,
    ses_session => Ses,
    route53_session => Route53,
    cloudformation_session => CloudFormation,
    cloudwatch_session => CloudWatch,
    ssm_session => Ssm,
    secretsmanager_session => SecretsManager,
    stepfunctions_session => StepFunctions,
    logs_session => Logs,
    events_session => Events,
    sts_session => Sts,
    iam_session => Iam,
    ec2_session => Ec2,
    kms_session => Kms,
}
