use crate::ServiceError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An emulated cloud service the LocalStack image can run.
///
/// The lower-case name is what the image expects in its `SERVICES` variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Service {
    ApiGateway,
    Kinesis,
    DynamoDb,
    DynamoDbStreams,
    Elasticsearch,
    S3,
    Firehose,
    Lambda,
    Sns,
    Sqs,
    Redshift,
    Es,
    Ses,
    Route53,
    CloudFormation,
    CloudWatch,
    Ssm,
    SecretsManager,
    StepFunctions,
    Logs,
    Events,
    Sts,
    Iam,
    Ec2,
    Kms,
}

impl Service {
    pub const ALL: [Service; 25] = [
        Service::ApiGateway,
        Service::Kinesis,
        Service::DynamoDb,
        Service::DynamoDbStreams,
        Service::Elasticsearch,
        Service::S3,
        Service::Firehose,
        Service::Lambda,
        Service::Sns,
        Service::Sqs,
        Service::Redshift,
        Service::Es,
        Service::Ses,
        Service::Route53,
        Service::CloudFormation,
        Service::CloudWatch,
        Service::Ssm,
        Service::SecretsManager,
        Service::StepFunctions,
        Service::Logs,
        Service::Events,
        Service::Sts,
        Service::Iam,
        Service::Ec2,
        Service::Kms,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Service::ApiGateway => "apigateway",
            Service::Kinesis => "kinesis",
            Service::DynamoDb => "dynamodb",
            Service::DynamoDbStreams => "dynamodbstreams",
            Service::Elasticsearch => "elasticsearch",
            Service::S3 => "s3",
            Service::Firehose => "firehose",
            Service::Lambda => "lambda",
            Service::Sns => "sns",
            Service::Sqs => "sqs",
            Service::Redshift => "redshift",
            Service::Es => "es",
            Service::Ses => "ses",
            Service::Route53 => "route53",
            Service::CloudFormation => "cloudformation",
            Service::CloudWatch => "cloudwatch",
            Service::Ssm => "ssm",
            Service::SecretsManager => "secretsmanager",
            Service::StepFunctions => "stepfunctions",
            Service::Logs => "logs",
            Service::Events => "events",
            Service::Sts => "sts",
            Service::Iam => "iam",
            Service::Ec2 => "ec2",
            Service::Kms => "kms",
        }
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Service {
    type Err = ServiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_lowercase();
        Service::ALL
            .iter()
            .copied()
            .find(|service| service.as_str() == name)
            .ok_or_else(|| ServiceError::UnsupportedService(s.trim().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_lower_case() {
        assert_eq!(Service::S3.to_string(), "s3");
        assert_eq!(Service::DynamoDbStreams.to_string(), "dynamodbstreams");
        for service in Service::ALL {
            assert_eq!(service.to_string(), service.to_string().to_lowercase());
        }
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("SQS".parse::<Service>(), Ok(Service::Sqs));
        assert_eq!(" CloudWatch ".parse::<Service>(), Ok(Service::CloudWatch));
    }

    #[test]
    fn test_parse_unknown_service() {
        assert_eq!(
            "bigtable".parse::<Service>(),
            Err(ServiceError::UnsupportedService("bigtable".to_string()))
        );
    }

    #[test]
    fn test_serde_uses_service_name() {
        let json = serde_json::to_string(&Service::SecretsManager).unwrap();
        assert_eq!(json, "\"secretsmanager\"");
    }
}
