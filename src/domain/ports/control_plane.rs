//! Control Plane Ports
//!
//! Abstracts the cloud provider so domain services can publish artifacts
//! and converge stacks without knowing how the calls are made.
//!
//! Implementations:
//! - `AwsCli` - shells out to the `aws` command-line tool
//! - test doubles that record calls in memory

use std::path::Path;

use crate::domain::entities::TargetEnvironment;

/// Error from a control-plane call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlPlaneError {
    /// The probed bucket, object or stack does not exist
    NotFound,
    /// The provider answered with an error code and message
    Rejected { code: String, message: String },
    /// The call could not be made or did not complete
    Transport(String),
    /// The provider answered but the response could not be understood
    Malformed(String),
}

impl ControlPlaneError {
    pub fn rejected(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Rejected {
            code: code.into(),
            message: message.into(),
        }
    }

    /// Provider message text, if any
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Rejected { message, .. } => Some(message),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }
}

impl std::fmt::Display for ControlPlaneError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound => write!(f, "not found"),
            Self::Rejected { code, message } => write!(f, "{}: {}", code, message),
            Self::Transport(msg) => write!(f, "transport error: {}", msg),
            Self::Malformed(msg) => write!(f, "malformed response: {}", msg),
        }
    }
}

impl std::error::Error for ControlPlaneError {}

pub type ControlPlaneResult<T> = Result<T, ControlPlaneError>;

/// Capability grants an environment needs to manage its own resources
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// Permission to create IAM roles and policies
    Iam,
}

impl Capability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::Iam => "CAPABILITY_IAM",
        }
    }
}

/// Caller identity lookup
pub trait IdentityProvider {
    /// Account id of the credentials in use
    fn account_id(&self) -> ControlPlaneResult<String>;
}

/// Object storage
///
/// Probes return `Err(ControlPlaneError::NotFound)` for absence; every other
/// error means the answer is unknown.
pub trait ObjectStore {
    fn head_bucket(&self, bucket: &str) -> ControlPlaneResult<()>;

    fn create_bucket(&self, bucket: &str, region: &str) -> ControlPlaneResult<()>;

    fn head_object(&self, bucket: &str, key: &str) -> ControlPlaneResult<()>;

    /// Upload a local file under `key`, blocking until the upload completes
    fn put_object(&self, bucket: &str, key: &str, body: &Path) -> ControlPlaneResult<()>;
}

/// Network discovery for load balancer placement
pub trait NetworkDirectory {
    fn subnet_ids(&self) -> ControlPlaneResult<Vec<String>>;
}

/// Declarative environment management
pub trait StackService {
    fn validate_template(&self, body: &str) -> ControlPlaneResult<()>;

    /// Every stack visible to the caller, unfiltered
    fn list_environments(&self) -> ControlPlaneResult<Vec<TargetEnvironment>>;

    fn create_stack(
        &self,
        name: &str,
        body: &str,
        capabilities: &[Capability],
    ) -> ControlPlaneResult<()>;

    fn update_stack(
        &self,
        name: &str,
        body: &str,
        capabilities: &[Capability],
    ) -> ControlPlaneResult<()>;
}
