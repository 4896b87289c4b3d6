//! Target Environment Entities
//!
//! Snapshots of a CloudFormation stack as reported by the control plane,
//! and the outcome handed back to the caller once it is stable.

use std::collections::BTreeMap;

use crate::domain::value_objects::EnvironmentState;

/// Output key holding the load balancer's public DNS name
pub const ENDPOINT_OUTPUT: &str = "LoadbalancerDNSName";

/// A stack as last described by the control plane
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetEnvironment {
    pub name: String,
    /// Raw provider status, e.g. `UPDATE_COMPLETE`
    pub status: String,
    pub status_reason: Option<String>,
    pub outputs: BTreeMap<String, String>,
}

impl TargetEnvironment {
    pub fn new(name: impl Into<String>, status: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: status.into(),
            status_reason: None,
            outputs: BTreeMap::new(),
        }
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.status_reason = Some(reason.into());
        self
    }

    pub fn with_output(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.outputs.insert(key.into(), value.into());
        self
    }

    /// Status plus reason, for error messages
    pub fn describe_status(&self) -> String {
        match &self.status_reason {
            Some(reason) if !reason.is_empty() => format!("{} ({})", self.status, reason),
            _ => self.status.clone(),
        }
    }
}

/// How the environment reached its stable state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Convergence {
    Created,
    Updated,
    /// The provider reported nothing to change
    Unchanged,
}

impl Convergence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Convergence::Created => "created",
            Convergence::Updated => "updated",
            Convergence::Unchanged => "unchanged",
        }
    }
}

/// Final observable result of a deployment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentOutcome {
    pub stack_name: String,
    pub state: EnvironmentState,
    pub convergence: Convergence,
    pub outputs: BTreeMap<String, String>,
}

impl DeploymentOutcome {
    /// Public DNS name of the load balancer, if the stack exports it
    pub fn endpoint(&self) -> Option<&str> {
        self.outputs.get(ENDPOINT_OUTPUT).map(String::as_str)
    }

    /// Reachable URL for the deployed app
    pub fn url(&self) -> Option<String> {
        self.endpoint().map(|dns| format!("http://{}", dns))
    }
}
