//! Caller identity via `aws sts`

use serde::Deserialize;

use super::AwsCli;
use crate::domain::ports::{ControlPlaneError, ControlPlaneResult, IdentityProvider};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct CallerIdentity {
    pub account: Option<String>,
}

pub(crate) fn account_from(identity: CallerIdentity) -> ControlPlaneResult<String> {
    identity
        .account
        .filter(|a| !a.trim().is_empty())
        .ok_or_else(|| ControlPlaneError::Malformed("caller identity has no Account".to_string()))
}

impl IdentityProvider for AwsCli {
    fn account_id(&self) -> ControlPlaneResult<String> {
        let identity: CallerIdentity = self.run_json(["sts", "get-caller-identity"])?;
        account_from(identity)
    }
}
