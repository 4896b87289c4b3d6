//! Subnet discovery via `aws ec2`

use serde::Deserialize;

use super::AwsCli;
use crate::domain::ports::{ControlPlaneResult, NetworkDirectory};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct SubnetList {
    #[serde(default)]
    pub subnets: Vec<Subnet>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct Subnet {
    pub subnet_id: String,
}

impl NetworkDirectory for AwsCli {
    /// Subnets of the default VPC, one per availability zone
    fn subnet_ids(&self) -> ControlPlaneResult<Vec<String>> {
        let list: SubnetList = self.run_json([
            "ec2",
            "describe-subnets",
            "--filters",
            "Name=default-for-az,Values=true",
        ])?;
        Ok(list.subnets.into_iter().map(|s| s.subnet_id).collect())
    }
}
