//! Deploy Result
//!
//! Summary of a completed deploy run.

use std::path::PathBuf;

use crate::domain::entities::DeploymentOutcome;
use crate::domain::value_objects::StoreLocation;

/// What a successful run did
#[derive(Debug, Clone)]
pub struct DeployReport {
    pub app_name: String,
    /// Where the artifact archive lives
    pub location: StoreLocation,
    /// Whether the bucket had to be created
    pub bucket_created: bool,
    /// Whether the archive was uploaded (false when already published)
    pub uploaded: bool,
    /// Local template copy, when one was written
    pub template_path: Option<PathBuf>,
    pub outcome: DeploymentOutcome,
}

impl DeployReport {
    /// Human summary line printed on success
    pub fn summary(&self) -> String {
        match self.outcome.url() {
            Some(url) => format!("{} is deployed at {}", self.app_name, url),
            None => format!(
                "{} is deployed (stack '{}' has no endpoint output)",
                self.app_name, self.outcome.stack_name
            ),
        }
    }
}
