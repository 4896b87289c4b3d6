//! Packager Port
//!
//! Wraps a raw artifact into the container the execution runtime expects.

use std::path::{Path, PathBuf};

use crate::domain::entities::Artifact;
use crate::error::DeployResult;

/// Entry name the Lambda custom runtime executes
pub const BOOTSTRAP_ENTRY: &str = "bootstrap";

pub trait Packager {
    /// Write the delivery archive into `staging_dir` and return its path
    fn package(&self, artifact: &Artifact, staging_dir: &Path) -> DeployResult<PathBuf>;
}
