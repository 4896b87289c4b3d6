//! Domain Entities
//!
//! Things with identity that the deploy flow reads or produces.

mod artifact;
mod environment;
mod manifest;
mod template;

pub use artifact::Artifact;
pub use environment::{Convergence, DeploymentOutcome, TargetEnvironment, ENDPOINT_OUTPUT};
pub use manifest::AppManifest;
pub use template::{get_att, reference, Output, Resource, Template};
