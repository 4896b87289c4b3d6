//! Stackship - deploy Rust Lambda apps with CloudFormation
//!
//! Stackship publishes a release binary to a content-addressed S3 bucket,
//! renders a stack template around it, and converges the named stack to
//! that template. Re-running a deploy with an unchanged binary uploads
//! nothing and leaves the stack untouched.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod presentation;

// Re-exports for convenience
pub use application::deploy::{DeployOptions, DeployReport, DeployUseCase};
pub use config::StackshipConfig;
pub use domain::services::{ArtifactStore, ContentFingerprinter, EnvironmentReconciler};
pub use domain::value_objects::{ContentDigest, StoreLocation};
pub use error::{DeployError, DeployResult, Phase};
