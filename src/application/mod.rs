//! Application Layer
//!
//! Use cases that orchestrate the business flow.
//! This layer:
//! - Depends on Domain layer (entities, services, ports)
//! - Does NOT contain business rules (those are in Domain)
//! - Coordinates between Infrastructure and Domain
//!
//! ## Use Cases
//!
//! - `DeployUseCase` - Fingerprint, publish, render and reconcile one app

pub mod deploy;

pub use deploy::{DeployOptions, DeployReport, DeployUseCase};
