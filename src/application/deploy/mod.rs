//! Deploy Module
//!
//! Orchestrates one deployment of a Rust Lambda app.
//!
//! ## Structure
//!
//! - `options` - Per-run settings (`DeployOptions`)
//! - `result` - Run summary (`DeployReport`)
//! - `use_case` - The pipeline itself (`DeployUseCase`)
//!
//! ## Usage
//!
//! ```ignore
//! use stackship::application::deploy::{DeployOptions, DeployUseCase};
//!
//! let use_case = DeployUseCase::new(identity, objects, network, stacks, packager, clock);
//! let report = use_case.execute(&DeployOptions::new("apps/myapp"))?;
//! println!("{}", report.outcome.url().unwrap_or_default());
//! ```

mod options;
mod result;
mod use_case;

pub use options::DeployOptions;
pub use result::DeployReport;
pub use use_case::DeployUseCase;
