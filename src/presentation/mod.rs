//! Presentation Layer
//!
//! This layer handles:
//! - CLI argument parsing (via clap)
//! - Creating the deploy use case with infrastructure dependencies
//!
//! ## Structure
//!
//! - `cli` - Argument definitions
//! - `factory` - Config resolution and dependency injection
//!
//! ## Usage
//!
//! ```ignore
//! use stackship::presentation::factory;
//!
//! let (config, _warnings) = factory::resolve_config(app_path)?;
//! let use_case = factory::create_deploy_use_case(&config);
//! let report = use_case.execute(&options)?;
//! ```

pub mod cli;
pub mod factory;

pub use cli::Cli;
pub use factory::{create_deploy_use_case, create_event_sink, resolve_config};
