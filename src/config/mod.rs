//! Configuration module for Stackship
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (STACKSHIP_*)
//! 3. Project config (`<app>/stackship.toml`)
//! 4. User config (~/.config/stackship/config.toml)
//! 5. Built-in defaults (lowest priority)

mod loader;
mod types;

pub use loader::{
    load_layered, load_with_warnings, user_config_path, with_env_overrides,
    with_env_overrides_from, ConfigWarning, PROJECT_CONFIG_FILE,
};
pub use types::{AwsConfig, DeployConfig, StackshipConfig, WaitConfig, DEFAULT_REGION};
