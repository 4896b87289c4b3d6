//! Use Case Factory
//!
//! Creates the deploy use case with infrastructure dependencies wired up.
//! This is the dependency injection point for the binary.

use std::path::Path;
use std::sync::Arc;

use crate::application::deploy::DeployUseCase;
use crate::config::{
    load_layered, user_config_path, with_env_overrides, ConfigWarning, StackshipConfig,
};
use crate::domain::ports::DeployEventSink;
use crate::error::DeployResult;
use crate::infrastructure::events::{ConsoleEventSink, JsonEventSink};
use crate::infrastructure::{AwsCli, SystemClock, ZipPackager};

/// Type alias for the concrete DeployUseCase with all dependencies
pub type ConcreteDeployUseCase =
    DeployUseCase<AwsCli, AwsCli, AwsCli, AwsCli, ZipPackager, SystemClock>;

/// Load user and project config, then apply `STACKSHIP_*` overrides
pub fn resolve_config(app_path: &Path) -> DeployResult<(StackshipConfig, Vec<ConfigWarning>)> {
    let user_config = user_config_path();
    let (config, warnings) = load_layered(user_config.as_deref(), Some(app_path))?;
    Ok((with_env_overrides(config), warnings))
}

/// Create a deploy use case talking to the `aws` CLI named in `config`
pub fn create_deploy_use_case(config: &StackshipConfig) -> ConcreteDeployUseCase {
    let cli = AwsCli::new(config.aws.cli.clone())
        .with_region(Some(config.aws.region.clone()))
        .with_profile(config.aws.profile.clone());

    DeployUseCase::new(
        cli.clone(),
        cli.clone(),
        cli.clone(),
        cli,
        ZipPackager,
        SystemClock,
    )
}

/// Event sink for the requested output mode
pub fn create_event_sink(json: bool, verbose: u8) -> Arc<dyn DeployEventSink> {
    if json {
        Arc::new(JsonEventSink::stdout())
    } else {
        Arc::new(ConsoleEventSink::stderr(verbose))
    }
}
