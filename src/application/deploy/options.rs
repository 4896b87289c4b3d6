//! Deploy Options
//!
//! Per-run settings for the deploy use case, resolved from CLI flags and
//! configuration before the run starts.

use std::path::{Path, PathBuf};

use crate::config::StackshipConfig;
use crate::domain::services::{PollPolicy, DEFAULT_RUNTIME};
use crate::infrastructure::manifest::DEFAULT_BUILD_TARGET;

/// Options for the deploy use case
#[derive(Debug, Clone)]
pub struct DeployOptions {
    /// App directory containing `Cargo.toml`
    pub app_path: PathBuf,
    /// Stack name override (defaults to the package name)
    pub stack_name: Option<String>,
    /// Prebuilt binary to publish instead of the release build output
    pub artifact: Option<PathBuf>,
    /// Rust target triple the release binary was built for
    pub build_target: String,
    /// Region for bucket creation
    pub region: String,
    /// Lambda runtime identifier
    pub runtime: String,
    /// Local copy of the rendered template, if any
    pub template_out: Option<PathBuf>,
    /// Status polling settings
    pub poll_policy: PollPolicy,
}

impl DeployOptions {
    pub fn new(app_path: impl Into<PathBuf>) -> Self {
        Self {
            app_path: app_path.into(),
            stack_name: None,
            artifact: None,
            build_target: DEFAULT_BUILD_TARGET.to_string(),
            region: crate::config::DEFAULT_REGION.to_string(),
            runtime: DEFAULT_RUNTIME.to_string(),
            template_out: None,
            poll_policy: PollPolicy::default(),
        }
    }

    /// Options seeded from a resolved configuration
    pub fn from_config(app_path: impl Into<PathBuf>, config: &StackshipConfig) -> Self {
        Self {
            stack_name: config.deploy.stack_name.clone(),
            build_target: config.deploy.build_target.clone(),
            region: config.aws.region.clone(),
            runtime: config.deploy.runtime.clone(),
            template_out: config.deploy.template_out(),
            poll_policy: config.wait.poll_policy(),
            ..Self::new(app_path)
        }
    }

    pub fn with_stack_name(mut self, name: impl Into<String>) -> Self {
        self.stack_name = Some(name.into());
        self
    }

    pub fn with_artifact(mut self, path: impl Into<PathBuf>) -> Self {
        self.artifact = Some(path.into());
        self
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    pub fn with_template_out(mut self, path: Option<PathBuf>) -> Self {
        self.template_out = path;
        self
    }

    pub fn with_poll_policy(mut self, policy: PollPolicy) -> Self {
        self.poll_policy = policy;
        self
    }

    pub fn app_path(&self) -> &Path {
        &self.app_path
    }

    /// Stack name for this run, falling back to `app_name`
    pub fn resolve_stack_name(&self, app_name: &str) -> String {
        self.stack_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(app_name)
            .to_string()
    }
}
