//! Configuration type definitions

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::services::{PollPolicy, DEFAULT_RUNTIME};
use crate::infrastructure::manifest::DEFAULT_BUILD_TARGET;

/// Region used when neither config nor environment names one
pub const DEFAULT_REGION: &str = "eu-west-2";

/// `[aws]` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AwsConfig {
    #[serde(default = "default_region")]
    pub region: String,

    #[serde(default)]
    pub profile: Option<String>,

    /// Program invoked for every control-plane call
    #[serde(default = "default_cli")]
    pub cli: String,
}

impl Default for AwsConfig {
    fn default() -> Self {
        Self {
            region: default_region(),
            profile: None,
            cli: default_cli(),
        }
    }
}

fn default_region() -> String {
    DEFAULT_REGION.to_string()
}

fn default_cli() -> String {
    "aws".to_string()
}

/// `[deploy]` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeployConfig {
    /// Stack name; the package name when unset
    #[serde(default)]
    pub stack_name: Option<String>,

    #[serde(default = "default_build_target")]
    pub build_target: String,

    /// Where the rendered template is written; an empty path disables the copy
    #[serde(default = "default_template_out")]
    pub template_out: PathBuf,

    #[serde(default = "default_runtime")]
    pub runtime: String,
}

impl Default for DeployConfig {
    fn default() -> Self {
        Self {
            stack_name: None,
            build_target: default_build_target(),
            template_out: default_template_out(),
            runtime: default_runtime(),
        }
    }
}

impl DeployConfig {
    /// Template output path, `None` when disabled
    pub fn template_out(&self) -> Option<PathBuf> {
        if self.template_out.as_os_str().is_empty() {
            None
        } else {
            Some(self.template_out.clone())
        }
    }
}

fn default_build_target() -> String {
    DEFAULT_BUILD_TARGET.to_string()
}

fn default_template_out() -> PathBuf {
    PathBuf::from("cloud.json")
}

fn default_runtime() -> String {
    DEFAULT_RUNTIME.to_string()
}

/// `[wait]` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaitConfig {
    #[serde(default = "default_initial_interval")]
    pub initial_interval_secs: u64,

    #[serde(default = "default_max_interval")]
    pub max_interval_secs: u64,

    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
}

impl Default for WaitConfig {
    fn default() -> Self {
        Self {
            initial_interval_secs: default_initial_interval(),
            max_interval_secs: default_max_interval(),
            max_attempts: default_max_attempts(),
        }
    }
}

impl WaitConfig {
    pub fn poll_policy(&self) -> PollPolicy {
        let initial = Duration::from_secs(self.initial_interval_secs);
        PollPolicy {
            initial_interval: initial,
            max_interval: Duration::from_secs(self.max_interval_secs).max(initial),
            max_attempts: self.max_attempts.max(1),
            ..PollPolicy::default()
        }
    }
}

fn default_initial_interval() -> u64 {
    5
}

fn default_max_interval() -> u64 {
    30
}

fn default_max_attempts() -> u32 {
    720
}

/// Full configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackshipConfig {
    #[serde(default)]
    pub aws: AwsConfig,

    #[serde(default)]
    pub deploy: DeployConfig,

    #[serde(default)]
    pub wait: WaitConfig,
}
