//! CLI Argument Parsing
//!
//! This module defines the CLI interface using clap. There are no
//! subcommands: every invocation deploys one app.

use std::path::PathBuf;

use clap::Parser;

use crate::config::StackshipConfig;

/// Stackship - deploy a Rust Lambda app behind a load balancer
#[derive(Parser, Debug)]
#[command(name = "stackship")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "Build the app first, e.g. 'cargo build --release --target x86_64-unknown-linux-musl'.")]
pub struct Cli {
    /// Path to the app (directory containing Cargo.toml)
    pub app_path: PathBuf,

    /// Stack name (defaults to the package name)
    #[arg(long)]
    pub stack_name: Option<String>,

    /// Deploy this binary instead of the release build output
    #[arg(long)]
    pub artifact: Option<PathBuf>,

    /// Region for the artifact bucket and stack
    #[arg(long)]
    pub region: Option<String>,

    /// Named AWS CLI profile
    #[arg(long)]
    pub profile: Option<String>,

    /// Where to write the rendered template (empty to skip)
    #[arg(long, value_name = "PATH")]
    pub template_out: Option<String>,

    /// Output format for CI
    #[arg(long)]
    pub json: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Apply flags on top of the loaded configuration
    pub fn apply_to(&self, config: &mut StackshipConfig) {
        if let Some(name) = &self.stack_name {
            config.deploy.stack_name = Some(name.clone());
        }
        if let Some(region) = &self.region {
            config.aws.region = region.clone();
        }
        if let Some(profile) = &self.profile {
            config.aws.profile = Some(profile.clone());
        }
        if let Some(path) = &self.template_out {
            config.deploy.template_out = PathBuf::from(path);
        }
    }
}
