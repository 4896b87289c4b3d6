//! Stackship CLI - deploy a Rust Lambda app behind a load balancer
//!
//! Usage: stackship <APP_PATH> [--stack-name NAME] [--json] [-v...]

use anyhow::{Context, Result};
use clap::Parser;

use stackship::application::deploy::DeployOptions;
use stackship::presentation::{create_deploy_use_case, create_event_sink, resolve_config, Cli};

fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(&cli) {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let (mut config, warnings) =
        resolve_config(&cli.app_path).context("failed to load configuration")?;
    cli.apply_to(&mut config);

    if !cli.json {
        for warning in &warnings {
            eprintln!("⚠ {}", warning);
        }
    }

    let mut options = DeployOptions::from_config(&cli.app_path, &config);
    if let Some(artifact) = &cli.artifact {
        options = options.with_artifact(artifact);
    }

    let events = create_event_sink(cli.json, cli.verbose);
    let report = create_deploy_use_case(&config)
        .execute_with_events(&options, events)
        .with_context(|| format!("deploy of {} failed", cli.app_path.display()))?;

    if !cli.json {
        println!("{}", report.summary());
    }
    Ok(())
}
