//! Configuration loading

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{DeployError, DeployResult};

use super::types::StackshipConfig;

/// File name of the per-app config, next to the app's `Cargo.toml`
pub const PROJECT_CONFIG_FILE: &str = "stackship.toml";

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    /// Dotted path of the unknown key, e.g. `wait.interval`
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

impl std::fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown config key '{}' in {}", self.key, self.file.display())?;
        if let Some(line) = self.line {
            write!(f, ":{}", line)?;
        }
        if let Some(suggestion) = &self.suggestion {
            write!(f, " (did you mean '{}'?)", suggestion)?;
        }
        Ok(())
    }
}

/// Load one config file and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> DeployResult<(StackshipConfig, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path).map_err(|e| DeployError::io(path, e))?;
    let (config, warnings) = parse_with_warnings(path, &content)?;
    Ok((config, warnings))
}

/// Merge the user and project config files (project wins per key).
///
/// Missing files are skipped. Environment overrides are not applied here.
pub fn load_layered(
    user_config: Option<&Path>,
    project_dir: Option<&Path>,
) -> DeployResult<(StackshipConfig, Vec<ConfigWarning>)> {
    let project_config = project_dir.map(|dir| dir.join(PROJECT_CONFIG_FILE));
    let layers = [user_config.map(Path::to_path_buf), project_config];

    let mut merged = toml::Table::new();
    let mut warnings = Vec::new();

    for path in layers.into_iter().flatten() {
        if !path.is_file() {
            continue;
        }
        let content = fs::read_to_string(&path).map_err(|e| DeployError::io(&path, e))?;
        let (_, mut file_warnings) = parse_with_warnings(&path, &content)?;
        warnings.append(&mut file_warnings);

        let table: toml::Table = content.parse().map_err(|e: toml::de::Error| {
            DeployError::Config {
                path: path.clone(),
                message: e.to_string(),
            }
        })?;
        merge_tables(&mut merged, table);
    }

    let config: StackshipConfig = toml::Value::Table(merged)
        .try_into()
        .map_err(|e: toml::de::Error| DeployError::Config {
            path: PathBuf::from(PROJECT_CONFIG_FILE),
            message: e.to_string(),
        })?;

    Ok((config, warnings))
}

/// User config location (`~/.config/stackship/config.toml` on Linux)
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("stackship").join("config.toml"))
}

/// Apply environment variable overrides (STACKSHIP_* prefix)
pub fn with_env_overrides(config: StackshipConfig) -> StackshipConfig {
    with_env_overrides_from(config, |key| std::env::var(key).ok())
}

/// Apply overrides from an arbitrary variable lookup; empty values are ignored
pub fn with_env_overrides_from(
    mut config: StackshipConfig,
    get_env: impl Fn(&str) -> Option<String>,
) -> StackshipConfig {
    let get = |key: &str| get_env(key).filter(|v| !v.trim().is_empty());

    if let Some(region) = get("STACKSHIP_REGION") {
        config.aws.region = region;
    }
    if let Some(profile) = get("STACKSHIP_PROFILE") {
        config.aws.profile = Some(profile);
    }
    if let Some(cli) = get("STACKSHIP_AWS_CLI") {
        config.aws.cli = cli;
    }
    if let Some(stack_name) = get("STACKSHIP_STACK_NAME") {
        config.deploy.stack_name = Some(stack_name);
    }

    config
}

fn parse_with_warnings(
    path: &Path,
    content: &str,
) -> DeployResult<(StackshipConfig, Vec<ConfigWarning>)> {
    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(content);

    let config: StackshipConfig = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| DeployError::Config {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|key| {
            let leaf = key.rsplit('.').next().unwrap_or(key.as_str()).to_string();
            ConfigWarning {
                file: path.to_path_buf(),
                line: find_line_number(content, &leaf),
                suggestion: suggest_key(&leaf),
                key,
            }
        })
        .collect();

    Ok((config, warnings))
}

fn merge_tables(base: &mut toml::Table, overlay: toml::Table) {
    for (key, value) in overlay {
        match (base.get_mut(&key), value) {
            (Some(toml::Value::Table(existing)), toml::Value::Table(incoming)) => {
                merge_tables(existing, incoming);
            }
            (_, value) => {
                base.insert(key, value);
            }
        }
    }
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    content
        .lines()
        .position(|line| line.trim_start().starts_with(needle))
        .map(|i| i + 1)
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "aws",
        "region",
        "profile",
        "cli",
        "deploy",
        "stack_name",
        "build_target",
        "template_out",
        "runtime",
        "wait",
        "initial_interval_secs",
        "max_interval_secs",
        "max_attempts",
    ];

    CANDIDATES
        .iter()
        .map(|candidate| (*candidate, levenshtein(unknown, candidate)))
        .min_by_key(|(_, dist)| *dist)
        .filter(|(_, dist)| *dist <= 2)
        .map(|(candidate, _)| candidate.to_string())
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = usize::from(ac != bc);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}
