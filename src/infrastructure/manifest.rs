//! Cargo manifest reader and build artifact locator

use std::path::{Path, PathBuf};

use crate::domain::entities::{AppManifest, Artifact};
use crate::error::{DeployError, DeployResult};

/// Target triple Lambda custom runtimes are built for
pub const DEFAULT_BUILD_TARGET: &str = "x86_64-unknown-linux-musl";

/// Read `package.name` from `<app_path>/Cargo.toml`
pub fn read_manifest(app_path: &Path) -> DeployResult<AppManifest> {
    let path = app_path.join("Cargo.toml");
    let content = std::fs::read_to_string(&path).map_err(|e| DeployError::io(&path, e))?;
    parse_manifest(&path, &content)
}

fn parse_manifest(path: &Path, content: &str) -> DeployResult<AppManifest> {
    let value: toml::Value = toml::from_str(content).map_err(|e| DeployError::Manifest {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let name = value
        .get("package")
        .and_then(|p| p.get("name"))
        .and_then(|n| n.as_str())
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .ok_or_else(|| DeployError::Manifest {
            path: path.to_path_buf(),
            message: "missing string field 'package.name'".to_string(),
        })?;

    Ok(AppManifest::new(name))
}

/// Release binary path for `manifest` under `app_path`
pub fn artifact_path(app_path: &Path, manifest: &AppManifest, build_target: &str) -> PathBuf {
    app_path
        .join("target")
        .join(build_target)
        .join("release")
        .join(&manifest.name)
}

/// Open the release binary, or `explicit` when the caller supplied one
pub fn locate_artifact(
    app_path: &Path,
    manifest: &AppManifest,
    build_target: &str,
    explicit: Option<&Path>,
) -> DeployResult<Artifact> {
    match explicit {
        Some(path) => Artifact::open(path),
        None => Artifact::open(artifact_path(app_path, manifest, build_target)),
    }
}
