//! AWS CLI Control Plane
//!
//! Implements every control-plane port by shelling out to the `aws`
//! command-line tool, the same way remote sync shells out to `ssh`.
//! Responses are requested as JSON and parsed with `serde_json`; service
//! errors are recovered from the CLI's stderr.

mod cloudformation;
mod ec2;
mod s3;
mod sts;

use std::ffi::OsStr;
use std::process::{Command, Stdio};

use crate::domain::ports::{ControlPlaneError, ControlPlaneResult};

/// Default executable name
pub const DEFAULT_PROGRAM: &str = "aws";

/// Control plane backed by the `aws` executable
#[derive(Debug, Clone)]
pub struct AwsCli {
    program: String,
    region: Option<String>,
    profile: Option<String>,
}

impl Default for AwsCli {
    fn default() -> Self {
        Self::new(DEFAULT_PROGRAM)
    }
}

impl AwsCli {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            region: None,
            profile: None,
        }
    }

    pub fn with_region(mut self, region: Option<String>) -> Self {
        self.region = region;
        self
    }

    pub fn with_profile(mut self, profile: Option<String>) -> Self {
        self.profile = profile;
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Arguments prepended to every invocation
    fn global_args(&self) -> Vec<String> {
        let mut args = vec!["--output".to_string(), "json".to_string()];
        if let Some(region) = &self.region {
            args.push("--region".to_string());
            args.push(region.clone());
        }
        if let Some(profile) = &self.profile {
            args.push("--profile".to_string());
            args.push(profile.clone());
        }
        args
    }

    /// Run one CLI command, returning stdout on success
    fn run<I, S>(&self, args: I) -> ControlPlaneResult<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let output = Command::new(&self.program)
            .args(self.global_args())
            .args(args)
            .env("AWS_PAGER", "")
            .stdin(Stdio::null())
            .output()
            .map_err(|e| {
                ControlPlaneError::Transport(format!("failed to run {}: {}", self.program, e))
            })?;

        if !output.status.success() {
            return Err(parse_cli_error(&String::from_utf8_lossy(&output.stderr)));
        }

        String::from_utf8(output.stdout)
            .map_err(|e| ControlPlaneError::Malformed(format!("non UTF-8 output: {}", e)))
    }

    /// Run a command and parse its stdout as JSON
    fn run_json<T, I, S>(&self, args: I) -> ControlPlaneResult<T>
    where
        T: serde::de::DeserializeOwned,
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let stdout = self.run(args)?;
        serde_json::from_str(&stdout).map_err(|e| ControlPlaneError::Malformed(e.to_string()))
    }
}

/// Error codes the CLI reports for a missing bucket or object
const NOT_FOUND_CODES: &[&str] = &["404", "NoSuchBucket", "NoSuchKey", "NotFound"];

/// Recover a service error from CLI stderr
///
/// Service errors look like:
/// `An error occurred (ValidationError) when calling the UpdateStack operation: <message>`
pub(crate) fn parse_cli_error(stderr: &str) -> ControlPlaneError {
    const MARKER: &str = "An error occurred (";

    let text = stderr.trim();
    if let Some(start) = text.find(MARKER) {
        let rest = &text[start + MARKER.len()..];
        if let Some(end) = rest.find(')') {
            let code = &rest[..end];
            if NOT_FOUND_CODES.contains(&code) {
                return ControlPlaneError::NotFound;
            }
            let message = rest[end + 1..]
                .split_once(": ")
                .map(|(_, m)| m.trim())
                .unwrap_or("");
            return ControlPlaneError::rejected(code, message);
        }
    }

    ControlPlaneError::rejected("CliError", text)
}
