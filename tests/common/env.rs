//! Test environment builder for isolated Stackship testing.
//!
//! Provides `TestEnv` - a temp directory holding the sample app, a fake
//! home directory and a stub `aws` executable, plus helpers to run the
//! stackship binary against them.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

use super::fixtures::{APP_MANIFEST, STUB_AWS};

/// Result of running a Stackship CLI command
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    /// Combine stdout and stderr
    pub fn combined_output(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }
}

/// Isolated test environment with temp directories.
pub struct TestEnv {
    root: TempDir,
    extra_env: Vec<(String, String)>,
}

impl TestEnv {
    /// Sample app with a built release binary and a stub `aws` on disk
    pub fn new() -> Self {
        let root = tempfile::tempdir().unwrap();
        let env = Self {
            root,
            extra_env: Vec::new(),
        };

        fs::create_dir_all(env.app_path()).unwrap();
        fs::write(env.app_path().join("Cargo.toml"), APP_MANIFEST).unwrap();
        env.write_binary(b"\x7fELF myapp v1");

        fs::create_dir_all(env.state_dir().join("buckets")).unwrap();
        fs::create_dir_all(env.state_dir().join("stacks")).unwrap();
        fs::create_dir_all(env.home()).unwrap();
        write_executable(&env.stub_path(), STUB_AWS);

        env
    }

    pub fn with_env(mut self, key: &str, value: &str) -> Self {
        self.extra_env.push((key.to_string(), value.to_string()));
        self
    }

    pub fn root(&self) -> &Path {
        self.root.path()
    }

    pub fn app_path(&self) -> PathBuf {
        self.root().join("myapp")
    }

    pub fn state_dir(&self) -> PathBuf {
        self.root().join("aws-state")
    }

    pub fn home(&self) -> PathBuf {
        self.root().join("home")
    }

    pub fn stub_path(&self) -> PathBuf {
        self.root().join("bin").join("aws")
    }

    /// Replace the release binary
    pub fn write_binary(&self, bytes: &[u8]) {
        let release = self
            .app_path()
            .join("target/x86_64-unknown-linux-musl/release");
        fs::create_dir_all(&release).unwrap();
        fs::write(release.join("myapp"), bytes).unwrap();
    }

    /// Every stub invocation so far, one per line
    pub fn calls(&self) -> Vec<String> {
        fs::read_to_string(self.state_dir().join("calls.log"))
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }

    /// Number of stub calls whose arguments contain `needle`
    pub fn count_calls(&self, needle: &str) -> usize {
        self.calls().iter().filter(|c| c.contains(needle)).count()
    }

    /// Objects stored in `bucket`
    pub fn objects(&self, bucket: &str) -> Vec<String> {
        let dir = self.state_dir().join("buckets").join(bucket);
        let mut names: Vec<String> = fs::read_dir(dir)
            .map(|entries| {
                entries
                    .filter_map(|e| e.ok())
                    .map(|e| e.file_name().to_string_lossy().to_string())
                    .collect()
            })
            .unwrap_or_default();
        names.sort();
        names
    }

    /// Run stackship from the temp root with `args`
    pub fn run(&self, args: &[&str]) -> TestResult {
        let bin = env!("CARGO_BIN_EXE_stackship");
        let mut cmd = Command::new(bin);
        cmd.current_dir(self.root())
            .args(args)
            .env("HOME", self.home())
            .env("XDG_CONFIG_HOME", self.home().join(".config"))
            .env("STACKSHIP_AWS_CLI", self.stub_path())
            .env("STUB_STATE", self.state_dir())
            .env("NO_COLOR", "1")
            .env_remove("STACKSHIP_REGION")
            .env_remove("STACKSHIP_PROFILE")
            .env_remove("STACKSHIP_STACK_NAME");

        for (key, value) in &self.extra_env {
            cmd.env(key, value);
        }

        to_result(cmd.output().expect("Failed to execute stackship"))
    }

    /// Deploy the sample app
    pub fn deploy(&self, extra: &[&str]) -> TestResult {
        let app = self.app_path();
        let mut args = vec![app.to_str().unwrap()];
        args.extend_from_slice(extra);
        self.run(&args)
    }
}

fn to_result(output: Output) -> TestResult {
    TestResult {
        success: output.status.success(),
        exit_code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    }
}

#[cfg(unix)]
fn write_executable(path: &Path, content: &str) {
    use std::os::unix::fs::PermissionsExt;

    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
    fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
}

#[cfg(not(unix))]
fn write_executable(path: &Path, content: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}
