//! Console Event Sink
//!
//! Human-readable progress lines for interactive runs.

use crate::domain::ports::{DeployEvent, DeployEventSink};
use crossterm::style::Stylize;
use is_terminal::IsTerminal;
use std::io::{self, Write};
use std::sync::Mutex;

const SUCCESS: &str = "✓";
const WARNING: &str = "⚠";
const PROGRESS: &str = "●";
const ERROR: &str = "✗";

/// Event sink that prints progress for humans
pub struct ConsoleEventSink {
    writer: Mutex<Box<dyn Write + Send>>,
    verbose: u8,
    color: bool,
}

impl ConsoleEventSink {
    /// Console sink on stderr, colored when stderr is a terminal and `NO_COLOR` is unset
    pub fn stderr(verbose: u8) -> Self {
        let color = io::stderr().is_terminal() && std::env::var_os("NO_COLOR").is_none();
        Self {
            writer: Mutex::new(Box::new(io::stderr())),
            verbose,
            color,
        }
    }

    /// Uncolored sink on a custom writer (for testing)
    pub fn with_writer<W: Write + Send + 'static>(writer: W, verbose: u8) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
            verbose,
            color: false,
        }
    }

    fn icon(&self, icon: &'static str) -> String {
        if !self.color {
            return icon.to_string();
        }
        match icon {
            SUCCESS => icon.green().to_string(),
            WARNING => icon.yellow().to_string(),
            ERROR => icon.red().to_string(),
            _ => icon.cyan().to_string(),
        }
    }

    fn dim(&self, text: &str) -> String {
        if self.color {
            text.dark_grey().to_string()
        } else {
            text.to_string()
        }
    }

    fn line(&self, icon: &'static str, text: String) {
        let rendered = format!("{} {}", self.icon(icon), text);
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", rendered);
            let _ = writer.flush();
        }
    }

    fn render(&self, event: DeployEvent) {
        match event {
            DeployEvent::Started {
                app_name,
                stack_name,
                ..
            } => self.line(
                PROGRESS,
                format!("Deploying {} to stack '{}'", app_name, stack_name),
            ),
            DeployEvent::Fingerprinted {
                artifact,
                digest,
                size,
            } => self.line(
                SUCCESS,
                format!(
                    "Fingerprinted {} {}",
                    artifact.display(),
                    self.dim(&format!("({} bytes, {})", size, digest.short()))
                ),
            ),
            DeployEvent::AccountResolved { account_id } => {
                if self.verbose > 0 {
                    self.line(PROGRESS, format!("Account {}", account_id));
                }
            }
            DeployEvent::BucketCreated { bucket, region } => {
                self.line(SUCCESS, format!("Created bucket {} in {}", bucket, region))
            }
            DeployEvent::BucketReady { bucket } => {
                if self.verbose > 0 {
                    self.line(SUCCESS, format!("Bucket {} exists", bucket));
                }
            }
            DeployEvent::Uploaded { location } => {
                self.line(SUCCESS, format!("Uploaded {}", location))
            }
            DeployEvent::UploadSkipped { location } => self.line(
                SUCCESS,
                format!("{} already published {}", location, self.dim("(skipped)")),
            ),
            DeployEvent::TemplateRendered { path, bytes } => {
                if let Some(path) = path {
                    self.line(
                        SUCCESS,
                        format!(
                            "Wrote template {} {}",
                            path.display(),
                            self.dim(&format!("({} bytes)", bytes))
                        ),
                    );
                }
            }
            DeployEvent::TemplateValidated => {
                if self.verbose > 0 {
                    self.line(SUCCESS, "Template validated".to_string());
                }
            }
            DeployEvent::EnvironmentCreating { name } => {
                self.line(PROGRESS, format!("Creating stack '{}'", name))
            }
            DeployEvent::EnvironmentUpdating { name } => {
                self.line(PROGRESS, format!("Updating stack '{}'", name))
            }
            DeployEvent::NoUpdates { name } => self.line(
                SUCCESS,
                format!("Stack '{}' is up to date {}", name, self.dim("(no changes)")),
            ),
            DeployEvent::Waiting {
                name,
                status,
                attempt,
            } => {
                if self.verbose > 0 {
                    self.line(
                        PROGRESS,
                        format!("{} {} {}", name, status, self.dim(&format!("#{}", attempt))),
                    );
                }
            }
            DeployEvent::PollFailed {
                name,
                error,
                attempt,
            } => {
                if self.verbose > 0 {
                    self.line(
                        WARNING,
                        format!("status check #{} for '{}' failed: {}", attempt, name, error),
                    );
                }
            }
            // The binary prints the error itself
            DeployEvent::Failed { .. } => {}
            DeployEvent::Completed {
                stack_name,
                convergence,
                ..
            } => self.line(
                SUCCESS,
                format!("Stack '{}' {}", stack_name, convergence.as_str()),
            ),
        }
    }
}

impl DeployEventSink for ConsoleEventSink {
    fn on_event(&self, event: DeployEvent) {
        self.render(event);
    }

    fn wants_detailed_events(&self) -> bool {
        self.verbose > 0
    }
}
