//! Error types for Stackship
//!
//! Uses `thiserror` for library errors; the binary wraps them in `anyhow`.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

use crate::domain::ports::ControlPlaneError;

/// Result type alias for Stackship operations
pub type DeployResult<T> = Result<T, DeployError>;

/// Which mutation the reconciler was performing when it failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Create,
    Update,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Create => "create",
            Phase::Update => "update",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Main error type for Stackship operations
#[derive(Error, Debug)]
pub enum DeployError {
    /// Local file could not be read or written
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Cargo manifest is missing a usable package name
    #[error("invalid manifest {path}: {message}")]
    Manifest { path: PathBuf, message: String },

    /// Caller identity lookup failed
    #[error("failed to resolve account identity: {0}")]
    Identity(#[source] ControlPlaneError),

    /// Bucket or object operation failed for a reason other than absence
    #[error("storage error during {operation}: {source}")]
    Storage {
        operation: &'static str,
        #[source]
        source: ControlPlaneError,
    },

    /// A read-only control-plane query failed
    #[error("control plane error during {operation}: {source}")]
    ControlPlane {
        operation: &'static str,
        #[source]
        source: ControlPlaneError,
    },

    /// Template could not be rendered, written or validated
    #[error("template error: {0}")]
    Template(String),

    /// Stack create or update did not reach a successful terminal state
    #[error("{phase} failed for stack '{stack}': {message}")]
    Reconciliation {
        phase: Phase,
        stack: String,
        message: String,
    },

    /// Configuration file could not be parsed
    #[error("invalid config {path}: {message}")]
    Config { path: PathBuf, message: String },
}

impl DeployError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn storage(operation: &'static str, source: ControlPlaneError) -> Self {
        Self::Storage { operation, source }
    }

    pub(crate) fn control_plane(operation: &'static str, source: ControlPlaneError) -> Self {
        Self::ControlPlane { operation, source }
    }

    pub(crate) fn reconciliation(
        phase: Phase,
        stack: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Reconciliation {
            phase,
            stack: stack.into(),
            message: message.into(),
        }
    }

    /// Phase of a failed reconciliation, if this is one
    pub fn phase(&self) -> Option<Phase> {
        match self {
            Self::Reconciliation { phase, .. } => Some(*phase),
            _ => None,
        }
    }
}
