//! Environment State Value Object
//!
//! The reconciler's view of a stack's lifecycle. Provider status strings
//! (`CREATE_COMPLETE`, `UPDATE_ROLLBACK_IN_PROGRESS`, ...) are folded into
//! these states relative to the operation that was submitted.

use std::fmt;

use crate::error::Phase;

/// Lifecycle state of a target environment as observed by the reconciler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvironmentState {
    Absent,
    Present,
    CreateInProgress,
    UpdateInProgress,
    CreateFailed,
    UpdateFailed,
    Stable,
}

impl EnvironmentState {
    /// Classify a provider status after an operation of `phase` was submitted
    ///
    /// Anything still moving (`*_IN_PROGRESS`, including rollbacks that have
    /// not settled yet) maps to the in-progress state of the phase, except
    /// rollbacks during create, which can only end in failure.
    pub fn classify(phase: Phase, status: &str) -> Self {
        match phase {
            Phase::Create => match status {
                "CREATE_COMPLETE" => Self::Stable,
                "CREATE_IN_PROGRESS" | "REVIEW_IN_PROGRESS" => Self::CreateInProgress,
                _ => Self::CreateFailed,
            },
            Phase::Update => match status {
                "UPDATE_COMPLETE" => Self::Stable,
                "UPDATE_FAILED"
                | "UPDATE_ROLLBACK_COMPLETE"
                | "UPDATE_ROLLBACK_FAILED"
                | "ROLLBACK_COMPLETE"
                | "ROLLBACK_FAILED" => Self::UpdateFailed,
                s if s.starts_with("DELETE_") => Self::UpdateFailed,
                s if s.ends_with("_IN_PROGRESS") => Self::UpdateInProgress,
                _ => Self::UpdateFailed,
            },
        }
    }

    /// Whether no further automatic transition will occur
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Stable | Self::CreateFailed | Self::UpdateFailed
        )
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Self::CreateFailed | Self::UpdateFailed)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Absent => "ABSENT",
            Self::Present => "PRESENT",
            Self::CreateInProgress => "CREATE_IN_PROGRESS",
            Self::UpdateInProgress => "UPDATE_IN_PROGRESS",
            Self::CreateFailed => "CREATE_FAILED",
            Self::UpdateFailed => "UPDATE_FAILED",
            Self::Stable => "STABLE",
        }
    }
}

impl fmt::Display for EnvironmentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
