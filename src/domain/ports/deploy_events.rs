//! Deploy Event Port
//!
//! Provides an observable interface for deploy operations.
//! Enables progress reporting, JSON event streams, and debugging.

use std::path::PathBuf;

use crate::domain::entities::Convergence;
use crate::domain::value_objects::{ContentDigest, StoreLocation};

/// Event emitted during deploy operations
#[derive(Debug, Clone)]
pub enum DeployEvent {
    /// Deploy started
    Started {
        app_path: PathBuf,
        app_name: String,
        stack_name: String,
    },

    /// Artifact digest computed
    Fingerprinted {
        artifact: PathBuf,
        digest: ContentDigest,
        size: u64,
    },

    /// Caller account resolved
    AccountResolved { account_id: String },

    /// Artifact bucket was missing and has been created
    BucketCreated { bucket: String, region: String },

    /// Artifact bucket already existed
    BucketReady { bucket: String },

    /// Artifact archive uploaded
    Uploaded { location: StoreLocation },

    /// Artifact with this digest was already published
    UploadSkipped { location: StoreLocation },

    /// Template rendered (and written locally when `path` is set)
    TemplateRendered { path: Option<PathBuf>, bytes: usize },

    /// Template accepted by the provider's validator
    TemplateValidated,

    /// Stack create submitted
    EnvironmentCreating { name: String },

    /// Stack update submitted
    EnvironmentUpdating { name: String },

    /// Provider reported the stack already matches the template
    NoUpdates { name: String },

    /// Stack still transitioning
    Waiting {
        name: String,
        status: String,
        attempt: u32,
    },

    /// A status poll failed; the wait continues
    PollFailed {
        name: String,
        error: String,
        attempt: u32,
    },

    /// Deploy aborted by an error
    Failed {
        message: String,
        phase: Option<String>,
    },

    /// Deploy completed
    Completed {
        stack_name: String,
        convergence: Convergence,
        url: Option<String>,
    },
}

/// Trait for receiving deploy events
///
/// Implementations can be:
/// - ConsoleEventSink: Progress lines in terminal
/// - JsonEventSink: NDJSON event stream for CI
/// - NoopEventSink: Silent operation
pub trait DeployEventSink: Send + Sync {
    /// Handle a deploy event
    fn on_event(&self, event: DeployEvent);

    /// Check if this sink wants per-poll events
    ///
    /// Some sinks (like CI) may only want summary events.
    fn wants_detailed_events(&self) -> bool {
        true
    }
}

/// No-op event sink for silent operation
pub struct NoopEventSink;

impl DeployEventSink for NoopEventSink {
    fn on_event(&self, _event: DeployEvent) {}

    fn wants_detailed_events(&self) -> bool {
        false
    }
}
