//! JSON Event Sink
//!
//! Outputs deploy events as NDJSON for CI/automation consumption.

use crate::domain::ports::{DeployEvent, DeployEventSink};
use std::io::{self, Write};
use std::sync::Mutex;

/// Event sink that outputs NDJSON events to stdout
pub struct JsonEventSink {
    /// Mutex to ensure thread-safe writes
    writer: Mutex<Box<dyn Write + Send>>,
}

impl JsonEventSink {
    /// Create a new JSON event sink writing to stdout
    pub fn stdout() -> Self {
        Self {
            writer: Mutex::new(Box::new(io::stdout())),
        }
    }

    /// Create a JSON event sink writing to a custom writer (for testing)
    pub fn with_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
        }
    }

    fn write_event(&self, mut event: serde_json::Value) {
        if let Some(obj) = event.as_object_mut() {
            obj.insert(
                "timestamp".to_string(),
                serde_json::Value::String(chrono::Utc::now().to_rfc3339()),
            );
        }
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", event);
            let _ = writer.flush();
        }
    }
}

/// JSON form of an event
fn event_json(event: DeployEvent) -> serde_json::Value {
    match event {
        DeployEvent::Started {
            app_path,
            app_name,
            stack_name,
        } => serde_json::json!({
            "event": "start",
            "command": "deploy",
            "app_path": app_path.display().to_string(),
            "app": app_name,
            "stack": stack_name,
        }),

        DeployEvent::Fingerprinted {
            artifact,
            digest,
            size,
        } => serde_json::json!({
            "event": "fingerprinted",
            "artifact": artifact.display().to_string(),
            "digest": digest.as_str(),
            "size": size,
        }),

        DeployEvent::AccountResolved { account_id } => serde_json::json!({
            "event": "account",
            "account_id": account_id,
        }),

        DeployEvent::BucketCreated { bucket, region } => serde_json::json!({
            "event": "bucket",
            "bucket": bucket,
            "created": true,
            "region": region,
        }),

        DeployEvent::BucketReady { bucket } => serde_json::json!({
            "event": "bucket",
            "bucket": bucket,
            "created": false,
        }),

        DeployEvent::Uploaded { location } => serde_json::json!({
            "event": "artifact",
            "bucket": location.bucket(),
            "key": location.key().as_str(),
            "uploaded": true,
        }),

        DeployEvent::UploadSkipped { location } => serde_json::json!({
            "event": "artifact",
            "bucket": location.bucket(),
            "key": location.key().as_str(),
            "uploaded": false,
        }),

        DeployEvent::TemplateRendered { path, bytes } => serde_json::json!({
            "event": "template",
            "path": path.map(|p| p.display().to_string()),
            "bytes": bytes,
        }),

        DeployEvent::TemplateValidated => serde_json::json!({
            "event": "template_validated",
        }),

        DeployEvent::EnvironmentCreating { name } => serde_json::json!({
            "event": "stack_submit",
            "stack": name,
            "operation": "create",
        }),

        DeployEvent::EnvironmentUpdating { name } => serde_json::json!({
            "event": "stack_submit",
            "stack": name,
            "operation": "update",
        }),

        DeployEvent::NoUpdates { name } => serde_json::json!({
            "event": "stack_unchanged",
            "stack": name,
        }),

        DeployEvent::Waiting {
            name,
            status,
            attempt,
        } => serde_json::json!({
            "event": "stack_wait",
            "stack": name,
            "status": status,
            "attempt": attempt,
        }),

        DeployEvent::PollFailed {
            name,
            error,
            attempt,
        } => serde_json::json!({
            "event": "stack_poll_error",
            "stack": name,
            "error": error,
            "attempt": attempt,
        }),

        DeployEvent::Failed { message, phase } => serde_json::json!({
            "event": "error",
            "command": "deploy",
            "phase": phase,
            "message": message,
        }),

        DeployEvent::Completed {
            stack_name,
            convergence,
            url,
        } => serde_json::json!({
            "event": "complete",
            "command": "deploy",
            "status": "success",
            "stack": stack_name,
            "convergence": convergence.as_str(),
            "url": url,
        }),
    }
}

impl DeployEventSink for JsonEventSink {
    fn on_event(&self, event: DeployEvent) {
        self.write_event(event_json(event));
    }

    fn wants_detailed_events(&self) -> bool {
        true // JSON mode wants all events
    }
}
