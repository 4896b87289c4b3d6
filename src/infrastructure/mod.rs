//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `aws_cli/` - Every control-plane port, backed by the `aws` executable
//! - `events/` - Console and NDJSON event sinks
//! - `manifest` - Cargo manifest reading and release binary lookup
//! - `packaging` - Zip packaging for the custom runtime
//! - `clock` - Wall-clock sleeping

pub mod aws_cli;
pub mod clock;
pub mod events;
pub mod manifest;
pub mod packaging;

// Re-export for convenience
pub use aws_cli::AwsCli;
pub use clock::SystemClock;
pub use events::{ConsoleEventSink, JsonEventSink};
pub use packaging::ZipPackager;
