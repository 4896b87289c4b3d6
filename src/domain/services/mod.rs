//! Domain Services
//!
//! Publication and reconciliation logic. Services talk to the outside
//! world only through ports.

pub mod artifact_store;
pub mod fingerprinter;
pub mod reconciler;
pub mod template_builder;

pub use artifact_store::{ArtifactStore, BucketStatus, Publication};
pub use fingerprinter::{ContentFingerprinter, DEFAULT_CHUNK_SIZE};
pub use reconciler::{is_no_op_update, EnvironmentReconciler, PollPolicy, NO_UPDATES_MESSAGE};
pub use template_builder::{TemplateBuilder, DEFAULT_RUNTIME};
