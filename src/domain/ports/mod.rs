//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod clock;
pub mod control_plane;
pub mod deploy_events;
pub mod packager;

pub use clock::Clock;
pub use control_plane::{
    Capability, ControlPlaneError, ControlPlaneResult, IdentityProvider, NetworkDirectory,
    ObjectStore, StackService,
};
pub use deploy_events::{DeployEvent, DeployEventSink, NoopEventSink};
pub use packager::{Packager, BOOTSTRAP_ENTRY};
