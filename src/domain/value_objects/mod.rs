//! Domain Value Objects
//!
//! Immutable, validated values that carry identity derived from content
//! or from the environment being managed.

mod digest;
mod environment_state;
mod store_location;

pub use digest::ContentDigest;
pub use environment_state::EnvironmentState;
pub use store_location::StoreLocation;
