//! Application manifest
//!
//! The subset of a Cargo manifest Stackship needs to name things.

/// Application identity read from `Cargo.toml`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppManifest {
    pub name: String,
}

impl AppManifest {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}
