//! Common test utilities for Stackship CLI and scenario tests.
//!
//! This module provides:
//! - `TestEnv`: Isolated app directory, home directory and stub `aws` CLI
//! - Fixtures: Manifest and stub script content

#![allow(dead_code)]

pub mod env;
pub mod fixtures;

pub use env::*;
pub use fixtures::*;
