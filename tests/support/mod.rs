//! Test support utilities for confcrypt integration tests.
//!
//! Provides stub backends, log capture and CLI helpers.

#![allow(dead_code)]

pub mod assertions;
pub mod commands;
pub mod events;
pub mod fixtures;
pub mod stubs;

#[allow(unused_imports)]
pub use assertions::*;
#[allow(unused_imports)]
pub use events::*;
#[allow(unused_imports)]
pub use fixtures::*;
#[allow(unused_imports)]
pub use stubs::*;

use confcrypt::ConfigNode;
use tempfile::TempDir;

/// Parse a JSON literal into a tree.
pub fn tree(json: serde_json::Value) -> ConfigNode {
    serde_json::from_value(json).expect("valid config tree")
}

/// Test environment with an isolated temp directory.
///
/// Child processes use `.current_dir()` so tests can run in parallel.
pub struct Test {
    /// Temporary directory holding input documents
    pub dir: TempDir,
}

impl Test {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        Self { dir }
    }
}
