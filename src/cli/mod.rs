//! CLI command handlers for KeyKit.
//!
//! Headless access to the keyboard core for diagnostics: replaying touch
//! scripts and listing faces.

pub mod faces;
pub mod replay;

use anyhow::Result;
use std::path::Path;
use tracing::info;

use crate::services::FaceRegistry;

// Re-export types used by main.rs and tests
pub use faces::FacesArgs;
pub use replay::{replay, ReplayArgs, ReplayOutcome, ReplayScript, ReplayStep};

/// Builds the face registry: built-in faces plus those in `faces_file`.
pub fn load_registry(faces_file: Option<&Path>) -> Result<FaceRegistry> {
    let mut registry = FaceRegistry::with_defaults();
    if let Some(path) = faces_file {
        let count = registry.merge_file(path)?;
        info!("Loaded {count} face(s) from {}", path.display());
    }
    Ok(registry)
}
