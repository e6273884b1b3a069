//! Service layer: face lookup and spatial key resolution.
//!
//! These are the collaborators the tracking and dispatch core consumes.

pub mod faces;
pub mod spatial;

// Re-export commonly used types
pub use faces::FaceRegistry;
pub use spatial::{FaceGeometry, SpatialIndex};
