//! Data models for keys, rows, faces and screen geometry.
//!
//! Models are plain values, independent of tracking and dispatch logic.

pub mod defaults;
pub mod face;
pub mod geometry;
pub mod key;
pub mod rgb;
pub mod row;

// Re-export all model types
pub use face::{Face, Position};
pub use geometry::{Point, Rect, Size};
pub use key::{Action, Key, KeyStyle, Label, Value, DEFAULT_KEY_LENGTH};
pub use rgb::RgbColor;
pub use row::Row;
