//! Touch input and tracking output types.

use crate::models::{Point, Position};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Host-assigned identity of a touch, stable from begin to end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TouchId(pub u64);

impl fmt::Display for TouchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "touch#{}", self.0)
    }
}

/// Visual state of a key view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum TrackingState {
    /// Idle
    #[default]
    Normal,
    /// Under a finger
    Highlighted,
    /// Latched on (shift while enabled)
    Selected,
}

/// Where a live touch currently is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchPhase {
    /// Live but not tracking any key
    Idle,
    /// Tracking a key
    Tracking(Position),
    /// Tracking a key that has started auto-repeating
    Repeating(Position),
}

/// Raw touch lifecycle event from the host.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TouchEvent {
    /// A finger went down
    Began {
        /// Touch identity
        touch: TouchId,
        /// Location in face coordinates
        point: Point,
    },
    /// A finger moved
    Moved {
        /// Touch identity
        touch: TouchId,
        /// Location in face coordinates
        point: Point,
    },
    /// A finger lifted
    Ended {
        /// Touch identity
        touch: TouchId,
    },
    /// The system cancelled the touch
    Cancelled {
        /// Touch identity
        touch: TouchId,
    },
}

impl TouchEvent {
    /// The touch this event belongs to.
    #[must_use]
    pub const fn touch(&self) -> TouchId {
        match self {
            Self::Began { touch, .. }
            | Self::Moved { touch, .. }
            | Self::Ended { touch }
            | Self::Cancelled { touch } => *touch,
        }
    }
}

/// Output of the tracker, in emission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackingEvent {
    /// A key view should change its visual state
    StateChanged {
        /// Affected key
        key: Position,
        /// New state
        state: TrackingState,
    },
    /// Tracking began on a key
    Began {
        /// Tracked key
        key: Position,
        /// True when the touch slid in from elsewhere
        dragged_in: bool,
    },
    /// The key was released inside itself
    Activated {
        /// Activated key
        key: Position,
    },
    /// Tracking ended without activation
    Cancelled {
        /// Abandoned key
        key: Position,
    },
    /// A held key fired an auto-repeat
    Repeated {
        /// Repeating key
        key: Position,
        /// 1 for the first repeat
        count: u32,
    },
}

impl TrackingEvent {
    /// The key this event refers to.
    #[must_use]
    pub const fn key(&self) -> Position {
        match self {
            Self::StateChanged { key, .. }
            | Self::Began { key, .. }
            | Self::Activated { key }
            | Self::Cancelled { key }
            | Self::Repeated { key, .. } => *key,
        }
    }
}
