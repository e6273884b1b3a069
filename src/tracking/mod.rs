//! Multi-touch key tracking.
//!
//! [`TouchTracker`] maps any number of simultaneous touches to keys and turns
//! their begin/move/end/cancel events into [`TrackingEvent`]s:
//!
//! - a key is owned by at most one touch at a time
//! - sliding off a key cancels it; sliding onto another key drags into it
//! - releasing on the tracked key activates it exactly once
//! - repeat-eligible keys auto-repeat while held; once repeating the touch
//!   is locked to its key
//!
//! Irregular host events (unknown touch ids, duplicate begins) are ignored
//! and logged at debug level. Repeat timers live inside the touch records,
//! so removing a record always disarms its timer.

pub mod event;
pub mod record;

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::time::Instant;

use tracing::{debug, trace};

use crate::models::{Point, Position};
use crate::services::SpatialIndex;

pub use event::{TouchEvent, TouchId, TouchPhase, TrackingEvent, TrackingState};
pub use record::{ReleaseAfterRepeat, RepeatTimer, RepeatTiming, TouchRecord};

/// Decides which keys auto-repeat while held.
pub trait RepeatPolicy {
    /// Returns true if `key` should repeat.
    fn should_repeat(&self, key: Position) -> bool;
}

impl<F> RepeatPolicy for F
where
    F: Fn(Position) -> bool,
{
    fn should_repeat(&self, key: Position) -> bool {
        self(key)
    }
}

/// Policy under which nothing repeats.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoRepeat;

impl RepeatPolicy for NoRepeat {
    fn should_repeat(&self, _key: Position) -> bool {
        false
    }
}

/// How a record is being ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Ending {
    Released,
    Cancelled,
}

/// Tracks touches against keys.
#[derive(Debug, Default)]
pub struct TouchTracker {
    timing: RepeatTiming,
    release_after_repeat: ReleaseAfterRepeat,
    /// Touches that have begun and not yet ended
    live: BTreeSet<TouchId>,
    /// Touches currently tracking a key
    records: BTreeMap<TouchId, TouchRecord>,
    /// Reverse index: key -> owning touch
    owners: HashMap<Position, TouchId>,
}

impl TouchTracker {
    /// Creates a tracker with the given repeat behaviour.
    #[must_use]
    pub fn new(timing: RepeatTiming, release_after_repeat: ReleaseAfterRepeat) -> Self {
        Self {
            timing,
            release_after_repeat,
            ..Self::default()
        }
    }

    /// Repeat timing in use.
    #[must_use]
    pub const fn timing(&self) -> RepeatTiming {
        self.timing
    }

    /// Handles a touch going down.
    ///
    /// Starts tracking the key under `point` unless another touch already
    /// tracks it. Keys accepted by `policy` get a repeat timer.
    pub fn touch_began<S, P>(
        &mut self,
        touch: TouchId,
        point: Point,
        index: &S,
        policy: &P,
        now: Instant,
    ) -> Vec<TrackingEvent>
    where
        S: SpatialIndex + ?Sized,
        P: RepeatPolicy + ?Sized,
    {
        if !self.live.insert(touch) {
            debug!(%touch, "ignoring duplicate touch began");
            return Vec::new();
        }

        let Some(key) = index.key_at(point) else {
            trace!(%touch, x = point.x, y = point.y, "touch began off-key");
            return Vec::new();
        };

        if self.is_tracking(key) {
            debug!(%touch, ?key, "key already tracked by another touch");
            return Vec::new();
        }

        let repeat = policy
            .should_repeat(key)
            .then(|| RepeatTimer::arm(now, self.timing));

        let mut events = Vec::with_capacity(2);
        self.begin_tracking(touch, key, false, repeat, &mut events);
        events
    }

    /// Handles a touch moving.
    ///
    /// Leaving the tracked key cancels it; entering another untracked key
    /// starts tracking that key as a drag-in. Repeating touches are ignored.
    pub fn touch_moved<S>(&mut self, touch: TouchId, point: Point, index: &S) -> Vec<TrackingEvent>
    where
        S: SpatialIndex + ?Sized,
    {
        if !self.live.contains(&touch) {
            debug!(%touch, "ignoring move for unknown touch");
            return Vec::new();
        }

        if self
            .records
            .get(&touch)
            .is_some_and(TouchRecord::is_repeating)
        {
            return Vec::new();
        }

        let target = index.key_at(point);
        if target == self.tracked_key(touch) {
            return Vec::new();
        }

        let mut events = Vec::new();
        self.end_tracking(touch, Ending::Cancelled, &mut events);

        if let Some(key) = target {
            if self.is_tracking(key) {
                debug!(%touch, ?key, "drag target already tracked by another touch");
            } else {
                self.begin_tracking(touch, key, true, None, &mut events);
            }
        }

        events
    }

    /// Handles a touch lifting. Activates the tracked key, if any.
    pub fn touch_ended(&mut self, touch: TouchId) -> Vec<TrackingEvent> {
        if !self.live.remove(&touch) {
            debug!(%touch, "ignoring end for unknown touch");
            return Vec::new();
        }

        let mut events = Vec::new();
        self.end_tracking(touch, Ending::Released, &mut events);
        events
    }

    /// Handles a system cancellation. Never activates.
    pub fn touch_cancelled(&mut self, touch: TouchId) -> Vec<TrackingEvent> {
        if !self.live.remove(&touch) {
            debug!(%touch, "ignoring cancel for unknown touch");
            return Vec::new();
        }

        let mut events = Vec::new();
        self.end_tracking(touch, Ending::Cancelled, &mut events);
        events
    }

    /// Dispatches a host touch event.
    pub fn handle<S, P>(
        &mut self,
        event: TouchEvent,
        index: &S,
        policy: &P,
        now: Instant,
    ) -> Vec<TrackingEvent>
    where
        S: SpatialIndex + ?Sized,
        P: RepeatPolicy + ?Sized,
    {
        match event {
            TouchEvent::Began { touch, point } => self.touch_began(touch, point, index, policy, now),
            TouchEvent::Moved { touch, point } => self.touch_moved(touch, point, index),
            TouchEvent::Ended { touch } => self.touch_ended(touch),
            TouchEvent::Cancelled { touch } => self.touch_cancelled(touch),
        }
    }

    /// Fires every repeat timer due at `now`, once each, in touch order.
    pub fn tick(&mut self, now: Instant) -> Vec<TrackingEvent> {
        let mut events = Vec::new();
        for record in self.records.values_mut() {
            if let Some(timer) = record.repeat.as_mut() {
                if timer.is_due(now) {
                    let count = timer.fire(now);
                    trace!(touch = %record.touch, key = ?record.key, count, "key repeat");
                    events.push(TrackingEvent::Repeated {
                        key: record.key,
                        count,
                    });
                }
            }
        }
        events
    }

    /// Earliest pending repeat deadline.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.records
            .values()
            .filter_map(|record| record.repeat.map(|timer| timer.deadline()))
            .min()
    }

    /// Cancels every tracked key and forgets all live touches.
    ///
    /// Later events for those touches are ignored as unknown.
    pub fn cancel_all(&mut self) -> Vec<TrackingEvent> {
        let touches: Vec<TouchId> = self.records.keys().copied().collect();
        let mut events = Vec::new();
        for touch in touches {
            self.end_tracking(touch, Ending::Cancelled, &mut events);
        }
        self.live.clear();
        events
    }

    /// Checks if any touch tracks `key`.
    #[must_use]
    pub fn is_tracking(&self, key: Position) -> bool {
        self.owners.contains_key(&key)
    }

    /// Key tracked by `touch`.
    #[must_use]
    pub fn tracked_key(&self, touch: TouchId) -> Option<Position> {
        self.records.get(&touch).map(|record| record.key)
    }

    /// Checks if `touch` is locked in auto-repeat.
    #[must_use]
    pub fn is_repeating(&self, touch: TouchId) -> bool {
        self.records
            .get(&touch)
            .is_some_and(TouchRecord::is_repeating)
    }

    /// Record for `touch`.
    #[must_use]
    pub fn record(&self, touch: TouchId) -> Option<&TouchRecord> {
        self.records.get(&touch)
    }

    /// Lifecycle phase of `touch`, or `None` if it is not live.
    #[must_use]
    pub fn phase(&self, touch: TouchId) -> Option<TouchPhase> {
        if !self.live.contains(&touch) {
            return None;
        }
        Some(match self.records.get(&touch) {
            None => TouchPhase::Idle,
            Some(record) if record.is_repeating() => TouchPhase::Repeating(record.key),
            Some(record) => TouchPhase::Tracking(record.key),
        })
    }

    /// Number of active records.
    #[must_use]
    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    /// Number of live touches, tracking or not.
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    fn begin_tracking(
        &mut self,
        touch: TouchId,
        key: Position,
        dragged_in: bool,
        repeat: Option<RepeatTimer>,
        events: &mut Vec<TrackingEvent>,
    ) {
        trace!(%touch, ?key, dragged_in, "begin tracking");
        self.records
            .insert(touch, TouchRecord::new(touch, key, repeat));
        self.owners.insert(key, touch);

        events.push(TrackingEvent::StateChanged {
            key,
            state: TrackingState::Highlighted,
        });
        events.push(TrackingEvent::Began { key, dragged_in });
    }

    fn end_tracking(&mut self, touch: TouchId, ending: Ending, events: &mut Vec<TrackingEvent>) {
        // Dropping the record here disarms its repeat timer.
        let Some(record) = self.records.remove(&touch) else {
            return;
        };
        self.owners.remove(&record.key);

        let activate = match ending {
            Ending::Released => {
                !record.is_repeating()
                    || self.release_after_repeat == ReleaseAfterRepeat::Activate
            }
            Ending::Cancelled => false,
        };
        trace!(%touch, key = ?record.key, activate, "end tracking");

        events.push(TrackingEvent::StateChanged {
            key: record.key,
            state: TrackingState::Normal,
        });
        events.push(if activate {
            TrackingEvent::Activated { key: record.key }
        } else {
            TrackingEvent::Cancelled { key: record.key }
        });
    }
}
