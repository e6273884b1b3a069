//! Per-touch records and their repeat timers.

use crate::constants::{DEFAULT_REPEAT_DELAY_MS, DEFAULT_REPEAT_INTERVAL_MS};
use crate::models::Position;
use crate::tracking::event::TouchId;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Auto-repeat timing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RepeatTiming {
    /// Hold time before the first repeat
    pub initial_delay: Duration,
    /// Time between subsequent repeats
    pub interval: Duration,
}

impl Default for RepeatTiming {
    fn default() -> Self {
        Self {
            initial_delay: Duration::from_millis(DEFAULT_REPEAT_DELAY_MS),
            interval: Duration::from_millis(DEFAULT_REPEAT_INTERVAL_MS),
        }
    }
}

/// What releasing a key emits after it has started repeating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReleaseAfterRepeat {
    /// One terminal activation, same as a plain tap
    #[default]
    Activate,
    /// A cancellation; the repeats already did the work
    Cancel,
}

/// Armed repeat timer.
///
/// Owned by its [`TouchRecord`]; dropping the record disarms it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RepeatTimer {
    next_fire: Instant,
    interval: Duration,
    fired: u32,
}

impl RepeatTimer {
    /// Arms a timer that first fires `timing.initial_delay` after `now`.
    #[must_use]
    pub fn arm(now: Instant, timing: RepeatTiming) -> Self {
        Self {
            next_fire: now + timing.initial_delay,
            interval: timing.interval,
            fired: 0,
        }
    }

    /// When the timer fires next.
    #[must_use]
    pub const fn deadline(&self) -> Instant {
        self.next_fire
    }

    /// Number of times the timer has fired.
    #[must_use]
    pub const fn fired(&self) -> u32 {
        self.fired
    }

    /// Checks if the timer is due at `now`.
    #[must_use]
    pub fn is_due(&self, now: Instant) -> bool {
        self.next_fire <= now
    }

    /// Records a firing and reschedules one interval after `now`.
    pub fn fire(&mut self, now: Instant) -> u32 {
        self.fired = self.fired.saturating_add(1);
        self.next_fire = now + self.interval;
        self.fired
    }
}

/// Association between a live touch and the key it tracks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TouchRecord {
    /// Owning touch
    pub touch: TouchId,
    /// Tracked key
    pub key: Position,
    /// Repeat timer, for repeat-eligible keys entered by a fresh touch-down
    pub repeat: Option<RepeatTimer>,
}

impl TouchRecord {
    /// Creates a record.
    #[must_use]
    pub const fn new(touch: TouchId, key: Position, repeat: Option<RepeatTimer>) -> Self {
        Self { touch, key, repeat }
    }

    /// Checks if the key has auto-repeated at least once.
    #[must_use]
    pub fn is_repeating(&self) -> bool {
        self.repeat.is_some_and(|timer| timer.fired() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeat_timer_schedule() {
        let start = Instant::now();
        let timing = RepeatTiming {
            initial_delay: Duration::from_millis(300),
            interval: Duration::from_millis(50),
        };
        let mut timer = RepeatTimer::arm(start, timing);

        assert_eq!(timer.deadline(), start + Duration::from_millis(300));
        assert!(!timer.is_due(start + Duration::from_millis(299)));
        assert!(timer.is_due(start + Duration::from_millis(300)));

        let fired_at = start + Duration::from_millis(310);
        assert_eq!(timer.fire(fired_at), 1);
        assert_eq!(timer.deadline(), fired_at + Duration::from_millis(50));
    }

    #[test]
    fn test_repeat_count_saturates() {
        let now = Instant::now();
        let mut timer = RepeatTimer {
            next_fire: now,
            interval: Duration::from_millis(75),
            fired: u32::MAX - 1,
        };

        assert_eq!(timer.fire(now), u32::MAX);
        assert_eq!(timer.fire(now), u32::MAX);
        assert!(timer.is_due(now + Duration::from_millis(75)));
    }

    #[test]
    fn test_record_is_repeating_after_first_fire() {
        let now = Instant::now();
        let mut record = TouchRecord::new(
            TouchId(1),
            Position::new(2, 8),
            Some(RepeatTimer::arm(now, RepeatTiming::default())),
        );
        assert!(!record.is_repeating());

        if let Some(timer) = record.repeat.as_mut() {
            timer.fire(now);
        }
        assert!(record.is_repeating());

        let plain = TouchRecord::new(TouchId(2), Position::new(0, 0), None);
        assert!(!plain.is_repeating());
    }

    #[test]
    fn test_release_after_repeat_serde() {
        assert_eq!(
            serde_json::to_string(&ReleaseAfterRepeat::Cancel).unwrap(),
            "\"cancel\""
        );
        assert_eq!(ReleaseAfterRepeat::default(), ReleaseAfterRepeat::Activate);
    }
}
