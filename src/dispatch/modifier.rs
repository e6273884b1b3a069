//! Modifier state and the auto-capitalization rule.

/// Shift/caps state plus the double-space shortcut bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ModifierState {
    /// One-shot shift
    pub shift_enabled: bool,
    /// Caps lock; keeps shift from auto-disabling
    pub caps_lock_enabled: bool,
    /// The previous insertion was a single space
    pub last_inserted_space: bool,
    /// A period shortcut just fired; blocks re-triggering
    pub pending_period_shortcut: bool,
}

impl ModifierState {
    /// Checks if inserted text should be uppercased.
    #[must_use]
    pub const fn uppercase(&self) -> bool {
        self.shift_enabled || self.caps_lock_enabled
    }

    /// Clears the double-space bookkeeping.
    pub fn clear_shortcut(&mut self) {
        self.last_inserted_space = false;
        self.pending_period_shortcut = false;
    }
}

/// Checks if `context` (text before the insertion point) ends where a new
/// sentence begins.
#[must_use]
pub fn is_sentence_start(context: &str) -> bool {
    context.is_empty()
        || context.ends_with('\n')
        || [". ", "! ", "? "].iter().any(|end| context.ends_with(end))
}
