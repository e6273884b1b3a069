//! Key definition data structures.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Default relative length of a key (1u).
pub const DEFAULT_KEY_LENGTH: f64 = 1.0;

/// Visual style of a key.
///
/// `Alternate` keys at the start or end of a row are pinned to the row
/// edges when the row is shorter than the face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum KeyStyle {
    /// Regular character key
    #[default]
    Main,
    /// Modifier / navigation key (shift, backspace, face switches)
    Alternate,
    /// Emphasised completion key (return/done)
    Done,
}

/// What is drawn on a key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Label {
    /// Named image asset
    Icon(String),
    /// Plain text
    Text(String),
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Icon(name) => write!(f, "[{name}]"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

/// Non-character behaviour produced by a key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Toggle one-shot shift
    Shift,
    /// Switch to the face with the given identifier
    ChangeFace(String),
    /// Delete backward
    Backspace,
    /// Insert a newline and notify the host
    Return,
    /// Ask the host for the next input method
    Globe,
    /// Opaque host-defined payload
    Custom(String),
}

/// The value a key produces when activated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Value {
    /// An action key
    Action(Action),
    /// A text-producing key
    Char(String),
}

/// A single key of a face.
///
/// Keys are immutable values; equality compares every field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Key {
    /// Displayed label
    pub label: Label,
    /// Produced value
    pub value: Value,
    /// Relative length in key units (1.0 = one regular key)
    #[serde(default = "default_length")]
    pub length: f64,
    /// Visual style
    #[serde(default)]
    pub style: KeyStyle,
}

const fn default_length() -> f64 {
    DEFAULT_KEY_LENGTH
}

impl Key {
    /// Creates a key from its parts with the default length and `Main` style.
    pub fn new(label: Label, value: Value) -> Self {
        Self {
            label,
            value,
            length: DEFAULT_KEY_LENGTH,
            style: KeyStyle::Main,
        }
    }

    /// Creates a text key showing `label` and inserting `ch`.
    pub fn char(label: impl Into<String>, ch: impl Into<String>) -> Self {
        Self::new(Label::Text(label.into()), Value::Char(ch.into()))
    }

    /// Creates an action key with a text label.
    pub fn action(label: impl Into<String>, action: Action) -> Self {
        Self::new(Label::Text(label.into()), Value::Action(action))
    }

    /// Creates a key drawn with an icon that inserts `ch`.
    pub fn icon(icon: impl Into<String>, ch: impl Into<String>) -> Self {
        Self::new(Label::Icon(icon.into()), Value::Char(ch.into()))
    }

    /// Sets the relative length.
    pub fn with_length(mut self, length: f64) -> Self {
        self.length = length;
        self
    }

    /// Sets the visual style.
    pub fn with_style(mut self, style: KeyStyle) -> Self {
        self.style = style;
        self
    }

    /// Returns the action if this is an action key.
    #[must_use]
    pub const fn action_value(&self) -> Option<&Action> {
        match &self.value {
            Value::Action(action) => Some(action),
            Value::Char(_) => None,
        }
    }

    /// Checks if this key toggles shift.
    #[must_use]
    pub fn is_shift(&self) -> bool {
        matches!(self.action_value(), Some(Action::Shift))
    }

    /// Checks if this key deletes backward.
    #[must_use]
    pub fn is_backspace(&self) -> bool {
        matches!(self.action_value(), Some(Action::Backspace))
    }
}
