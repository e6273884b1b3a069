//! Key-action dispatch.
//!
//! [`ActionDispatcher`] applies an activated key's [`Value`] to a
//! [`TextDocument`] under the current [`ModifierState`], and reports every
//! side effect as a [`Command`]. Text commands are already applied to the
//! document when they are returned; the rest are for the host to act on.

pub mod document;
pub mod modifier;

use tracing::{debug, trace};

use crate::models::{Action, Value};

pub use document::{MemoryDocument, TextDocument};
pub use modifier::{is_sentence_start, ModifierState};

/// Side effect of a dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Text was inserted into the document
    InsertText(String),
    /// One character was deleted from the document
    DeleteBackward,
    /// Shift was turned on or off
    ShiftChanged(bool),
    /// Caps lock was turned on or off
    CapsLockChanged(bool),
    /// The host should switch to the face with this identifier
    ChangeFace(String),
    /// The host should switch to the next input method
    NextInputMethod,
    /// Return was pressed (after its newline was inserted)
    Return,
    /// Backspace was pressed
    Backspace {
        /// Characters deleted
        length: usize,
    },
    /// Opaque custom action payload
    Custom(String),
}

/// Behaviour switches for the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchOptions {
    /// Double space inserts ". "
    pub use_period_shortcut: bool,
    /// Caps lock may be turned on
    pub allow_caps_lock: bool,
    /// Shift turns on at the start of a sentence
    pub auto_capitalize: bool,
}

impl Default for DispatchOptions {
    fn default() -> Self {
        Self {
            use_period_shortcut: true,
            allow_caps_lock: false,
            auto_capitalize: true,
        }
    }
}

/// Interprets key values against modifier state.
#[derive(Debug, Clone, Default)]
pub struct ActionDispatcher {
    state: ModifierState,
    options: DispatchOptions,
}

impl ActionDispatcher {
    /// Creates a dispatcher with all modifiers off.
    #[must_use]
    pub fn new(options: DispatchOptions) -> Self {
        Self {
            state: ModifierState::default(),
            options,
        }
    }

    /// Current modifier state.
    #[must_use]
    pub const fn state(&self) -> ModifierState {
        self.state
    }

    /// Options in use.
    #[must_use]
    pub const fn options(&self) -> DispatchOptions {
        self.options
    }

    /// Applies `value`.
    ///
    /// Without a document, text keys do nothing; actions still take effect.
    pub fn dispatch<T>(&mut self, value: &Value, document: Option<&mut T>) -> Vec<Command>
    where
        T: TextDocument + ?Sized,
    {
        let mut out = Vec::new();
        self.handle(value, document, &mut out);
        debug!(?value, commands = out.len(), state = ?self.state, "dispatched");
        out
    }

    /// Re-evaluates auto-capitalization against the document context.
    ///
    /// Call after the host reports a text change.
    pub fn refresh_shift<T>(&mut self, document: Option<&T>) -> Vec<Command>
    where
        T: TextDocument + ?Sized,
    {
        let mut out = Vec::new();
        if let Some(document) = document {
            self.refresh_from(document, &mut out);
        }
        out
    }

    /// Turns caps lock on or off. Ignored unless caps lock is allowed.
    ///
    /// Shift follows caps lock.
    pub fn set_caps_lock(&mut self, enabled: bool) -> Vec<Command> {
        let mut out = Vec::new();
        if !self.options.allow_caps_lock {
            debug!("caps lock not allowed");
            return out;
        }
        if self.state.caps_lock_enabled != enabled {
            self.state.caps_lock_enabled = enabled;
            out.push(Command::CapsLockChanged(enabled));
        }
        self.set_shift(enabled, &mut out);
        out
    }

    fn handle<T>(&mut self, value: &Value, document: Option<&mut T>, out: &mut Vec<Command>)
    where
        T: TextDocument + ?Sized,
    {
        match value {
            Value::Action(action) => match action {
                Action::Globe => out.push(Command::NextInputMethod),
                Action::Backspace => {
                    self.process_backspace(document, out);
                    out.push(Command::Backspace { length: 1 });
                }
                Action::ChangeFace(identifier) => {
                    out.push(Command::ChangeFace(identifier.clone()));
                }
                Action::Shift => {
                    let enabled = !self.state.shift_enabled;
                    self.set_shift(enabled, out);
                }
                Action::Return => {
                    self.handle(&Value::Char("\n".to_string()), document, out);
                    out.push(Command::Return);
                }
                Action::Custom(payload) => out.push(Command::Custom(payload.clone())),
            },
            Value::Char(text) => self.process_insertion(text, document, out),
        }
    }

    fn process_insertion<T>(&mut self, text: &str, document: Option<&mut T>, out: &mut Vec<Command>)
    where
        T: TextDocument + ?Sized,
    {
        let Some(document) = document else {
            debug!(text, "no document, dropping insertion");
            return;
        };

        if text == " " && self.options.use_period_shortcut {
            if !self.state.last_inserted_space {
                self.state.last_inserted_space = true;
            } else if !self.state.pending_period_shortcut {
                self.state.last_inserted_space = false;
                self.state.pending_period_shortcut = true;

                trace!("double space, inserting period");
                document.delete_backward();
                out.push(Command::DeleteBackward);
                Self::insert(document, ".", out);
            }
            Self::insert(document, text, out);
        } else {
            let text = if self.state.uppercase() {
                text.to_uppercase()
            } else {
                text.to_string()
            };
            Self::insert(document, &text, out);
            self.state.clear_shortcut();

            // One-shot shift
            if self.state.shift_enabled && !self.state.caps_lock_enabled {
                self.handle(&Value::Action(Action::Shift), Some(&mut *document), out);
            }
        }

        self.refresh_from(document, out);
    }

    fn process_backspace<T>(&mut self, document: Option<&mut T>, out: &mut Vec<Command>)
    where
        T: TextDocument + ?Sized,
    {
        self.state.clear_shortcut();

        if let Some(document) = document {
            document.delete_backward();
            out.push(Command::DeleteBackward);
            self.refresh_from(document, out);
        }
    }

    fn insert<T>(document: &mut T, text: &str, out: &mut Vec<Command>)
    where
        T: TextDocument + ?Sized,
    {
        document.insert_text(text);
        out.push(Command::InsertText(text.to_string()));
    }

    fn refresh_from<T>(&mut self, document: &T, out: &mut Vec<Command>)
    where
        T: TextDocument + ?Sized,
    {
        if !self.options.auto_capitalize || self.state.shift_enabled {
            return;
        }

        match document.text_before_insertion_point() {
            Some(context) if is_sentence_start(&context) => self.set_shift(true, out),
            Some(_) => {}
            None => trace!("no text context, leaving shift unchanged"),
        }
    }

    fn set_shift(&mut self, enabled: bool, out: &mut Vec<Command>) {
        if self.state.shift_enabled != enabled {
            self.state.shift_enabled = enabled;
            out.push(Command::ShiftChanged(enabled));
        }
    }
}
