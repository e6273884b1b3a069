//! Collaborators the controller talks to.

use serde::Serialize;
use std::collections::HashMap;

use crate::config::AppearanceConfig;
use crate::dispatch::{MemoryDocument, TextDocument};
use crate::models::{Face, Key, Position};
use crate::tracking::TrackingState;

/// Receives keyboard-level events. Every method defaults to a no-op.
pub trait KeyboardDelegate {
    /// A key was activated (released on, or repeated).
    fn on_key_activated(&mut self, _key: &Key) {}

    /// A face change key was activated.
    fn on_layout_change_requested(&mut self, _identifier: &str) {}

    /// The globe key was activated.
    fn on_next_input_method_requested(&mut self) {}

    /// Return was activated.
    fn on_return_pressed(&mut self) {}

    /// Backspace was activated.
    fn on_backspace(&mut self, _length: usize) {}

    /// A custom action key was activated.
    fn on_custom_action(&mut self, _payload: &str) {}
}

/// Presentation side of the keyboard.
pub trait KeyboardView {
    /// Shows a key in a visual state.
    fn set_visual_state(&mut self, key: Position, state: TrackingState);

    /// Plays key click feedback.
    fn play_click(&mut self) {}

    /// A new face was installed.
    fn face_changed(&mut self, _face: &Face) {}

    /// Colors and sizes to draw with.
    fn appearance_changed(&mut self, _appearance: &AppearanceConfig) {}
}

/// Everything the controller needs from its embedding.
pub trait KeyboardHost: KeyboardDelegate + KeyboardView {
    /// The document being typed into, if any.
    fn document(&mut self) -> Option<&mut dyn TextDocument>;
}

/// Delegate callback captured by [`RecordingHost`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum HostEvent {
    /// `on_key_activated`
    KeyActivated(Key),
    /// `on_layout_change_requested`
    LayoutChangeRequested(String),
    /// `on_next_input_method_requested`
    NextInputMethod,
    /// `on_return_pressed`
    Return,
    /// `on_backspace`
    Backspace(usize),
    /// `on_custom_action`
    Custom(String),
}

/// Host backed by a [`MemoryDocument`] that records every callback.
///
/// Used by `keykit replay` and in tests.
#[derive(Debug, Default)]
pub struct RecordingHost {
    /// Document typed into
    pub document: MemoryDocument,
    /// Delegate callbacks in order
    pub events: Vec<HostEvent>,
    /// Last visual state reported per key
    pub visual_states: HashMap<Position, TrackingState>,
    /// Clicks played
    pub clicks: usize,
    /// Identifiers of installed faces in order
    pub faces: Vec<String>,
    /// Last appearance handed to the view
    pub appearance: Option<AppearanceConfig>,
}

impl RecordingHost {
    /// Creates a host typing into `document`.
    #[must_use]
    pub fn new(document: MemoryDocument) -> Self {
        Self {
            document,
            ..Self::default()
        }
    }

    /// Last visual state of a key, `Normal` if never reported.
    #[must_use]
    pub fn visual_state(&self, key: Position) -> TrackingState {
        self.visual_states.get(&key).copied().unwrap_or_default()
    }
}

impl KeyboardDelegate for RecordingHost {
    fn on_key_activated(&mut self, key: &Key) {
        self.events.push(HostEvent::KeyActivated(key.clone()));
    }

    fn on_layout_change_requested(&mut self, identifier: &str) {
        self.events
            .push(HostEvent::LayoutChangeRequested(identifier.to_string()));
    }

    fn on_next_input_method_requested(&mut self) {
        self.events.push(HostEvent::NextInputMethod);
    }

    fn on_return_pressed(&mut self) {
        self.events.push(HostEvent::Return);
    }

    fn on_backspace(&mut self, length: usize) {
        self.events.push(HostEvent::Backspace(length));
    }

    fn on_custom_action(&mut self, payload: &str) {
        self.events.push(HostEvent::Custom(payload.to_string()));
    }
}

impl KeyboardView for RecordingHost {
    fn set_visual_state(&mut self, key: Position, state: TrackingState) {
        self.visual_states.insert(key, state);
    }

    fn play_click(&mut self) {
        self.clicks += 1;
    }

    fn face_changed(&mut self, face: &Face) {
        self.visual_states.clear();
        self.faces.push(face.identifier.clone());
    }

    fn appearance_changed(&mut self, appearance: &AppearanceConfig) {
        self.appearance = Some(appearance.clone());
    }
}

impl KeyboardHost for RecordingHost {
    fn document(&mut self) -> Option<&mut dyn TextDocument> {
        Some(&mut self.document)
    }
}
