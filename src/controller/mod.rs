//! Keyboard controller.
//!
//! [`KeyboardController`] owns the current face, its geometry, a
//! [`TouchTracker`] and an [`ActionDispatcher`], and wires them to a
//! [`KeyboardHost`]:
//!
//! - tracking state changes become view updates
//! - fresh touch-downs and repeats play a click
//! - activations and repeats dispatch the key's value
//! - dispatch commands are forwarded to the delegate, and face change
//!   commands swap the installed face
//!
//! Shift keys are shown `Selected` while shift is on. The configured
//! appearance is handed to the view once, at construction.

pub mod host;

use std::time::Instant;

use anyhow::Result;
use tracing::{debug, info, warn};

use crate::config::{AppearanceConfig, Config};
use crate::dispatch::{ActionDispatcher, Command, ModifierState, TextDocument};
use crate::models::{Action, Face, Key, Point, Position, Rect, RgbColor, Size, Value};
use crate::services::{FaceGeometry, FaceRegistry};
use crate::tracking::{TouchEvent, TouchId, TouchTracker, TrackingEvent, TrackingState};

pub use host::{HostEvent, KeyboardDelegate, KeyboardHost, KeyboardView, RecordingHost};

/// Drives a keyboard session for a host.
#[derive(Debug)]
pub struct KeyboardController<H: KeyboardHost> {
    registry: FaceRegistry,
    face: Face,
    bounds: Rect,
    geometry: FaceGeometry,
    /// Keys that auto-repeat on the current face
    repeat_keys: Vec<Position>,
    /// Shift keys on the current face
    shift_keys: Vec<Position>,
    tracker: TouchTracker,
    dispatcher: ActionDispatcher,
    appearance: AppearanceConfig,
    host: H,
}

impl<H: KeyboardHost> KeyboardController<H> {
    /// Creates a controller showing `initial_face`.
    ///
    /// # Errors
    ///
    /// Returns an error if `initial_face` is not in `registry`.
    pub fn new(
        registry: FaceRegistry,
        initial_face: &str,
        config: &Config,
        mut host: H,
    ) -> Result<Self> {
        let face = registry.require(initial_face)?.clone();
        host.appearance_changed(&config.appearance);
        host.face_changed(&face);

        let bounds = Rect::default();
        Ok(Self {
            registry,
            repeat_keys: face.positions_matching(Key::is_backspace),
            shift_keys: face.positions_matching(Key::is_shift),
            geometry: FaceGeometry::layout(&face, bounds),
            face,
            bounds,
            tracker: TouchTracker::new(config.repeat_timing(), config.repeat.release),
            dispatcher: ActionDispatcher::new(config.dispatch_options()),
            appearance: config.appearance.clone(),
            host,
        })
    }

    /// Sets the keyboard size and lays the face out again.
    pub fn set_bounds(&mut self, size: Size) {
        self.bounds = Rect::new(0.0, 0.0, size.width, size.height);
        self.geometry = FaceGeometry::layout(&self.face, self.bounds);
        debug!(width = size.width, height = size.height, "keyboard bounds changed");
    }

    /// Handles a touch going down.
    pub fn touch_began(&mut self, touch: TouchId, point: Point, now: Instant) {
        let repeat_keys = &self.repeat_keys;
        let policy = |key: Position| repeat_keys.contains(&key);
        let events = self
            .tracker
            .touch_began(touch, point, &self.geometry, &policy, now);
        self.apply_tracking(events);
    }

    /// Handles a touch moving.
    pub fn touch_moved(&mut self, touch: TouchId, point: Point) {
        let events = self.tracker.touch_moved(touch, point, &self.geometry);
        self.apply_tracking(events);
    }

    /// Handles a touch lifting.
    pub fn touch_ended(&mut self, touch: TouchId) {
        let events = self.tracker.touch_ended(touch);
        self.apply_tracking(events);
    }

    /// Handles a system cancellation.
    pub fn touch_cancelled(&mut self, touch: TouchId) {
        let events = self.tracker.touch_cancelled(touch);
        self.apply_tracking(events);
    }

    /// Handles a host touch event.
    pub fn handle(&mut self, event: TouchEvent, now: Instant) {
        match event {
            TouchEvent::Began { touch, point } => self.touch_began(touch, point, now),
            TouchEvent::Moved { touch, point } => self.touch_moved(touch, point),
            TouchEvent::Ended { touch } => self.touch_ended(touch),
            TouchEvent::Cancelled { touch } => self.touch_cancelled(touch),
        }
    }

    /// Fires repeat timers due at `now`.
    pub fn tick(&mut self, now: Instant) {
        let events = self.tracker.tick(now);
        self.apply_tracking(events);
    }

    /// Fires every repeat deadline up to `now`, each at its own deadline.
    pub fn advance_to(&mut self, now: Instant) {
        let mut last = None;
        while let Some(deadline) = self.tracker.next_deadline() {
            if deadline > now || last.is_some_and(|last| deadline <= last) {
                break;
            }
            self.tick(deadline);
            last = Some(deadline);
        }
    }

    /// Earliest pending repeat deadline.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.tracker.next_deadline()
    }

    /// Switches to another registered face.
    ///
    /// Live tracking is cancelled first; touches still down are ignored
    /// until they lift.
    ///
    /// # Errors
    ///
    /// Returns an error if `identifier` is not registered.
    pub fn change_face(&mut self, identifier: &str) -> Result<()> {
        let face = self.registry.require(identifier)?.clone();

        let events = self.tracker.cancel_all();
        self.apply_tracking(events);

        info!(from = %self.face.identifier, to = %face.identifier, "changing face");
        self.install(face);
        self.host.face_changed(&self.face);
        self.refresh_shift_visuals();
        self.text_did_change();
        Ok(())
    }

    /// Dispatches an action as if a key carrying it was activated.
    pub fn simulate(&mut self, action: Action) {
        self.dispatch(&Value::Action(action));
    }

    /// Re-evaluates auto-capitalization after the host's text changed.
    pub fn text_did_change(&mut self) {
        let document: Option<&dyn TextDocument> = self.host.document().map(|document| &*document);
        let commands = self.dispatcher.refresh_shift(document);
        self.apply_commands(commands);
    }

    /// Turns caps lock on or off, if allowed by configuration.
    pub fn set_caps_lock(&mut self, enabled: bool) {
        let commands = self.dispatcher.set_caps_lock(enabled);
        self.apply_commands(commands);
    }

    /// Current modifier state.
    #[must_use]
    pub const fn modifiers(&self) -> ModifierState {
        self.dispatcher.state()
    }

    /// Installed face.
    #[must_use]
    pub const fn current_face(&self) -> &Face {
        &self.face
    }

    /// Configured colors and sizes.
    #[must_use]
    pub const fn appearance(&self) -> &AppearanceConfig {
        &self.appearance
    }

    /// Background color a key of the installed face is drawn in right now.
    #[must_use]
    pub fn key_color(&self, key: Position) -> Option<RgbColor> {
        let style = self.face.key(key)?.style;
        let state = if self.tracker.is_tracking(key) {
            TrackingState::Highlighted
        } else {
            TrackingState::Normal
        };
        Some(self.appearance.fill(style, self.displayed_state(key, state)))
    }

    /// Layout of the installed face.
    #[must_use]
    pub const fn geometry(&self) -> &FaceGeometry {
        &self.geometry
    }

    /// Touch tracker state.
    #[must_use]
    pub const fn tracker(&self) -> &TouchTracker {
        &self.tracker
    }

    /// Available faces.
    #[must_use]
    pub const fn registry(&self) -> &FaceRegistry {
        &self.registry
    }

    /// The host.
    #[must_use]
    pub const fn host(&self) -> &H {
        &self.host
    }

    /// The host, mutably.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Consumes the controller, returning the host.
    pub fn into_host(self) -> H {
        self.host
    }

    fn install(&mut self, face: Face) {
        self.repeat_keys = face.positions_matching(Key::is_backspace);
        self.shift_keys = face.positions_matching(Key::is_shift);
        self.geometry = FaceGeometry::layout(&face, self.bounds);
        self.face = face;
    }

    fn apply_tracking(&mut self, events: Vec<TrackingEvent>) {
        for event in events {
            match event {
                TrackingEvent::StateChanged { key, state } => {
                    let state = self.displayed_state(key, state);
                    self.host.set_visual_state(key, state);
                }
                TrackingEvent::Began { dragged_in, .. } => {
                    if !dragged_in {
                        self.host.play_click();
                    }
                }
                TrackingEvent::Activated { key } => {
                    if let Some(key) = self.face.key(key).cloned() {
                        self.host.on_key_activated(&key);
                        self.dispatch(&key.value);
                    }
                }
                TrackingEvent::Cancelled { .. } => {}
                TrackingEvent::Repeated { key, .. } => {
                    if let Some(key) = self.face.key(key).cloned() {
                        self.host.play_click();
                        self.host.on_key_activated(&key);
                        self.dispatch(&key.value);
                    }
                }
            }
        }
    }

    fn dispatch(&mut self, value: &Value) {
        let document = self.host.document();
        let commands = self.dispatcher.dispatch(value, document);
        self.apply_commands(commands);
    }

    fn apply_commands(&mut self, commands: Vec<Command>) {
        for command in commands {
            match command {
                Command::InsertText(_) | Command::DeleteBackward => {}
                Command::ShiftChanged(_) | Command::CapsLockChanged(_) => {
                    self.refresh_shift_visuals();
                }
                Command::ChangeFace(identifier) => {
                    self.host.on_layout_change_requested(&identifier);
                    if let Err(err) = self.change_face(&identifier) {
                        warn!("{err:#}");
                    }
                }
                Command::NextInputMethod => self.host.on_next_input_method_requested(),
                Command::Return => self.host.on_return_pressed(),
                Command::Backspace { length } => self.host.on_backspace(length),
                Command::Custom(payload) => self.host.on_custom_action(&payload),
            }
        }
    }

    /// Shift keys rest at `Selected` while shift is on.
    fn displayed_state(&self, key: Position, state: TrackingState) -> TrackingState {
        if state == TrackingState::Normal
            && self.dispatcher.state().shift_enabled
            && self.shift_keys.contains(&key)
        {
            TrackingState::Selected
        } else {
            state
        }
    }

    fn refresh_shift_visuals(&mut self) {
        for key in self.shift_keys.clone() {
            if self.tracker.is_tracking(key) {
                continue;
            }
            let state = self.displayed_state(key, TrackingState::Normal);
            self.host.set_visual_state(key, state);
        }
    }
}
