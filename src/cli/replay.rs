//! Touch script replay command.
//!
//! A replay script is a JSON document:
//!
//! ```json
//! {
//!   "bounds": { "width": 320.0, "height": 216.0 },
//!   "text": "",
//!   "steps": [
//!     { "at_ms": 0,  "event": { "type": "began", "touch": 1, "point": { "x": 16.0, "y": 27.0 } } },
//!     { "at_ms": 80, "event": { "type": "ended", "touch": 1 } }
//!   ]
//! }
//! ```
//!
//! Steps run against a [`RecordingHost`] on a simulated clock, so repeat
//! timing is exact and runs are reproducible.

use anyhow::{Context, Result};
use clap::Args;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::debug;

use crate::cli::load_registry;
use crate::config::Config;
use crate::constants::LETTERS_FACE;
use crate::controller::{HostEvent, KeyboardController, RecordingHost};
use crate::dispatch::MemoryDocument;
use crate::models::Size;
use crate::services::FaceRegistry;
use crate::tracking::TouchEvent;

/// Replay a touch script against a face and print the result
#[derive(Debug, Clone, Args)]
pub struct ReplayArgs {
    /// Path to the JSON replay script
    #[arg(value_name = "SCRIPT")]
    pub script: PathBuf,

    /// Identifier of the face to start on
    #[arg(long, value_name = "ID", default_value = LETTERS_FACE)]
    pub face: String,

    /// JSON file with additional faces
    #[arg(long, value_name = "FILE")]
    pub faces: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// One timed touch event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplayStep {
    /// Milliseconds since the start of the script
    pub at_ms: u64,
    /// Event delivered at that time
    pub event: TouchEvent,
}

/// A recorded touch session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplayScript {
    /// Keyboard size
    pub bounds: Size,
    /// Initial document text
    #[serde(default)]
    pub text: String,
    /// Events in time order
    pub steps: Vec<ReplayStep>,
}

impl ReplayScript {
    /// Loads a script from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read replay script: {}", path.display()))?;

        let script: Self = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse replay script: {}", path.display()))?;

        script
            .validate()
            .with_context(|| format!("Invalid replay script: {}", path.display()))?;
        Ok(script)
    }

    /// Checks bounds are positive and steps are in time order.
    pub fn validate(&self) -> Result<()> {
        if !(self.bounds.width > 0.0 && self.bounds.height > 0.0) {
            anyhow::bail!(
                "bounds must be positive, got {}x{}",
                self.bounds.width,
                self.bounds.height
            );
        }

        for (index, pair) in self.steps.windows(2).enumerate() {
            if pair[1].at_ms < pair[0].at_ms {
                anyhow::bail!(
                    "step {} at {}ms comes before the previous step at {}ms",
                    index + 1,
                    pair[1].at_ms,
                    pair[0].at_ms
                );
            }
        }
        Ok(())
    }
}

/// Result of a replay.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplayOutcome {
    /// Final document text
    pub text: String,
    /// Face installed at the end
    pub face: String,
    /// Delegate callbacks in order
    pub events: Vec<HostEvent>,
    /// Clicks played
    pub clicks: usize,
    /// Shift state at the end
    pub shift_enabled: bool,
    /// Caps lock state at the end
    pub caps_lock_enabled: bool,
}

/// Runs `script` starting on `face`.
///
/// # Errors
///
/// Returns an error if the script is invalid or `face` is not registered.
pub fn replay(
    script: &ReplayScript,
    registry: FaceRegistry,
    face: &str,
    config: &Config,
) -> Result<ReplayOutcome> {
    script.validate()?;

    let host = RecordingHost::new(MemoryDocument::with_text(script.text.clone()));
    let mut controller = KeyboardController::new(registry, face, config, host)?;
    controller.set_bounds(script.bounds);
    controller.text_did_change();

    let start = Instant::now();
    for step in &script.steps {
        let now = start + Duration::from_millis(step.at_ms);
        controller.advance_to(now);
        debug!(at_ms = step.at_ms, event = ?step.event, "replaying");
        controller.handle(step.event, now);
    }

    let modifiers = controller.modifiers();
    let face = controller.current_face().identifier.clone();
    let host = controller.into_host();

    Ok(ReplayOutcome {
        text: host.document.text().to_string(),
        face,
        events: host.events,
        clicks: host.clicks,
        shift_enabled: modifiers.shift_enabled,
        caps_lock_enabled: modifiers.caps_lock_enabled,
    })
}

impl ReplayArgs {
    /// Execute the replay command
    pub fn execute(&self, config: &Config) -> Result<()> {
        let registry = load_registry(self.faces.as_deref())?;
        let script = ReplayScript::load(&self.script)?;
        let outcome = replay(&script, registry, &self.face, config)?;

        if self.json {
            let json =
                serde_json::to_string_pretty(&outcome).context("Failed to serialize outcome")?;
            println!("{json}");
            return Ok(());
        }

        println!("Text: {:?}", outcome.text);
        println!("Face: {}", outcome.face);
        println!("Clicks: {}", outcome.clicks);
        println!(
            "Shift: {}, caps lock: {}",
            outcome.shift_enabled, outcome.caps_lock_enabled
        );
        println!("Events:");
        for event in &outcome.events {
            println!("  {}", describe_event(event));
        }
        Ok(())
    }
}

fn describe_event(event: &HostEvent) -> String {
    match event {
        HostEvent::KeyActivated(key) => format!("key activated: {}", key.label),
        HostEvent::LayoutChangeRequested(id) => format!("layout change requested: {id}"),
        HostEvent::NextInputMethod => "next input method requested".to_string(),
        HostEvent::Return => "return pressed".to_string(),
        HostEvent::Backspace(length) => format!("backspace: {length}"),
        HostEvent::Custom(payload) => format!("custom action: {payload}"),
    }
}
