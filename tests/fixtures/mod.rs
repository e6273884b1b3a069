//! Shared test fixtures for controller and CLI tests.
#![allow(dead_code)] // Not every test binary uses every fixture

use keykit::cli::{ReplayScript, ReplayStep};
use keykit::config::Config;
use keykit::constants::LETTERS_FACE;
use keykit::controller::{KeyboardController, RecordingHost};
use keykit::dispatch::MemoryDocument;
use keykit::models::{Face, Point, Position, Rect, Size};
use keykit::services::{FaceGeometry, FaceRegistry};
use keykit::tracking::{TouchEvent, TouchId};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tempfile::TempDir;

/// Keyboard size used throughout the tests.
pub const BOUNDS: Size = Size::new(320.0, 216.0);

/// Creates a controller on the letters face typing into `text`.
pub fn controller(text: &str) -> KeyboardController<RecordingHost> {
    controller_with(&Config::default(), FaceRegistry::with_defaults(), text)
}

/// Creates a controller with a custom config and registry.
pub fn controller_with(
    config: &Config,
    registry: FaceRegistry,
    text: &str,
) -> KeyboardController<RecordingHost> {
    let mut controller = KeyboardController::new(
        registry,
        LETTERS_FACE,
        config,
        RecordingHost::new(MemoryDocument::with_text(text)),
    )
    .unwrap();
    controller.set_bounds(BOUNDS);
    controller
}

/// Center of a key on the controller's current face.
pub fn center(controller: &KeyboardController<RecordingHost>, key: Position) -> Point {
    controller.geometry().key_frame(key).unwrap().center()
}

/// Center of a key of `face` laid out in [`BOUNDS`].
pub fn face_point(face: &Face, key: Position) -> Point {
    FaceGeometry::layout(face, Rect::new(0.0, 0.0, BOUNDS.width, BOUNDS.height))
        .key_frame(key)
        .unwrap()
        .center()
}

/// Taps a key with a fresh touch.
pub fn tap(controller: &mut KeyboardController<RecordingHost>, touch: u64, key: Position) {
    let point = center(controller, key);
    controller.touch_began(TouchId(touch), point, Instant::now());
    controller.touch_ended(TouchId(touch));
}

/// Script steps tapping `keys` of the letters face, 100ms apart.
pub fn tap_steps(keys: &[Position]) -> Vec<ReplayStep> {
    let face = Face::letters();
    let mut steps = Vec::new();
    for (i, key) in (0u64..).zip(keys) {
        let touch = TouchId(i);
        steps.push(ReplayStep {
            at_ms: i * 100,
            event: TouchEvent::Began {
                touch,
                point: face_point(&face, *key),
            },
        });
        steps.push(ReplayStep {
            at_ms: i * 100 + 50,
            event: TouchEvent::Ended { touch },
        });
    }
    steps
}

/// Writes a replay script to a temp directory.
pub fn create_temp_script(steps: Vec<ReplayStep>, text: &str) -> (PathBuf, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("script.json");
    let script = ReplayScript {
        bounds: BOUNDS,
        text: text.to_string(),
        steps,
    };
    fs::write(&path, serde_json::to_string_pretty(&script).unwrap()).unwrap();
    (path, temp_dir)
}

/// Writes faces to a JSON face file.
pub fn write_faces_file(faces: &[Face], path: &Path) -> std::io::Result<()> {
    let json = serde_json::to_string_pretty(faces).map_err(std::io::Error::other)?;
    fs::write(path, json)
}

/// Saves `config` to a config file in a fresh temp directory.
pub fn temp_config(config: &Config) -> (PathBuf, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.toml");
    config.save_to(&path).unwrap();
    (path, temp_dir)
}
