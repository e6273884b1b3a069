//! End-to-end tests for the `keykit` binary.

use std::process::Command;

use keykit::config::Config;
use keykit::models::{Face, Key, Position, Row};
use tempfile::TempDir;

mod fixtures;
use fixtures::*;

/// Path to the keykit binary
fn keykit_bin() -> String {
    std::env::var("CARGO_BIN_EXE_keykit").unwrap_or_else(|_| "target/release/keykit".to_string())
}

/// Creates a Command that reads config from `config_path` instead of the
/// user's config directory.
fn keykit(args: &[&str], config_path: &std::path::Path) -> Command {
    let mut cmd = Command::new(keykit_bin());
    cmd.arg("--config").arg(config_path);
    cmd.args(args);
    cmd
}

// ============================================================================
// Replay Command Tests
// ============================================================================

#[test]
fn test_replay_prints_text_and_events() {
    let (config_path, _config_dir) = temp_config(&Config::default());
    let h = Position::new(1, 5);
    let i = Position::new(0, 7);
    let (script, _script_dir) = create_temp_script(tap_steps(&[h, i]), "");

    let output = keykit(&["replay", script.to_str().unwrap()], &config_path)
        .output()
        .expect("Failed to execute command");

    assert_eq!(
        output.status.code(),
        Some(0),
        "Replay should succeed. stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Text: \"Hi\""), "stdout: {stdout}");
    assert!(stdout.contains("key activated: H"), "stdout: {stdout}");
    assert!(stdout.contains("key activated: I"), "stdout: {stdout}");
}

#[test]
fn test_replay_json_output() {
    let mut config = Config::default();
    config.behavior.auto_capitalize = false;
    let (config_path, _config_dir) = temp_config(&config);
    let (script, _script_dir) = create_temp_script(tap_steps(&[Position::new(0, 0)]), "");

    let output = keykit(&["replay", script.to_str().unwrap(), "--json"], &config_path)
        .output()
        .expect("Failed to execute command");
    assert_eq!(output.status.code(), Some(0));

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["text"], "q");
    assert_eq!(json["face"], "com.keykit.letters");
    assert_eq!(json["clicks"], 1);
    assert_eq!(json["events"][0]["type"], "key_activated");
}

#[test]
fn test_replay_unknown_face_fails() {
    let (config_path, _config_dir) = temp_config(&Config::default());
    let (script, _script_dir) = create_temp_script(Vec::new(), "");

    let output = keykit(
        &["replay", script.to_str().unwrap(), "--face", "com.example.none"],
        &config_path,
    )
    .output()
    .expect("Failed to execute command");

    assert_ne!(output.status.code(), Some(0));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("com.example.none"), "stderr: {stderr}");
}

#[test]
fn test_replay_missing_script_fails() {
    let (config_path, config_dir) = temp_config(&Config::default());
    let missing = config_dir.path().join("missing.json");

    let output = keykit(&["replay", missing.to_str().unwrap()], &config_path)
        .output()
        .expect("Failed to execute command");

    assert_ne!(output.status.code(), Some(0));
}

#[test]
fn test_invalid_config_fails() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, "[repeat]\ninterval_ms = 0\n").unwrap();

    let output = keykit(&["faces"], &config_path)
        .output()
        .expect("Failed to execute command");

    assert_ne!(output.status.code(), Some(0));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("interval_ms"), "stderr: {stderr}");
}

// ============================================================================
// Faces Command Tests
// ============================================================================

#[test]
fn test_faces_lists_defaults() {
    let (config_path, _config_dir) = temp_config(&Config::default());

    let output = keykit(&["faces"], &config_path)
        .output()
        .expect("Failed to execute command");
    assert_eq!(output.status.code(), Some(0));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("com.keykit.letters"));
    assert!(stdout.contains("com.keykit.numbers"));
    assert!(stdout.contains("com.keykit.characters"));
}

#[test]
fn test_faces_with_custom_file_json() {
    let (config_path, config_dir) = temp_config(&Config::default());
    let faces_path = config_dir.path().join("faces.json");
    let face = Face::with_rows(
        "com.example.arrows",
        vec![Row::with_keys(vec![Key::char("←", "←"), Key::char("→", "→")])],
    )
    .unwrap();
    write_faces_file(&[face], &faces_path).unwrap();

    let output = keykit(
        &["faces", "--faces", faces_path.to_str().unwrap(), "--json"],
        &config_path,
    )
    .output()
    .expect("Failed to execute command");
    assert_eq!(
        output.status.code(),
        Some(0),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let ids: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|face| face["identifier"].as_str().unwrap())
        .collect();
    assert_eq!(ids.len(), 4);
    assert!(ids.contains(&"com.example.arrows"));
}
