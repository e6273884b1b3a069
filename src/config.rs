//! Configuration management for the keyboard.
//!
//! This module handles loading, validating, and saving configuration
//! in TOML format with platform-specific directory resolution.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::constants::{APP_NAME, DEFAULT_REPEAT_DELAY_MS, DEFAULT_REPEAT_INTERVAL_MS};
use crate::dispatch::DispatchOptions;
use crate::models::{KeyStyle, RgbColor};
use crate::tracking::{ReleaseAfterRepeat, RepeatTiming, TrackingState};

/// Brightness (percent) of a pressed or selected key relative to its base color.
const HIGHLIGHT_PERCENT: u8 = 80;

/// Typing behaviour switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BehaviorConfig {
    /// Double space inserts ". "
    pub use_period_shortcut: bool,
    /// Caps lock may be turned on
    pub allow_caps_lock: bool,
    /// Shift turns on at the start of a sentence
    pub auto_capitalize: bool,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            use_period_shortcut: true,
            allow_caps_lock: false,
            auto_capitalize: true,
        }
    }
}

impl From<BehaviorConfig> for DispatchOptions {
    fn from(behavior: BehaviorConfig) -> Self {
        Self {
            use_period_shortcut: behavior.use_period_shortcut,
            allow_caps_lock: behavior.allow_caps_lock,
            auto_capitalize: behavior.auto_capitalize,
        }
    }
}

/// Key repeat configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RepeatConfig {
    /// Hold time before the first repeat, in milliseconds
    pub initial_delay_ms: u64,
    /// Time between repeats, in milliseconds
    pub interval_ms: u64,
    /// What releasing a repeating key emits
    pub release: ReleaseAfterRepeat,
}

impl Default for RepeatConfig {
    fn default() -> Self {
        Self {
            initial_delay_ms: DEFAULT_REPEAT_DELAY_MS,
            interval_ms: DEFAULT_REPEAT_INTERVAL_MS,
            release: ReleaseAfterRepeat::default(),
        }
    }
}

impl RepeatConfig {
    /// Converts to tracker timing.
    #[must_use]
    pub const fn timing(&self) -> RepeatTiming {
        RepeatTiming {
            initial_delay: Duration::from_millis(self.initial_delay_ms),
            interval: Duration::from_millis(self.interval_ms),
        }
    }
}

/// Presentation colors and sizes.
///
/// Drawing is left to the host; these values are handed to it as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppearanceConfig {
    /// Keyboard background
    pub keyboard_color: RgbColor,
    /// Background of `Main` keys
    pub main_key_color: RgbColor,
    /// Background of `Alternate` keys
    pub alternate_key_color: RgbColor,
    /// Background of `Done` keys
    pub done_key_color: RgbColor,
    /// Label color
    pub text_color: RgbColor,
    /// Label font size in points
    pub font_size: f32,
}

impl Default for AppearanceConfig {
    fn default() -> Self {
        Self {
            keyboard_color: RgbColor::new(237, 240, 242),
            main_key_color: RgbColor::new(255, 255, 255),
            alternate_key_color: RgbColor::new(172, 179, 188),
            done_key_color: RgbColor::new(0, 122, 255),
            text_color: RgbColor::new(85, 85, 85),
            font_size: 18.0,
        }
    }
}

impl AppearanceConfig {
    /// Gets the background color for a key style.
    #[must_use]
    pub const fn key_color(&self, style: KeyStyle) -> RgbColor {
        match style {
            KeyStyle::Main => self.main_key_color,
            KeyStyle::Alternate => self.alternate_key_color,
            KeyStyle::Done => self.done_key_color,
        }
    }

    /// Gets the background color of a key of `style` shown in `state`.
    ///
    /// Highlighted and selected keys are drawn darker than at rest.
    #[must_use]
    pub fn fill(&self, style: KeyStyle, state: TrackingState) -> RgbColor {
        let base = self.key_color(style);
        match state {
            TrackingState::Normal => base,
            TrackingState::Highlighted | TrackingState::Selected => {
                base.scaled(HIGHLIGHT_PERCENT)
            }
        }
    }
}

/// Keyboard configuration.
///
/// # File Location
///
/// - Linux: `~/.config/KeyKit/config.toml`
/// - macOS: `~/Library/Application Support/KeyKit/config.toml`
/// - Windows: `%APPDATA%\KeyKit\config.toml`
///
/// # Validation
///
/// - repeat delay and interval must be non-zero
/// - font size must be positive
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    /// Typing behaviour
    #[serde(default)]
    pub behavior: BehaviorConfig,
    /// Key repeat
    #[serde(default)]
    pub repeat: RepeatConfig,
    /// Colors and sizes
    #[serde(default)]
    pub appearance: AppearanceConfig,
}

impl Config {
    /// Creates a new Config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the platform-specific config directory path.
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to determine config directory")?
            .join(APP_NAME);

        Ok(config_dir)
    }

    /// Gets the full path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Loads configuration from the config file.
    ///
    /// If the file doesn't exist, returns default configuration.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_file_path()?;

        if !config_path.exists() {
            tracing::debug!(path = %config_path.display(), "no config file, using defaults");
            return Ok(Self::new());
        }

        Self::load_from(&config_path)
    }

    /// Loads and validates configuration from a specific file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        config
            .validate()
            .with_context(|| format!("Invalid config file: {}", path.display()))?;

        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Saves configuration to the config file using atomic write.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    /// Saves configuration to a specific file.
    ///
    /// Uses temp file + rename pattern for atomic writes.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        self.validate()?;

        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).with_context(|| {
                format!("Failed to create config directory: {}", dir.display())
            })?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;

        let temp_path = path.with_extension("toml.tmp");

        fs::write(&temp_path, content).with_context(|| {
            format!("Failed to write temp config file: {}", temp_path.display())
        })?;

        // Atomic rename
        fs::rename(&temp_path, path).with_context(|| {
            format!("Failed to rename temp config file to: {}", path.display())
        })?;

        Ok(())
    }

    /// Validates configuration values.
    pub fn validate(&self) -> Result<()> {
        if self.repeat.initial_delay_ms == 0 {
            anyhow::bail!("repeat.initial_delay_ms must be greater than 0");
        }
        if self.repeat.interval_ms == 0 {
            anyhow::bail!("repeat.interval_ms must be greater than 0");
        }
        if !(self.appearance.font_size.is_finite() && self.appearance.font_size > 0.0) {
            anyhow::bail!(
                "appearance.font_size must be a positive number, got {}",
                self.appearance.font_size
            );
        }
        Ok(())
    }

    /// Tracker repeat timing.
    #[must_use]
    pub const fn repeat_timing(&self) -> RepeatTiming {
        self.repeat.timing()
    }

    /// Dispatcher options.
    #[must_use]
    pub fn dispatch_options(&self) -> DispatchOptions {
        self.behavior.into()
    }
}
