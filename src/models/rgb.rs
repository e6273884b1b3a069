//! Key and background colors, written as `#RRGGBB` in config files.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An opaque 24-bit color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RgbColor {
    /// Red channel (0-255)
    pub r: u8,
    /// Green channel (0-255)
    pub g: u8,
    /// Blue channel (0-255)
    pub b: u8,
}

impl RgbColor {
    /// Creates a color from its channels.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Packs the color as `0xRRGGBB`.
    #[must_use]
    pub fn to_rgb24(self) -> u32 {
        u32::from_be_bytes([0, self.r, self.g, self.b])
    }

    /// Unpacks a `0xRRGGBB` value. Bits above 24 are ignored.
    #[must_use]
    pub const fn from_rgb24(value: u32) -> Self {
        let [_, r, g, b] = value.to_be_bytes();
        Self { r, g, b }
    }

    /// Parses `#RRGGBB` or `RRGGBB`, in either case, ignoring surrounding
    /// whitespace.
    ///
    /// ```
    /// use keykit::models::RgbColor;
    ///
    /// let color = RgbColor::from_hex("#EDF0F2").unwrap();
    /// assert_eq!(color, RgbColor::new(237, 240, 242));
    /// ```
    ///
    /// # Errors
    ///
    /// Returns an error unless the text is exactly six hex digits after the
    /// optional `#`.
    pub fn from_hex(text: &str) -> Result<Self> {
        let digits = text.trim();
        let digits = digits.strip_prefix('#').unwrap_or(digits);

        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            anyhow::bail!("Invalid color '{text}'. Expected #RRGGBB");
        }

        let value = u32::from_str_radix(digits, 16)?;
        Ok(Self::from_rgb24(value))
    }

    /// Formats as `#RRGGBB` with uppercase digits.
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:06X}", self.to_rgb24())
    }

    /// Scales every channel to `percent` of its value, towards black.
    ///
    /// Percentages above 100 leave the color unchanged.
    #[must_use]
    pub fn scaled(self, percent: u8) -> Self {
        let percent = u16::from(percent.min(100));
        let scale = |channel: u8| {
            u8::try_from(u16::from(channel) * percent / 100).unwrap_or(channel)
        };
        Self::new(scale(self.r), scale(self.g), scale(self.b))
    }
}

impl fmt::Display for RgbColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for RgbColor {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl TryFrom<String> for RgbColor {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self> {
        Self::from_hex(&value)
    }
}

impl From<RgbColor> for String {
    fn from(color: RgbColor) -> Self {
        color.to_hex()
    }
}

impl Default for RgbColor {
    /// Default to white.
    fn default() -> Self {
        Self::new(255, 255, 255)
    }
}
