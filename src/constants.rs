//! Application-wide constants.
//!
//! Face identifiers and the default repeat timing.

/// The display name of the application.
pub const APP_NAME: &str = "KeyKit";

/// Identifier of the built-in letters face.
pub const LETTERS_FACE: &str = "com.keykit.letters";

/// Identifier of the built-in numbers face.
pub const NUMBERS_FACE: &str = "com.keykit.numbers";

/// Identifier of the built-in characters face.
pub const CHARACTERS_FACE: &str = "com.keykit.characters";

/// Delay before a held key starts repeating, in milliseconds.
pub const DEFAULT_REPEAT_DELAY_MS: u64 = 300;

/// Interval between repeats once repeating, in milliseconds.
pub const DEFAULT_REPEAT_INTERVAL_MS: u64 = 75;
