//! Built-in faces: letters, numbers and characters.

use crate::constants::{CHARACTERS_FACE, LETTERS_FACE, NUMBERS_FACE};
use crate::models::face::Face;
use crate::models::key::{Action, Key, KeyStyle, Label, Value};
use crate::models::row::Row;

/// Builds a row of plain character keys, labelled with their own text.
fn symbol_row(symbols: &[&str]) -> Row {
    Row::with_keys(symbols.iter().map(|s| Key::char(*s, *s)).collect())
}

/// Builds a row of letter keys labelled in uppercase.
fn letter_row(letters: &str) -> Row {
    Row::with_keys(
        letters
            .chars()
            .map(|c| Key::char(c.to_uppercase().to_string(), c.to_string()))
            .collect(),
    )
}

fn edge_key(label: &str, action: Action) -> Key {
    Key::action(label, action)
        .with_length(1.5)
        .with_style(KeyStyle::Alternate)
}

/// Bottom row shared by every built-in face.
fn bottom_row(switch_label: &str, switch_to: &str) -> Row {
    Row::with_keys(vec![
        Key::action(switch_label, Action::ChangeFace(switch_to.to_string()))
            .with_length(1.25)
            .with_style(KeyStyle::Alternate),
        Key::new(Label::Icon("globe".to_string()), Value::Action(Action::Globe))
            .with_length(1.25)
            .with_style(KeyStyle::Alternate),
        Key::char("space", " ").with_length(5.0),
        Key::action("return", Action::Return)
            .with_length(2.5)
            .with_style(KeyStyle::Done),
    ])
}

impl Face {
    /// The QWERTY letters face.
    #[must_use]
    pub fn letters() -> Self {
        let mut third = letter_row("zxcvbnm");
        third.keys.insert(0, edge_key("⇧", Action::Shift));
        third.add(edge_key("⌫", Action::Backspace));

        Self {
            identifier: LETTERS_FACE.to_string(),
            rows: vec![
                letter_row("qwertyuiop"),
                letter_row("asdfghjkl"),
                third,
                bottom_row("123", NUMBERS_FACE),
            ],
        }
    }

    /// Digits and common punctuation.
    #[must_use]
    pub fn numbers() -> Self {
        let mut third = symbol_row(&[".", ",", "?", "!", "'"]);
        third
            .keys
            .insert(0, edge_key("#+=", Action::ChangeFace(CHARACTERS_FACE.to_string())));
        third.add(edge_key("⌫", Action::Backspace));

        Self {
            identifier: NUMBERS_FACE.to_string(),
            rows: vec![
                symbol_row(&["1", "2", "3", "4", "5", "6", "7", "8", "9", "0"]),
                symbol_row(&["-", "/", ":", ";", "(", ")", "$", "&", "@", "\""]),
                third,
                bottom_row("ABC", LETTERS_FACE),
            ],
        }
    }

    /// Brackets, math and currency symbols.
    #[must_use]
    pub fn characters() -> Self {
        let mut third = symbol_row(&[".", ",", "?", "!", "'"]);
        third
            .keys
            .insert(0, edge_key("123", Action::ChangeFace(NUMBERS_FACE.to_string())));
        third.add(edge_key("⌫", Action::Backspace));

        Self {
            identifier: CHARACTERS_FACE.to_string(),
            rows: vec![
                symbol_row(&["[", "]", "{", "}", "#", "%", "^", "*", "+", "="]),
                symbol_row(&["_", "\\", "|", "~", "<", ">", "€", "£", "¥", "•"]),
                third,
                bottom_row("ABC", LETTERS_FACE),
            ],
        }
    }

    /// All built-in faces.
    #[must_use]
    pub fn defaults() -> Vec<Self> {
        vec![Self::letters(), Self::numbers(), Self::characters()]
    }
}
