//! Row of keys.

use crate::models::key::Key;
use serde::{Deserialize, Serialize};

/// An ordered row of keys.
///
/// Insertion order is the left-to-right order on screen.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Row {
    /// Keys from left to right
    pub keys: Vec<Key>,
}

impl Row {
    /// Creates an empty row.
    #[must_use]
    pub const fn new() -> Self {
        Self { keys: Vec::new() }
    }

    /// Creates a row from keys.
    #[must_use]
    pub const fn with_keys(keys: Vec<Key>) -> Self {
        Self { keys }
    }

    /// Appends a key.
    pub fn add(&mut self, key: Key) {
        self.keys.push(key);
    }

    /// Appends several keys.
    pub fn add_all(&mut self, keys: impl IntoIterator<Item = Key>) {
        self.keys.extend(keys);
    }

    /// Removes the first key equal to `key`. Returns whether one was removed.
    pub fn remove(&mut self, key: &Key) -> bool {
        if let Some(index) = self.keys.iter().position(|k| k == key) {
            self.keys.remove(index);
            true
        } else {
            false
        }
    }

    /// Sum of the relative key lengths.
    #[must_use]
    pub fn total_length(&self) -> f64 {
        self.keys.iter().map(|k| k.length).sum()
    }

    /// Number of keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Checks if the row has no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::key::Action;

    #[test]
    fn test_row_add_and_remove() {
        let mut row = Row::new();
        row.add(Key::char("A", "a"));
        row.add_all([Key::char("B", "b"), Key::char("A", "a")]);
        assert_eq!(row.len(), 3);

        assert!(row.remove(&Key::char("A", "a")));
        assert_eq!(row.keys, vec![Key::char("B", "b"), Key::char("A", "a")]);

        assert!(!row.remove(&Key::char("Z", "z")));
        assert_eq!(row.len(), 2);
    }

    #[test]
    fn test_row_total_length() {
        let row = Row::with_keys(vec![
            Key::action("⇧", Action::Shift).with_length(1.5),
            Key::char("Z", "z"),
        ]);
        assert!((row.total_length() - 2.5).abs() < f64::EPSILON);
        assert!(Row::new().is_empty());
    }
}
