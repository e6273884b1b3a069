//! Face (keyboard layout) data structures.

use crate::models::key::Key;
use crate::models::row::Row;
use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Rows per face and keys per row that a [`Position`] can address.
const MAX_INDEXED: usize = 256;

/// Position of a key inside a face.
///
/// `row` counts from the top, `col` from the left edge of the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    /// Row index (0-based)
    pub row: u8,
    /// Key index within the row (0-based)
    pub col: u8,
}

impl Position {
    /// Creates a new Position with the given row and column.
    #[must_use]
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }
}

/// A named keyboard layout made of rows of keys.
///
/// # Validation
///
/// - Identifier must be non-empty, max 100 characters
/// - At most 256 rows, each with at most 256 keys, so every key has a [`Position`]
/// - Rows are fixed once the keyboard session starts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Face {
    /// Unique identifier (e.g., "com.keykit.letters")
    pub identifier: String,
    /// Rows from top to bottom
    #[serde(default)]
    pub rows: Vec<Row>,
}

impl Face {
    /// Creates an empty face.
    ///
    /// # Errors
    ///
    /// Returns an error if the identifier is empty or exceeds 100 characters.
    pub fn new(identifier: impl Into<String>) -> Result<Self> {
        let identifier = identifier.into();
        Self::validate_identifier(&identifier)?;

        Ok(Self {
            identifier,
            rows: Vec::new(),
        })
    }

    /// Creates a face with the given rows.
    ///
    /// # Errors
    ///
    /// Returns an error if the identifier is invalid or the rows do not fit
    /// in a [`Position`].
    pub fn with_rows(identifier: impl Into<String>, rows: Vec<Row>) -> Result<Self> {
        let mut face = Self::new(identifier)?;
        face.rows = rows;
        face.validate_shape()?;
        Ok(face)
    }

    /// Validates identifier and shape of a face built elsewhere (e.g. parsed
    /// from a file).
    pub(crate) fn validate(&self) -> Result<()> {
        Self::validate_identifier(&self.identifier)?;
        self.validate_shape()
    }

    /// Checks that every key is addressable by a [`Position`].
    fn validate_shape(&self) -> Result<()> {
        if self.rows.len() > MAX_INDEXED {
            anyhow::bail!(
                "Face '{}' has {} rows (max {MAX_INDEXED})",
                self.identifier,
                self.rows.len()
            );
        }

        if let Some((r, row)) = self
            .rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() > MAX_INDEXED)
        {
            anyhow::bail!(
                "Row {r} of face '{}' has {} keys (max {MAX_INDEXED})",
                self.identifier,
                row.len()
            );
        }

        Ok(())
    }

    /// Validates a face identifier.
    fn validate_identifier(identifier: &str) -> Result<()> {
        if identifier.is_empty() {
            anyhow::bail!("Face identifier cannot be empty");
        }

        if identifier.len() > 100 {
            anyhow::bail!(
                "Face identifier '{}' exceeds maximum length of 100 characters (got {})",
                identifier,
                identifier.len()
            );
        }

        Ok(())
    }

    /// Appends a row.
    pub fn add_row(&mut self, row: Row) {
        self.rows.push(row);
    }

    /// Appends several rows.
    pub fn add_rows(&mut self, rows: impl IntoIterator<Item = Row>) {
        self.rows.extend(rows);
    }

    /// Removes the first row equal to `row`. Returns whether one was removed.
    pub fn remove_row(&mut self, row: &Row) -> bool {
        if let Some(index) = self.rows.iter().position(|r| r == row) {
            self.rows.remove(index);
            true
        } else {
            false
        }
    }

    /// Gets the key at the given position.
    #[must_use]
    pub fn key(&self, position: Position) -> Option<&Key> {
        self.rows
            .get(usize::from(position.row))?
            .keys
            .get(usize::from(position.col))
    }

    /// Iterates over all keys with their positions, row by row.
    ///
    /// Keys beyond what a [`Position`] can address are skipped.
    pub fn keys(&self) -> impl Iterator<Item = (Position, &Key)> + '_ {
        self.rows
            .iter()
            .zip(0..=u8::MAX)
            .flat_map(|(row, r)| {
                row.keys
                    .iter()
                    .zip(0..=u8::MAX)
                    .map(move |(key, c)| (Position::new(r, c), key))
            })
    }

    /// Collects the positions of all keys matching `predicate`.
    pub fn positions_matching(&self, predicate: impl Fn(&Key) -> bool) -> Vec<Position> {
        self.keys()
            .filter(|(_, key)| predicate(key))
            .map(|(position, _)| position)
            .collect()
    }

    /// Total number of keys.
    #[must_use]
    pub fn key_count(&self) -> usize {
        self.rows.iter().map(Row::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::key::Action;

    fn sample_face() -> Face {
        Face::with_rows(
            "test",
            vec![
                Row::with_keys(vec![Key::char("Q", "q"), Key::char("W", "w")]),
                Row::with_keys(vec![
                    Key::action("⇧", Action::Shift),
                    Key::char("Z", "z"),
                    Key::action("⇧", Action::Shift),
                ]),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_face_validate_identifier() {
        assert!(Face::new("com.keykit.letters").is_ok());
        assert!(Face::new("").is_err());
        assert!(Face::new("a".repeat(101)).is_err());
    }

    #[test]
    fn test_face_key_lookup() {
        let face = sample_face();
        assert_eq!(face.key(Position::new(0, 1)), Some(&Key::char("W", "w")));
        assert_eq!(face.key(Position::new(1, 3)), None);
        assert_eq!(face.key(Position::new(5, 0)), None);
        assert_eq!(face.key_count(), 5);
    }

    #[test]
    fn test_face_positions_matching() {
        let face = sample_face();
        let shifts = face.positions_matching(Key::is_shift);
        assert_eq!(shifts, vec![Position::new(1, 0), Position::new(1, 2)]);
    }

    fn wide_row(len: usize) -> Row {
        Row::with_keys((0..len).map(|i| Key::char(i.to_string(), format!("<{i}>"))).collect())
    }

    #[test]
    fn test_face_rejects_unaddressable_rows() {
        assert!(Face::with_rows("wide", vec![wide_row(256)]).is_ok());

        let err = Face::with_rows("wide", vec![wide_row(257)]).unwrap_err();
        assert!(err.to_string().contains("257 keys"), "{err}");

        let tall = vec![Row::new(); 257];
        assert!(Face::with_rows("tall", tall).is_err());
    }

    #[test]
    fn test_face_keys_never_wrap_positions() {
        // Built without validation, as after add_row
        let mut face = Face::new("wide").unwrap();
        face.add_row(wide_row(257));

        let keys: Vec<_> = face.keys().collect();
        assert_eq!(keys.len(), 256);
        assert_eq!(keys.last().unwrap().0, Position::new(0, 255));
        assert_eq!(
            keys.iter().filter(|(p, _)| *p == Position::new(0, 0)).count(),
            1
        );
    }

    #[test]
    fn test_face_row_mutation() {
        let mut face = Face::new("test").unwrap();
        let row = Row::with_keys(vec![Key::char("A", "a")]);
        face.add_row(row.clone());
        face.add_rows([Row::new(), Row::new()]);
        assert_eq!(face.rows.len(), 3);

        assert!(face.remove_row(&row));
        assert!(!face.remove_row(&row));
        assert_eq!(face.rows.len(), 2);
    }
}
