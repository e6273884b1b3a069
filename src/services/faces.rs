//! Face registry and face file I/O.

use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::models::Face;

/// Identifier-keyed collection of faces available to a keyboard session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FaceRegistry {
    faces: BTreeMap<String, Face>,
}

impl FaceRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the built-in letters, numbers and characters faces.
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for face in Face::defaults() {
            registry.insert(face);
        }
        registry
    }

    /// Builds a registry from faces, rejecting duplicate identifiers.
    pub fn from_faces(faces: impl IntoIterator<Item = Face>) -> Result<Self> {
        let mut registry = Self::new();
        for face in faces {
            face.validate()?;
            if registry.contains(&face.identifier) {
                anyhow::bail!("Duplicate face identifier: {}", face.identifier);
            }
            registry.insert(face);
        }
        Ok(registry)
    }

    /// Adds a face, replacing any face with the same identifier.
    pub fn insert(&mut self, face: Face) -> Option<Face> {
        self.faces.insert(face.identifier.clone(), face)
    }

    /// Gets a face by identifier.
    #[must_use]
    pub fn get(&self, identifier: &str) -> Option<&Face> {
        self.faces.get(identifier)
    }

    /// Gets a face by identifier, failing if it is not registered.
    pub fn require(&self, identifier: &str) -> Result<&Face> {
        self.get(identifier).with_context(|| {
            format!("Could not load face. Face for identifier: {identifier} cannot be found.")
        })
    }

    /// Checks if a face is registered.
    #[must_use]
    pub fn contains(&self, identifier: &str) -> bool {
        self.faces.contains_key(identifier)
    }

    /// Registered identifiers in sorted order.
    pub fn identifiers(&self) -> impl Iterator<Item = &str> {
        self.faces.keys().map(String::as_str)
    }

    /// All faces in identifier order.
    pub fn faces(&self) -> impl Iterator<Item = &Face> {
        self.faces.values()
    }

    /// Number of registered faces.
    #[must_use]
    pub fn len(&self) -> usize {
        self.faces.len()
    }

    /// Checks if no faces are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Loads faces from a JSON file containing an array of faces.
    pub fn load_file(path: &Path) -> Result<Vec<Face>> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read face file: {}", path.display()))?;

        let faces: Vec<Face> = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse face file: {}", path.display()))?;

        for face in &faces {
            face.validate()
                .with_context(|| format!("Invalid face in {}", path.display()))?;
        }

        Ok(faces)
    }

    /// Loads faces from a JSON file on top of this registry.
    ///
    /// Faces from the file replace registered faces with the same identifier.
    pub fn merge_file(&mut self, path: &Path) -> Result<usize> {
        let faces = Self::load_file(path)?;
        let count = faces.len();
        for face in faces {
            tracing::debug!(face = %face.identifier, "loaded face from file");
            self.insert(face);
        }
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{LETTERS_FACE, NUMBERS_FACE};
    use crate::models::{Key, Row};
    use tempfile::TempDir;

    #[test]
    fn test_registry_defaults() {
        let registry = FaceRegistry::with_defaults();
        assert_eq!(registry.len(), 3);
        assert!(registry.contains(LETTERS_FACE));
        assert!(registry.get(NUMBERS_FACE).is_some());
        assert!(registry.require("missing").is_err());
    }

    #[test]
    fn test_registry_rejects_duplicates() {
        let result = FaceRegistry::from_faces(vec![Face::letters(), Face::letters()]);
        assert!(result.is_err());

        let registry = FaceRegistry::from_faces(vec![Face::letters(), Face::numbers()]).unwrap();
        assert_eq!(
            registry.identifiers().collect::<Vec<_>>(),
            vec![LETTERS_FACE, NUMBERS_FACE]
        );
    }

    #[test]
    fn test_merge_file_replaces_faces() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("faces.json");
        let custom = Face::with_rows(
            LETTERS_FACE,
            vec![Row::with_keys(vec![Key::char("Ä", "ä")])],
        )
        .unwrap();
        fs::write(&path, serde_json::to_string(&vec![custom.clone()]).unwrap()).unwrap();

        let mut registry = FaceRegistry::with_defaults();
        assert_eq!(registry.merge_file(&path).unwrap(), 1);
        assert_eq!(registry.get(LETTERS_FACE), Some(&custom));
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn test_load_file_errors() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("missing.json");
        assert!(FaceRegistry::load_file(&missing).is_err());

        let invalid = temp_dir.path().join("invalid.json");
        fs::write(&invalid, r#"[{"identifier": "", "rows": []}]"#).unwrap();
        assert!(FaceRegistry::load_file(&invalid).is_err());
    }

    #[test]
    fn test_load_file_rejects_oversized_row() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("wide.json");

        let mut wide = Face::new("com.example.wide").unwrap();
        wide.add_row(Row::with_keys(
            (0..257).map(|i| Key::char("x", format!("<{i}>"))).collect(),
        ));
        fs::write(&path, serde_json::to_string(&vec![wide.clone()]).unwrap()).unwrap();

        let err = FaceRegistry::load_file(&path).unwrap_err();
        assert!(format!("{err:#}").contains("257 keys"), "{err:#}");
        assert!(FaceRegistry::from_faces(vec![wide]).is_err());
    }
}
