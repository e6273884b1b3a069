//! Text document collaborator.

/// The text field the keyboard types into.
pub trait TextDocument {
    /// Text before the insertion point, or `None` if the host cannot tell.
    fn text_before_insertion_point(&self) -> Option<String>;

    /// Inserts text at the insertion point.
    fn insert_text(&mut self, text: &str);

    /// Deletes one character before the insertion point.
    fn delete_backward(&mut self);
}

/// In-memory document with the insertion point at the end.
///
/// Used by the replay tool and tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryDocument {
    text: String,
    context_available: bool,
}

impl MemoryDocument {
    /// Creates an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::with_text("")
    }

    /// Creates a document pre-filled with `text`.
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            context_available: true,
        }
    }

    /// Creates a document that reports no context, like a secure field.
    #[must_use]
    pub fn without_context() -> Self {
        Self {
            text: String::new(),
            context_available: false,
        }
    }

    /// Full document text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl TextDocument for MemoryDocument {
    fn text_before_insertion_point(&self) -> Option<String> {
        self.context_available.then(|| self.text.clone())
    }

    fn insert_text(&mut self, text: &str) {
        self.text.push_str(text);
    }

    fn delete_backward(&mut self) {
        self.text.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_document_edits() {
        let mut doc = MemoryDocument::new();
        doc.insert_text("hé");
        doc.insert_text("!");
        doc.delete_backward();
        assert_eq!(doc.text(), "hé");
        doc.delete_backward();
        assert_eq!(doc.text_before_insertion_point().as_deref(), Some("h"));

        let mut empty = MemoryDocument::new();
        empty.delete_backward();
        assert_eq!(empty.text(), "");
    }

    #[test]
    fn test_without_context() {
        let mut doc = MemoryDocument::without_context();
        doc.insert_text("secret");
        assert_eq!(doc.text_before_insertion_point(), None);
        assert_eq!(doc.text(), "secret");
    }
}
