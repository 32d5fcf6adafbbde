//! Paragraph type.

use serde::{Deserialize, Serialize};

/// A paragraph of plain text with its (optional) style name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paragraph {
    /// Concatenated text of all runs
    pub text: String,

    /// Style display name, e.g. "Heading 2"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
}

impl Paragraph {
    /// Create a new empty paragraph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an unstyled paragraph with plain text.
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: None,
        }
    }

    /// Create a paragraph with text and a style name.
    pub fn styled(text: impl Into<String>, style: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: Some(style.into()),
        }
    }

    /// Append text to the paragraph.
    pub fn push_str(&mut self, text: &str) {
        self.text.push_str(text);
    }

    /// Get the style name, if any.
    pub fn style_name(&self) -> Option<&str> {
        self.style.as_deref()
    }

    /// Check if the paragraph has no visible text.
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}
