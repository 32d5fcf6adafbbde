//! Saved chat transcript types.

use serde::{Deserialize, Serialize};

/// A saved chat transcript: `{"messages": [{"role", "content"}, ...]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transcript {
    /// Messages in conversation order
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
}

/// One role-tagged message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Speaker role ("system", "user", "assistant")
    #[serde(default)]
    pub role: String,

    /// Message text
    #[serde(default)]
    pub content: String,
}

impl ChatMessage {
    /// Create a new message.
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
        }
    }
}

impl Transcript {
    /// Parse a transcript from JSON text.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Render the transcript as a Markdown log.
    ///
    /// Each message becomes `role: ...`, `content: ...` and a `---` rule.
    pub fn to_markdown(&self) -> String {
        let mut out = String::new();
        for message in &self.messages {
            out.push_str("role: ");
            out.push_str(&message.role);
            out.push('\n');
            out.push_str("content: ");
            out.push_str(&message.content);
            out.push('\n');
            out.push_str("\n---\n\n");
        }
        out
    }
}
