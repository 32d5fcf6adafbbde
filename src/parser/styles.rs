//! Paragraph style sheet (`word/styles.xml`).
//!
//! Paragraphs reference styles by id (`<w:pStyle w:val="Heading2"/>`).
//! The style sheet maps those ids to display names (`Heading 2`), which is
//! what heading classification looks at.

use std::collections::HashMap;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::{Error, Result};

use super::get_attr;

/// Built-in style names that Word stores in lowercase.
const BUILTIN_LOWERCASE: &[(&str, &str)] = &[
    ("caption", "Caption"),
    ("footer", "Footer"),
    ("header", "Header"),
    ("heading 1", "Heading 1"),
    ("heading 2", "Heading 2"),
    ("heading 3", "Heading 3"),
    ("heading 4", "Heading 4"),
    ("heading 5", "Heading 5"),
    ("heading 6", "Heading 6"),
    ("heading 7", "Heading 7"),
    ("heading 8", "Heading 8"),
    ("heading 9", "Heading 9"),
];

/// Map an internal style name to the name users see in Word.
pub fn ui_name(internal: &str) -> String {
    BUILTIN_LOWERCASE
        .iter()
        .find(|(raw, _)| *raw == internal)
        .map(|(_, ui)| (*ui).to_string())
        .unwrap_or_else(|| internal.to_string())
}

/// Paragraph style ids and their display names.
#[derive(Debug, Clone, Default)]
pub struct StyleSheet {
    names: HashMap<String, String>,
    default_paragraph: Option<String>,
}

impl StyleSheet {
    /// Create an empty style sheet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a paragraph style.
    pub fn insert(&mut self, id: impl Into<String>, name: impl Into<String>) {
        self.names.insert(id.into(), name.into());
    }

    /// Set the display name of the default paragraph style.
    pub fn set_default(&mut self, name: impl Into<String>) {
        self.default_paragraph = Some(name.into());
    }

    /// Number of known paragraph styles.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Check if no styles are known.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Display name registered for a style id.
    pub fn display_name(&self, id: &str) -> Option<&str> {
        self.names.get(id).map(String::as_str)
    }

    /// Resolve the style name of a paragraph.
    ///
    /// Unknown ids resolve to themselves; a paragraph without `w:pStyle`
    /// gets the default paragraph style.
    pub fn resolve(&self, style_id: Option<&str>) -> Option<String> {
        match style_id {
            Some(id) => Some(
                self.display_name(id)
                    .map(str::to_string)
                    .unwrap_or_else(|| id.to_string()),
            ),
            None => self.default_paragraph.clone(),
        }
    }

    /// Parse `word/styles.xml`.
    pub fn parse(xml: &str) -> Result<Self> {
        let mut sheet = StyleSheet::new();
        let mut reader = Reader::from_str(xml);
        reader.trim_text(true);

        let mut current: Option<PendingStyle> = None;

        loop {
            match reader.read_event() {
                Ok(Event::Start(e)) if e.name().as_ref() == b"w:style" => {
                    current = PendingStyle::from_element(&e);
                }
                Ok(Event::Empty(e)) => match e.name().as_ref() {
                    b"w:name" => {
                        if let (Some(style), Some(name)) = (current.as_mut(), get_attr(&e, b"w:val"))
                        {
                            style.name = Some(name);
                        }
                    }
                    b"w:style" => {
                        // Childless style: the id is all we have.
                        if let Some(style) = PendingStyle::from_element(&e) {
                            style.commit(&mut sheet);
                        }
                    }
                    _ => {}
                },
                Ok(Event::End(e)) if e.name().as_ref() == b"w:style" => {
                    if let Some(style) = current.take() {
                        style.commit(&mut sheet);
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(Error::Xml(format!(
                        "word/styles.xml at byte {}: {}",
                        reader.buffer_position(),
                        e
                    )))
                }
                _ => {}
            }
        }

        log::debug!("Loaded {} paragraph styles", sheet.len());
        Ok(sheet)
    }
}

/// A `w:style` element being read.
struct PendingStyle {
    id: String,
    name: Option<String>,
    is_default: bool,
}

impl PendingStyle {
    /// Returns `None` for non-paragraph styles and styles without an id.
    fn from_element(e: &BytesStart<'_>) -> Option<Self> {
        let kind = get_attr(e, b"w:type");
        if kind.as_deref().is_some_and(|k| k != "paragraph") {
            return None;
        }
        let id = get_attr(e, b"w:styleId")?;
        let is_default = matches!(get_attr(e, b"w:default").as_deref(), Some("1" | "true"));
        Some(Self {
            id,
            name: None,
            is_default,
        })
    }

    fn commit(self, sheet: &mut StyleSheet) {
        let name = ui_name(self.name.as_deref().unwrap_or(&self.id));
        if self.is_default {
            sheet.set_default(name.clone());
        }
        sheet.insert(self.id, name);
    }
}
