//! Heading detection from paragraph style names.
//!
//! Word names its built-in heading styles "Heading 1" through "Heading 9".
//! A style counts as a heading when it starts with [`HEADING_MARKER`] and its
//! last character is a digit in `1..=9`. Anything else, including "Heading"
//! with no digit or "Heading 10", is a plain paragraph. Unparseable heading
//! styles are never an error.

/// Literal prefix of heading style names.
pub const HEADING_MARKER: &str = "Heading";

/// Deepest heading level a style name can express.
pub const MAX_HEADING_LEVEL: u8 = 9;

/// How a paragraph is emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParagraphKind {
    /// Heading with level 1-9
    Heading(u8),
    /// Ordinary text
    Plain,
}

impl ParagraphKind {
    /// Heading level, if this is a heading.
    pub fn heading_level(&self) -> Option<u8> {
        match self {
            ParagraphKind::Heading(level) => Some(*level),
            ParagraphKind::Plain => None,
        }
    }
}

/// Classify a paragraph by its style name.
pub fn classify_style(style: Option<&str>) -> ParagraphKind {
    let Some(name) = style else {
        return ParagraphKind::Plain;
    };
    if !name.starts_with(HEADING_MARKER) {
        return ParagraphKind::Plain;
    }

    match name.chars().last().and_then(|c| c.to_digit(10)) {
        Some(level @ 1..=9) => ParagraphKind::Heading(level as u8),
        _ => ParagraphKind::Plain,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_levels() {
        for level in 1..=9u8 {
            let spaced = format!("Heading {}", level);
            let compact = format!("Heading{}", level);
            assert_eq!(
                classify_style(Some(&spaced)),
                ParagraphKind::Heading(level)
            );
            assert_eq!(
                classify_style(Some(&compact)),
                ParagraphKind::Heading(level)
            );
        }
    }

    #[test]
    fn test_unparseable_heading_falls_back_to_plain() {
        assert_eq!(classify_style(Some("Heading")), ParagraphKind::Plain);
        assert_eq!(classify_style(Some("Heading X")), ParagraphKind::Plain);
        assert_eq!(classify_style(Some("Heading 0")), ParagraphKind::Plain);
        assert_eq!(classify_style(Some("Heading 10")), ParagraphKind::Plain);
        assert_eq!(classify_style(Some("Heading ٣")), ParagraphKind::Plain);
    }

    #[test]
    fn test_non_heading_styles_are_plain() {
        assert_eq!(classify_style(None), ParagraphKind::Plain);
        assert_eq!(classify_style(Some("")), ParagraphKind::Plain);
        assert_eq!(classify_style(Some("Normal")), ParagraphKind::Plain);
        assert_eq!(classify_style(Some("Title")), ParagraphKind::Plain);
        assert_eq!(classify_style(Some("List Paragraph 2")), ParagraphKind::Plain);
        // The marker is case-sensitive.
        assert_eq!(classify_style(Some("heading 2")), ParagraphKind::Plain);
    }

    #[test]
    fn test_heading_level_accessor() {
        assert_eq!(ParagraphKind::Heading(3).heading_level(), Some(3));
        assert_eq!(ParagraphKind::Plain.heading_level(), None);
    }
}
