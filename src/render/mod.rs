//! Rendering module for converting documents to output formats.

mod heading;
mod json;
mod markdown;
mod options;
mod result;

pub use heading::{classify_style, ParagraphKind, HEADING_MARKER, MAX_HEADING_LEVEL};
pub use json::{to_json, JsonFormat};
pub use markdown::{to_markdown, to_markdown_with_stats, MarkdownLine, MarkdownRenderer};
pub use options::RenderOptions;
pub use result::{ExtractionStats, RenderResult};
