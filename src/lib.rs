//! # docmd
//!
//! Word document to Markdown extraction library for Rust.
//!
//! This library reads the body of a `.docx` file (paragraphs and tables in
//! document order) and renders it as Markdown or JSON. Headings are derived
//! from the paragraph style names `Heading 1` .. `Heading 9`.
//!
//! ## Quick Start
//!
//! ```no_run
//! use docmd::{parse_file, render};
//!
//! fn main() -> docmd::Result<()> {
//!     // Parse a Word document
//!     let doc = parse_file("rules.docx")?;
//!
//!     // Convert to Markdown
//!     let options = render::RenderOptions::default();
//!     let markdown = render::to_markdown(&doc, &options)?;
//!     println!("{}", markdown);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Document order**: paragraphs and tables are emitted as they appear
//! - **Pipe tables**: every table becomes a GitHub-style Markdown table
//! - **Workbook splitting**: one CSV per sheet, deprecated sheets skipped
//! - **Transcripts**: saved chat logs rendered as Markdown

pub mod convert;
pub mod detect;
pub mod error;
pub mod model;
pub mod parser;
pub mod render;
pub mod split;

// Re-export commonly used types
pub use convert::{
    ConvertOptions, ConvertOutcome, ConvertResult, ConverterRegistry, DocumentConverter,
    OutputFormat,
};
pub use detect::{detect_format_from_path, InputFormat};
pub use error::{Error, Result};
pub use model::{
    Block, ChatMessage, Document, Metadata, Paragraph, Table, TableRow, Transcript,
};
pub use parser::{DocxParser, ErrorMode, ParseOptions};
pub use render::{JsonFormat, ParagraphKind, RenderOptions};
pub use split::{split_workbook, SplitOptions, SplitReport};

use std::io::Read;
use std::path::Path;

/// Parse a Word document and return its body elements.
///
/// # Example
///
/// ```no_run
/// use docmd::parse_file;
///
/// let doc = parse_file("rules.docx").unwrap();
/// println!("Blocks: {}", doc.blocks.len());
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Document> {
    let parser = DocxParser::open(path)?;
    parser.parse()
}

/// Parse a Word document with custom options.
///
/// # Example
///
/// ```no_run
/// use docmd::{parse_file_with_options, ParseOptions};
///
/// let options = ParseOptions::new().lenient();
/// let doc = parse_file_with_options("damaged.docx", options).unwrap();
/// ```
pub fn parse_file_with_options<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Document> {
    let parser = DocxParser::open_with_options(path, options)?;
    parser.parse()
}

/// Parse a Word document from bytes.
pub fn parse_bytes(data: &[u8]) -> Result<Document> {
    let parser = DocxParser::from_bytes(data)?;
    parser.parse()
}

/// Parse a Word document from a reader.
///
/// # Example
///
/// ```no_run
/// use docmd::parse_reader;
/// use std::fs::File;
///
/// let file = File::open("rules.docx").unwrap();
/// let doc = parse_reader(file).unwrap();
/// ```
pub fn parse_reader<R: Read>(reader: R) -> Result<Document> {
    let parser = DocxParser::from_reader(reader)?;
    parser.parse()
}

/// Convert a Word document to Markdown.
///
/// # Example
///
/// ```no_run
/// use docmd::to_markdown;
///
/// let markdown = to_markdown("rules.docx").unwrap();
/// std::fs::write("rules.md", markdown).unwrap();
/// ```
pub fn to_markdown<P: AsRef<Path>>(path: P) -> Result<String> {
    let doc = parse_file(path)?;
    render::to_markdown(&doc, &RenderOptions::default())
}

/// Convert a Word document to Markdown with custom options.
pub fn to_markdown_with_options<P: AsRef<Path>>(
    path: P,
    options: &RenderOptions,
) -> Result<String> {
    let doc = parse_file(path)?;
    render::to_markdown(&doc, options)
}

/// Convert a Word document to JSON.
pub fn to_json<P: AsRef<Path>>(path: P, format: JsonFormat) -> Result<String> {
    let doc = parse_file(path)?;
    render::to_json(&doc, format)
}

/// Convert `input` to Markdown and write it to `output`.
///
/// With `output` set to `None` the result is written next to the input with
/// the extension replaced by `.md`. The destination is overwritten.
///
/// # Example
///
/// ```no_run
/// use docmd::convert_file;
///
/// let outcome = convert_file("rules.docx", None).unwrap();
/// assert!(outcome.output.ends_with("rules.md"));
/// ```
pub fn convert_file<P: AsRef<Path>>(input: P, output: Option<&Path>) -> Result<ConvertOutcome> {
    ConverterRegistry::with_defaults().convert_file(
        input.as_ref(),
        output,
        &ConvertOptions::default(),
    )
}

/// Builder for parsing and converting Word documents.
///
/// # Example
///
/// ```no_run
/// use docmd::Docmd;
///
/// let markdown = Docmd::new()
///     .with_frontmatter()
///     .with_max_heading(6)
///     .lenient()
///     .parse("rules.docx")?
///     .to_markdown()?;
/// # Ok::<(), docmd::Error>(())
/// ```
pub struct Docmd {
    parse_options: ParseOptions,
    render_options: RenderOptions,
}

impl Docmd {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            parse_options: ParseOptions::default(),
            render_options: RenderOptions::default(),
        }
    }

    /// Enable lenient parsing mode.
    pub fn lenient(mut self) -> Self {
        self.parse_options = self.parse_options.lenient();
        self
    }

    /// Use raw style ids instead of resolved style names.
    pub fn raw_style_ids(mut self) -> Self {
        self.parse_options = self.parse_options.raw_style_ids();
        self
    }

    /// Enable frontmatter in output.
    pub fn with_frontmatter(mut self) -> Self {
        self.render_options = self.render_options.with_frontmatter(true);
        self
    }

    /// Cap the emitted heading depth.
    pub fn with_max_heading(mut self, level: u8) -> Self {
        self.render_options = self.render_options.with_max_heading(level);
        self
    }

    /// Parse a Word document and return a result wrapper.
    pub fn parse<P: AsRef<Path>>(self, path: P) -> Result<DocmdResult> {
        let parser = DocxParser::open_with_options(path, self.parse_options)?;
        let document = parser.parse()?;
        Ok(DocmdResult {
            document,
            render_options: self.render_options,
        })
    }

    /// Parse a Word document from bytes.
    pub fn parse_bytes(self, data: &[u8]) -> Result<DocmdResult> {
        let parser = DocxParser::from_bytes_with_options(data, self.parse_options)?;
        let document = parser.parse()?;
        Ok(DocmdResult {
            document,
            render_options: self.render_options,
        })
    }
}

impl Default for Docmd {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of parsing a Word document.
pub struct DocmdResult {
    /// The parsed document
    pub document: Document,
    /// Render options to use
    render_options: RenderOptions,
}

impl DocmdResult {
    /// Convert to Markdown.
    pub fn to_markdown(&self) -> Result<String> {
        render::to_markdown(&self.document, &self.render_options)
    }

    /// Convert to JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.document, format)
    }

    /// Get plain text of all body elements.
    pub fn plain_text(&self) -> String {
        self.document.plain_text()
    }

    /// Get the document.
    pub fn document(&self) -> &Document {
        &self.document
    }
}
