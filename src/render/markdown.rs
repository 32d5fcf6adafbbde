//! Markdown rendering for parsed documents.
//!
//! Rendering is a single forward pass over the body elements that appends
//! [`MarkdownLine`]s; the final text is the lines joined with `\n`.

use std::fmt;

use crate::error::Result;
use crate::model::{Block, Document, Paragraph, Table};

use super::{classify_style, ExtractionStats, ParagraphKind, RenderOptions, RenderResult};

/// Convert a document to Markdown.
pub fn to_markdown(doc: &Document, options: &RenderOptions) -> Result<String> {
    let renderer = MarkdownRenderer::new(options.clone());
    renderer.render(doc)
}

/// Convert a document to Markdown with statistics.
pub fn to_markdown_with_stats(doc: &Document, options: &RenderOptions) -> Result<RenderResult> {
    let renderer = MarkdownRenderer::new(options.clone());
    renderer.render_with_stats(doc)
}

/// One line of Markdown output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkdownLine {
    /// `#`-prefixed heading
    Heading {
        /// Number of `#` characters
        level: u8,
        /// Heading text
        text: String,
    },
    /// Plain paragraph text
    Text(String),
    /// `| a | b |`
    TableRow(Vec<String>),
    /// `| --- | --- |` with the given number of columns
    TableSeparator(usize),
    /// Empty separator line
    Blank,
}

impl fmt::Display for MarkdownLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarkdownLine::Heading { level, text } => {
                write!(f, "{} {}", "#".repeat(*level as usize), text)
            }
            MarkdownLine::Text(text) => f.write_str(text),
            MarkdownLine::TableRow(cells) => write!(f, "| {} |", cells.join(" | ")),
            MarkdownLine::TableSeparator(columns) => {
                write!(f, "| {} |", vec!["---"; *columns].join(" | "))
            }
            MarkdownLine::Blank => Ok(()),
        }
    }
}

/// Markdown renderer.
pub struct MarkdownRenderer {
    options: RenderOptions,
    stats: ExtractionStats,
}

impl MarkdownRenderer {
    /// Create a new Markdown renderer.
    pub fn new(options: RenderOptions) -> Self {
        Self {
            options,
            stats: ExtractionStats::new(),
        }
    }

    /// Render a document to Markdown.
    pub fn render(mut self, doc: &Document) -> Result<String> {
        Ok(self.render_internal(doc))
    }

    /// Render a document to Markdown with extraction statistics.
    pub fn render_with_stats(mut self, doc: &Document) -> Result<RenderResult> {
        let content = self.render_internal(doc);

        self.stats.count_text(&content);

        Ok(RenderResult::new(content, doc.metadata.clone(), self.stats))
    }

    /// Produce the output lines for a document, in order.
    pub fn lines(&mut self, doc: &Document) -> Vec<MarkdownLine> {
        let mut lines = Vec::new();
        for block in &doc.blocks {
            match block {
                Block::Paragraph(p) => self.render_paragraph(&mut lines, p),
                Block::Table(t) => self.render_table(&mut lines, t),
            }
        }
        lines
    }

    fn render_internal(&mut self, doc: &Document) -> String {
        let mut output = String::new();

        if self.options.include_frontmatter {
            output.push_str(&doc.metadata.to_yaml_frontmatter());
        }

        let body = self
            .lines(doc)
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n");
        output.push_str(&body);

        output
    }

    fn render_paragraph(&mut self, lines: &mut Vec<MarkdownLine>, para: &Paragraph) {
        if para.is_empty() {
            self.stats.add_skipped_paragraph();
            return;
        }

        match classify_style(para.style_name()) {
            ParagraphKind::Heading(level) => {
                self.stats.add_heading();
                lines.push(MarkdownLine::Heading {
                    level: level.min(self.options.max_heading_level),
                    text: para.text.clone(),
                });
            }
            ParagraphKind::Plain => {
                self.stats.add_paragraph();
                lines.push(MarkdownLine::Text(para.text.clone()));
            }
        }
        lines.push(MarkdownLine::Blank);
    }

    fn render_table(&mut self, lines: &mut Vec<MarkdownLine>, table: &Table) {
        let rows: Vec<Vec<String>> = table
            .non_empty_rows()
            .map(|row| row.cells.iter().map(|c| cell_text(c)).collect())
            .collect();

        self.stats.add_dropped_rows(table.row_count() - rows.len());
        if !rows.is_empty() {
            self.stats.add_table(rows.len());
        }

        let mut rows = rows.into_iter();
        let Some(header) = rows.next() else {
            return;
        };
        let width = header.len();

        lines.push(MarkdownLine::TableRow(header));
        lines.push(MarkdownLine::TableSeparator(width));
        for mut row in rows {
            if row.len() < width {
                row.resize(width, String::new());
            }
            lines.push(MarkdownLine::TableRow(row));
        }
        lines.push(MarkdownLine::Blank);
    }
}

/// Cell text as it appears inside a pipe table: trimmed, on one line.
fn cell_text(raw: &str) -> String {
    raw.trim().replace("\r\n", " ").replace(['\n', '\r'], " ")
}
