//! Rendering result with metadata and statistics.

use crate::model::Metadata;
use serde::{Deserialize, Serialize};

/// Result of rendering a document, including content and statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderResult {
    /// The rendered content
    pub content: String,

    /// Document metadata (copied from source document)
    pub metadata: Metadata,

    /// Extraction statistics
    pub stats: ExtractionStats,
}

impl RenderResult {
    /// Create a new render result.
    pub fn new(content: String, metadata: Metadata, stats: ExtractionStats) -> Self {
        Self {
            content,
            metadata,
            stats,
        }
    }

    /// Create a simple result with just content.
    pub fn content_only(content: String) -> Self {
        Self {
            content,
            metadata: Metadata::default(),
            stats: ExtractionStats::default(),
        }
    }

    /// Get the content length in bytes.
    pub fn content_len(&self) -> usize {
        self.content.len()
    }
}

/// Statistics collected during content extraction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionStats {
    /// Number of plain paragraphs emitted
    pub paragraph_count: u32,

    /// Number of headings emitted
    pub heading_count: u32,

    /// Number of tables emitted
    pub table_count: u32,

    /// Number of table rows emitted (header included)
    pub table_row_count: u32,

    /// Paragraphs dropped because their text was blank
    pub skipped_paragraph_count: u32,

    /// Table rows dropped because they had no cells
    pub dropped_row_count: u32,

    /// Approximate word count (whitespace-separated tokens)
    pub word_count: u32,

    /// Character count (excluding whitespace)
    pub char_count: u32,
}

impl ExtractionStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment paragraph count.
    pub fn add_paragraph(&mut self) {
        self.paragraph_count += 1;
    }

    /// Increment heading count.
    pub fn add_heading(&mut self) {
        self.heading_count += 1;
    }

    /// Record an emitted table with `rows` rows.
    pub fn add_table(&mut self, rows: usize) {
        self.table_count += 1;
        self.table_row_count += rows as u32;
    }

    /// Increment skipped paragraph count.
    pub fn add_skipped_paragraph(&mut self) {
        self.skipped_paragraph_count += 1;
    }

    /// Add to the dropped row count.
    pub fn add_dropped_rows(&mut self, rows: usize) {
        self.dropped_row_count += rows as u32;
    }

    /// Add word and character counts from text.
    pub fn count_text(&mut self, text: &str) {
        self.word_count += text.split_whitespace().count() as u32;
        self.char_count += text.chars().filter(|c| !c.is_whitespace()).count() as u32;
    }

    /// Merge another stats instance into this one.
    pub fn merge(&mut self, other: &ExtractionStats) {
        self.paragraph_count += other.paragraph_count;
        self.heading_count += other.heading_count;
        self.table_count += other.table_count;
        self.table_row_count += other.table_row_count;
        self.skipped_paragraph_count += other.skipped_paragraph_count;
        self.dropped_row_count += other.dropped_row_count;
        self.word_count += other.word_count;
        self.char_count += other.char_count;
    }
}
