//! Chat transcript converter implementation.

use crate::error::{Error, Result};
use crate::model::{Metadata, Transcript};
use std::fs;
use std::path::Path;

use super::{ConvertOptions, ConvertResult, DocumentConverter, OutputFormat};

/// Saved chat transcript (`.json`) converter.
///
/// Produces a Markdown log with one `role:`/`content:` block per message,
/// each followed by a horizontal rule.
#[derive(Debug, Clone, Default)]
pub struct TranscriptConverter {
    _private: (),
}

impl TranscriptConverter {
    /// Create a new transcript converter.
    pub fn new() -> Self {
        Self { _private: () }
    }

    fn convert_text(&self, json: &str, options: &ConvertOptions) -> Result<ConvertResult> {
        let transcript = Transcript::from_json(json)?;
        log::debug!("Read transcript with {} messages", transcript.messages.len());

        let content = match options.output_format {
            OutputFormat::Markdown => transcript.to_markdown(),
            OutputFormat::Json => serde_json::to_string_pretty(&transcript)?,
        };
        Ok(ConvertResult::new(content, Metadata::default())
            .with_mime_type(options.output_format.mime_type()))
    }
}

impl DocumentConverter for TranscriptConverter {
    fn supported_extensions(&self) -> &[&str] {
        &["json"]
    }

    fn name(&self) -> &str {
        "transcript"
    }

    fn convert(&self, path: &Path, options: &ConvertOptions) -> Result<ConvertResult> {
        let json = fs::read_to_string(path).map_err(|e| Error::open(path, e))?;
        let mut result = self.convert_text(&json, options)?;
        result.metadata.source = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned());
        Ok(result)
    }

    fn convert_bytes(&self, bytes: &[u8], options: &ConvertOptions) -> Result<ConvertResult> {
        let json = std::str::from_utf8(bytes)
            .map_err(|e| Error::DocumentOpen(format!("transcript is not UTF-8: {}", e)))?;
        self.convert_text(json, options)
    }
}
