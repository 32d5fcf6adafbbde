//! Word document converter implementation.

use crate::error::Result;
use crate::model::Document;
use crate::parser::DocxParser;
use crate::render::{to_json, to_markdown, to_markdown_with_stats, JsonFormat};
use std::path::Path;

use super::{ConvertOptions, ConvertResult, DocumentConverter, OutputFormat};

/// Word (`.docx`) converter.
///
/// Converts the body of a Word document to Markdown or JSON.
#[derive(Debug, Clone, Default)]
pub struct DocxConverter {
    _private: (),
}

impl DocxConverter {
    /// Create a new Word converter.
    pub fn new() -> Self {
        Self { _private: () }
    }

    fn convert_document(&self, doc: Document, options: &ConvertOptions) -> Result<ConvertResult> {
        let metadata = doc.metadata.clone();
        let mime_type = options.output_format.mime_type();

        match options.output_format {
            OutputFormat::Markdown => {
                if options.collect_stats {
                    let render_result = to_markdown_with_stats(&doc, &options.render)?;
                    Ok(ConvertResult::new(render_result.content, metadata)
                        .with_stats(render_result.stats)
                        .with_mime_type(mime_type))
                } else {
                    let content = to_markdown(&doc, &options.render)?;
                    Ok(ConvertResult::new(content, metadata).with_mime_type(mime_type))
                }
            }
            OutputFormat::Json => {
                let content = to_json(&doc, JsonFormat::Pretty)?;
                Ok(ConvertResult::new(content, metadata).with_mime_type(mime_type))
            }
        }
    }
}

impl DocumentConverter for DocxConverter {
    fn supported_extensions(&self) -> &[&str] {
        &["docx"]
    }

    fn name(&self) -> &str {
        "docx"
    }

    fn convert(&self, path: &Path, options: &ConvertOptions) -> Result<ConvertResult> {
        let parser = DocxParser::open_with_options(path, options.parse.clone())?;
        let doc = parser.parse()?;
        self.convert_document(doc, options)
    }

    fn convert_bytes(&self, bytes: &[u8], options: &ConvertOptions) -> Result<ConvertResult> {
        let parser = DocxParser::from_bytes_with_options(bytes, options.parse.clone())?;
        let doc = parser.parse()?;
        self.convert_document(doc, options)
    }
}
