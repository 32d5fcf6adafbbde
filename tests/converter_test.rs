//! Integration tests for the converter module.

mod common;

use std::fs;
use std::path::Path;
use std::sync::Arc;

use docmd::convert::{
    ConvertOptions, ConvertResult, ConverterRegistry, DocumentConverter, DocxConverter,
    OutputFormat, TranscriptConverter,
};
use docmd::error::{Error, Result};

/// Mock converter for testing.
struct MockConverter {
    extensions: Vec<&'static str>,
    name: &'static str,
}

impl MockConverter {
    fn new(extensions: Vec<&'static str>, name: &'static str) -> Self {
        Self { extensions, name }
    }
}

impl DocumentConverter for MockConverter {
    fn supported_extensions(&self) -> &[&str] {
        &self.extensions
    }

    fn name(&self) -> &str {
        self.name
    }

    fn convert(&self, _path: &Path, _options: &ConvertOptions) -> Result<ConvertResult> {
        Ok(ConvertResult::new(
            format!("Converted by {}", self.name),
            Default::default(),
        ))
    }

    fn convert_bytes(&self, _bytes: &[u8], _options: &ConvertOptions) -> Result<ConvertResult> {
        Ok(ConvertResult::new(
            format!("Converted bytes by {}", self.name),
            Default::default(),
        ))
    }
}

#[test]
fn test_converter_registry_new() {
    let registry = ConverterRegistry::new();

    // Empty registry should support nothing
    assert!(!registry.supports("docx"));
    assert!(!registry.supports("json"));
}

#[test]
fn test_converter_registry_with_defaults() {
    let registry = ConverterRegistry::with_defaults();

    assert!(registry.supports("docx"));
    assert!(registry.supports("DOCX")); // Case insensitive
    assert!(registry.supports("json"));
    assert!(!registry.supports("doc"));
}

#[test]
fn test_converter_registry_register() {
    let mut registry = ConverterRegistry::new();
    let converter = Arc::new(MockConverter::new(vec!["txt", "text"], "text"));

    registry.register(converter);

    assert!(registry.supports("txt"));
    assert!(registry.supports("text"));
    assert!(registry.supports("TXT"));
}

#[test]
fn test_converter_registry_get_by_extension() {
    let registry = ConverterRegistry::with_defaults();

    let converter = registry.get_by_extension("docx");
    assert_eq!(converter.unwrap().name(), "docx");

    let converter = registry.get_by_extension("json");
    assert_eq!(converter.unwrap().name(), "transcript");

    assert!(registry.get_by_extension("pdf").is_none());
}

#[test]
fn test_converter_registry_multiple_converters() {
    let mut registry = ConverterRegistry::new();

    registry.register(Arc::new(DocxConverter::new()));
    registry.register(Arc::new(MockConverter::new(vec!["xls", "xlsx"], "excel")));

    assert!(registry.supports("docx"));
    assert!(registry.supports("xlsx"));

    let converter = registry.get_by_name("excel");
    assert!(converter.unwrap().supports_extension("xls"));
}

#[test]
fn test_later_registration_wins() {
    let mut registry = ConverterRegistry::with_defaults();
    registry.register(Arc::new(MockConverter::new(vec!["docx"], "mock")));

    let result = registry
        .convert(Path::new("anything.docx"), &ConvertOptions::default())
        .unwrap();
    assert_eq!(result.content, "Converted by mock");
}

#[test]
fn test_supported_extensions() {
    let registry = ConverterRegistry::with_defaults();
    let mut extensions = registry.supported_extensions();
    extensions.sort();

    assert_eq!(extensions, vec!["docx", "json"]);
}

#[test]
fn test_converter_extensions() {
    assert_eq!(DocxConverter::new().supported_extensions(), &["docx"]);
    assert_eq!(TranscriptConverter::new().supported_extensions(), &["json"]);
}

#[test]
fn test_convert_result_with_stats() {
    use docmd::render::ExtractionStats;

    let stats = ExtractionStats {
        heading_count: 2,
        paragraph_count: 20,
        ..Default::default()
    };

    let result = ConvertResult::new("content".to_string(), Default::default()).with_stats(stats);

    let stats = result.stats.unwrap();
    assert_eq!(stats.heading_count, 2);
    assert_eq!(stats.paragraph_count, 20);
}

#[test]
fn test_convert_result_methods() {
    let result = ConvertResult::new("# Hello".to_string(), Default::default());

    assert_eq!(result.content, "# Hello");
    assert_eq!(result.content_len(), 7);
    assert!(result.stats.is_none());
    assert_eq!(result.mime_type, "text/markdown");
}

#[test]
fn test_output_format_default() {
    assert_eq!(OutputFormat::default(), OutputFormat::Markdown);
    assert_eq!(OutputFormat::Markdown.extension(), "md");
    assert_eq!(OutputFormat::Json.mime_type(), "application/json");
}

#[test]
fn test_registry_convert_no_extension_error() {
    let registry = ConverterRegistry::with_defaults();

    let result = registry.convert(Path::new("noextension"), &ConvertOptions::default());
    assert!(matches!(result, Err(Error::UnsupportedFormat(_))));
}

#[test]
fn test_registry_convert_bytes_unsupported() {
    let registry = ConverterRegistry::with_defaults();

    let result = registry.convert_bytes(b"test", "xyz", &ConvertOptions::default());
    assert!(matches!(result, Err(Error::UnsupportedFormat(_))));
}

#[test]
fn test_registry_convert_docx_bytes() {
    let registry = ConverterRegistry::with_defaults();
    let bytes = common::docx_bytes(&common::p("Hello", None), None);

    let result = registry
        .convert_bytes(&bytes, "docx", &ConvertOptions::new().with_stats(true))
        .unwrap();
    assert_eq!(result.content, "Hello\n");
    assert_eq!(result.stats.unwrap().paragraph_count, 1);
}

#[test]
fn test_docx_stats_follow_convert_options_flag() {
    let registry = ConverterRegistry::with_defaults();
    let bytes = common::docx_bytes(&common::p("Hello", Some("Heading1")), None);

    let without = registry
        .convert_bytes(&bytes, "docx", &ConvertOptions::default())
        .unwrap();
    assert!(without.stats.is_none());

    let with = registry
        .convert_bytes(&bytes, "docx", &ConvertOptions::new().with_stats(true))
        .unwrap();
    assert_eq!(with.content, without.content);
    let stats = with.stats.unwrap();
    assert_eq!(stats.heading_count, 1);
    assert_eq!(stats.paragraph_count, 0);
}

#[test]
fn test_registry_convert_docx_to_json() {
    let dir = tempfile::tempdir().unwrap();
    let input = common::write_docx(dir.path(), "doc.docx", &common::p("Hello", None), None);

    let options = ConvertOptions::new().with_format(OutputFormat::Json);
    let outcome = ConverterRegistry::with_defaults()
        .convert_file(&input, None, &options)
        .unwrap();

    assert_eq!(outcome.output, dir.path().join("doc.json"));
    let json = fs::read_to_string(&outcome.output).unwrap();
    let doc: docmd::Document = serde_json::from_str(&json).unwrap();
    assert_eq!(doc.blocks.len(), 1);
}
