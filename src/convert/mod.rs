//! Document converter module providing a plugin architecture for input formats.
//!
//! Converters are registered per file extension; [`ConverterRegistry`]
//! dispatches a path to the right one and [`ConverterRegistry::convert_file`]
//! writes the result next to the input (or to an explicit output path).
//!
//! # Example
//!
//! ```no_run
//! use docmd::convert::{ConverterRegistry, ConvertOptions};
//! use std::path::Path;
//!
//! fn main() -> docmd::Result<()> {
//!     let registry = ConverterRegistry::with_defaults();
//!     let outcome = registry.convert_file(Path::new("rules.docx"), None, &ConvertOptions::default())?;
//!     println!("wrote {}", outcome.output.display());
//!     Ok(())
//! }
//! ```

mod docx;
mod transcript;

pub use docx::DocxConverter;
pub use transcript::TranscriptConverter;

use crate::error::{Error, Result};
use crate::model::Metadata;
use crate::parser::ParseOptions;
use crate::render::{ExtractionStats, RenderOptions};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Options for document conversion.
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    /// Parsing options
    pub parse: ParseOptions,

    /// Rendering options
    pub render: RenderOptions,

    /// Whether to collect statistics during conversion
    pub collect_stats: bool,

    /// Output format
    pub output_format: OutputFormat,
}

impl ConvertOptions {
    /// Create new conversion options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set parsing options.
    pub fn with_parse_options(mut self, options: ParseOptions) -> Self {
        self.parse = options;
        self
    }

    /// Set rendering options.
    pub fn with_render_options(mut self, options: RenderOptions) -> Self {
        self.render = options;
        self
    }

    /// Enable statistics collection.
    pub fn with_stats(mut self, collect: bool) -> Self {
        self.collect_stats = collect;
        self
    }

    /// Set output format.
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }
}

/// Output format for conversion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Markdown format
    #[default]
    Markdown,

    /// JSON structure
    Json,
}

impl OutputFormat {
    /// File extension used for derived output paths.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Markdown => "md",
            OutputFormat::Json => "json",
        }
    }

    /// MIME type of the output.
    pub fn mime_type(&self) -> &'static str {
        match self {
            OutputFormat::Markdown => "text/markdown",
            OutputFormat::Json => "application/json",
        }
    }
}

/// Result of document conversion.
#[derive(Debug, Clone)]
pub struct ConvertResult {
    /// Converted content
    pub content: String,

    /// Source document metadata
    pub metadata: Metadata,

    /// Extraction statistics (if collected)
    pub stats: Option<ExtractionStats>,

    /// MIME type of the output
    pub mime_type: &'static str,
}

impl ConvertResult {
    /// Create a new conversion result.
    pub fn new(content: String, metadata: Metadata) -> Self {
        Self {
            content,
            metadata,
            stats: None,
            mime_type: "text/markdown",
        }
    }

    /// Set extraction statistics.
    pub fn with_stats(mut self, stats: ExtractionStats) -> Self {
        self.stats = Some(stats);
        self
    }

    /// Set MIME type.
    pub fn with_mime_type(mut self, mime_type: &'static str) -> Self {
        self.mime_type = mime_type;
        self
    }

    /// Get content length in bytes.
    pub fn content_len(&self) -> usize {
        self.content.len()
    }
}

/// A completed file conversion.
#[derive(Debug, Clone)]
pub struct ConvertOutcome {
    /// Input path as given
    pub input: PathBuf,

    /// Path the output was written to
    pub output: PathBuf,

    /// Number of bytes written
    pub bytes_written: usize,

    /// Extraction statistics (if collected)
    pub stats: Option<ExtractionStats>,
}

/// Trait for document converters.
///
/// Implement this trait to add support for a new input format.
pub trait DocumentConverter: Send + Sync {
    /// Get the supported file extensions for this converter.
    ///
    /// Extensions should be lowercase without the leading dot (e.g., `["docx"]`).
    fn supported_extensions(&self) -> &[&str];

    /// Get the name of this converter.
    fn name(&self) -> &str;

    /// Convert a file at the given path.
    fn convert(&self, path: &Path, options: &ConvertOptions) -> Result<ConvertResult>;

    /// Convert from bytes.
    fn convert_bytes(&self, bytes: &[u8], options: &ConvertOptions) -> Result<ConvertResult>;

    /// Check if this converter supports the given extension.
    fn supports_extension(&self, ext: &str) -> bool {
        let ext_lower = ext.to_lowercase();
        self.supported_extensions().iter().any(|e| *e == ext_lower)
    }
}

/// Registry for document converters.
///
/// The registry maps file extensions to converters and provides
/// convenient methods for converting documents.
pub struct ConverterRegistry {
    converters: HashMap<String, Arc<dyn DocumentConverter>>,
    by_name: HashMap<String, Arc<dyn DocumentConverter>>,
}

impl ConverterRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            converters: HashMap::new(),
            by_name: HashMap::new(),
        }
    }

    /// Create a registry with the default converters (Word, transcript).
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(DocxConverter::new()));
        registry.register(Arc::new(TranscriptConverter::new()));
        registry
    }

    /// Register a converter.
    ///
    /// The converter will be registered for all its supported extensions.
    pub fn register(&mut self, converter: Arc<dyn DocumentConverter>) {
        for ext in converter.supported_extensions() {
            self.converters
                .insert(ext.to_lowercase(), converter.clone());
        }
        self.by_name
            .insert(converter.name().to_lowercase(), converter);
    }

    /// Get a converter by file extension.
    pub fn get_by_extension(&self, ext: &str) -> Option<Arc<dyn DocumentConverter>> {
        self.converters.get(&ext.to_lowercase()).cloned()
    }

    /// Get a converter by name.
    pub fn get_by_name(&self, name: &str) -> Option<Arc<dyn DocumentConverter>> {
        self.by_name.get(&name.to_lowercase()).cloned()
    }

    /// Check if an extension is supported.
    pub fn supports(&self, ext: &str) -> bool {
        self.converters.contains_key(&ext.to_lowercase())
    }

    /// Get all supported extensions.
    pub fn supported_extensions(&self) -> Vec<&str> {
        self.converters.keys().map(|s| s.as_str()).collect()
    }

    /// Find the converter responsible for a path.
    pub fn converter_for(&self, path: &Path) -> Result<Arc<dyn DocumentConverter>> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| {
                Error::UnsupportedFormat(format!("{} has no extension", path.display()))
            })?;

        self.get_by_extension(ext)
            .ok_or_else(|| Error::UnsupportedFormat(format!("no converter for extension: {}", ext)))
    }

    /// Convert a file using the appropriate converter.
    pub fn convert(&self, path: &Path, options: &ConvertOptions) -> Result<ConvertResult> {
        self.converter_for(path)?.convert(path, options)
    }

    /// Convert bytes using the specified extension to determine the converter.
    pub fn convert_bytes(
        &self,
        bytes: &[u8],
        ext: &str,
        options: &ConvertOptions,
    ) -> Result<ConvertResult> {
        let converter = self
            .get_by_extension(ext)
            .ok_or_else(|| Error::UnsupportedFormat(format!("no converter for extension: {}", ext)))?;

        converter.convert_bytes(bytes, options)
    }

    /// Convert `input` and write the result to `output`.
    ///
    /// Without an explicit output path the input's extension is replaced
    /// by the output format's (`.md` for Markdown). An existing file at the
    /// output path is overwritten. Nothing is written if conversion fails.
    pub fn convert_file(
        &self,
        input: &Path,
        output: Option<&Path>,
        options: &ConvertOptions,
    ) -> Result<ConvertOutcome> {
        let output = resolve_output_path(input, output, options.output_format);
        if output == input {
            return Err(Error::Other(format!(
                "output path {} would overwrite the input",
                output.display()
            )));
        }

        let result = self.convert(input, options)?;
        write_output(&output, &result.content)?;

        log::info!("Converted {} -> {}", input.display(), output.display());
        Ok(ConvertOutcome {
            input: input.to_path_buf(),
            output,
            bytes_written: result.content_len(),
            stats: result.stats,
        })
    }
}

impl Default for ConverterRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Derive the output path for a conversion.
///
/// An explicit `output` wins; otherwise the input path with its extension
/// replaced by the format's extension, in the same directory.
pub fn resolve_output_path(input: &Path, output: Option<&Path>, format: OutputFormat) -> PathBuf {
    match output {
        Some(path) => path.to_path_buf(),
        None => input.with_extension(format.extension()),
    }
}

/// Write `content` as the full content of `path`, replacing any existing file.
pub fn write_output(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).map_err(|e| Error::write(path, e))
}
