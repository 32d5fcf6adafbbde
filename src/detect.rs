//! Input format detection and validation.

use crate::error::{Error, Result};
use std::path::Path;

/// Input formats understood by docmd.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// Word document (`.docx`)
    Docx,
    /// Spreadsheet workbook (`.xlsx`, `.xlsm`, `.xlsb`, `.xls`, `.ods`)
    Workbook,
    /// Saved chat transcript (`.json`)
    Transcript,
}

impl InputFormat {
    /// Guess the format from a file extension (case-insensitive, no dot).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "docx" => Some(InputFormat::Docx),
            "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => Some(InputFormat::Workbook),
            "json" => Some(InputFormat::Transcript),
            _ => None,
        }
    }
}

impl std::fmt::Display for InputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputFormat::Docx => write!(f, "Word document"),
            InputFormat::Workbook => write!(f, "Workbook"),
            InputFormat::Transcript => write!(f, "Chat transcript"),
        }
    }
}

/// Local file header signature.
const ZIP_MAGIC: &[u8] = b"PK\x03\x04";
/// End-of-central-directory signature (empty archive).
const ZIP_EMPTY_MAGIC: &[u8] = b"PK\x05\x06";

/// Detect the input format of a path from its extension.
///
/// # Example
/// ```no_run
/// use docmd::detect::{detect_format_from_path, InputFormat};
///
/// let format = detect_format_from_path("report.docx").unwrap();
/// assert_eq!(format, InputFormat::Docx);
/// ```
pub fn detect_format_from_path<P: AsRef<Path>>(path: P) -> Result<InputFormat> {
    let path = path.as_ref();
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .ok_or_else(|| Error::UnsupportedFormat(format!("{} has no extension", path.display())))?;

    InputFormat::from_extension(ext)
        .ok_or_else(|| Error::UnsupportedFormat(format!("unknown extension: {}", ext)))
}

/// Check that bytes start with a ZIP signature.
pub fn is_zip_bytes(data: &[u8]) -> bool {
    data.starts_with(ZIP_MAGIC) || data.starts_with(ZIP_EMPTY_MAGIC)
}
