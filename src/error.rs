//! Error types for docmd library.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for docmd operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while extracting or converting documents.
#[derive(Error, Debug)]
pub enum Error {
    /// The input document could not be opened or parsed.
    ///
    /// Covers missing files, corrupt archives and workbooks, malformed body
    /// XML in strict mode and missing document parts.
    #[error("Failed to open document: {0}")]
    DocumentOpen(String),

    /// The output destination could not be created or written.
    #[error("Failed to write {}: {source}", path.display())]
    OutputWrite {
        /// Destination that failed
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: io::Error,
    },

    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Malformed XML inside a document part.
    #[error("XML error: {0}")]
    Xml(String),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV writing error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// No converter handles the given input.
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Build a [`Error::DocumentOpen`] naming the offending path.
    pub fn open(path: impl AsRef<std::path::Path>, reason: impl std::fmt::Display) -> Self {
        Error::DocumentOpen(format!("{}: {}", path.as_ref().display(), reason))
    }

    /// Build an [`Error::OutputWrite`] for the given destination.
    pub fn write(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::OutputWrite {
            path: path.into(),
            source,
        }
    }

    /// Whether this error happened while opening or parsing the input.
    pub fn is_open_error(&self) -> bool {
        matches!(self, Error::DocumentOpen(_) | Error::UnsupportedFormat(_))
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::Xml(err.to_string())
    }
}
