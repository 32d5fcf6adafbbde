//! Parsing options and configuration.

/// Options for parsing Word documents.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Error handling mode
    pub error_mode: ErrorMode,

    /// Resolve `w:pStyle` ids to display names through `word/styles.xml`
    pub resolve_style_names: bool,

    /// Read `docProps/core.xml` into the document metadata
    pub read_metadata: bool,
}

impl ParseOptions {
    /// Create new parse options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Enable lenient mode (keep what was parsed before a fault).
    pub fn lenient(mut self) -> Self {
        self.error_mode = ErrorMode::Lenient;
        self
    }

    /// Use raw style ids instead of display names.
    pub fn raw_style_ids(mut self) -> Self {
        self.resolve_style_names = false;
        self
    }

    /// Enable or disable metadata extraction.
    pub fn with_metadata(mut self, read: bool) -> Self {
        self.read_metadata = read;
        self
    }

    pub(crate) fn is_lenient(&self) -> bool {
        self.error_mode == ErrorMode::Lenient
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            error_mode: ErrorMode::Strict,
            resolve_style_names: true,
            read_metadata: true,
        }
    }
}

/// Error handling mode during parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Fail on any error
    #[default]
    Strict,
    /// Log the fault and keep the body elements read so far
    Lenient,
}
