//! Parsing options and configuration.

/// Options for building a document layout.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Error handling mode
    pub error_mode: ErrorMode,

    /// Apply NFKC normalization to decoded text (folds ligatures such as "ﬁ")
    pub normalize_unicode: bool,

    /// Vertical tolerance for joining spans into a line, as a fraction of font size
    pub line_tolerance: f32,

    /// Line gap, relative to the page's average line spacing, that starts a new block
    pub block_gap_ratio: f32,
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

    /// Enable lenient mode (skip pages whose content cannot be decoded).
    pub fn lenient(mut self) -> Self {
        self.error_mode = ErrorMode::Lenient;
        self
    }

    /// Enable or disable Unicode normalization.
    pub fn with_unicode_normalization(mut self, normalize: bool) -> Self {
        self.normalize_unicode = normalize;
        self
    }

    /// Set line grouping tolerance.
    pub fn with_line_tolerance(mut self, tolerance: f32) -> Self {
        self.line_tolerance = tolerance;
        self
    }

    /// Set block gap ratio.
    pub fn with_block_gap_ratio(mut self, ratio: f32) -> Self {
        self.block_gap_ratio = ratio;
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            error_mode: ErrorMode::Strict,
            normalize_unicode: true,
            line_tolerance: 0.3,
            block_gap_ratio: 1.5,
        }
    }
}

/// Error handling mode during parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Fail on any error
    #[default]
    Strict,
    /// Skip invalid content and continue
    Lenient,
}
