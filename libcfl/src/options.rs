//! Parser configuration.

/// Default limit on block nesting.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Options for a single parse.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Filename used in diagnostics.
    pub filename: Option<String>,
    /// Treat an identifier-shaped value that names no known constant as an
    /// error. When off, such a value is kept as a string.
    pub strict_references: bool,
    /// Maximum block nesting depth.
    pub max_depth: usize,
}

impl ParseOptions {
    /// Creates options with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the filename reported in diagnostics.
    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    /// Sets whether unknown identifier values are errors.
    pub fn with_strict_references(mut self, strict: bool) -> Self {
        self.strict_references = strict;
        self
    }

    /// Sets the maximum nesting depth.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            filename: None,
            strict_references: false,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}
