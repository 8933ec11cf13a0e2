//! Configuration for search text processing.

/// Default number of raw-text bytes of context captured on each side of a hit.
pub const DEFAULT_SNIPPET_SIZE: usize = 150;

/// Default result count at or above which context snippets are skipped.
pub const DEFAULT_MAX_RESULTS_WITH_CONTEXT: usize = 200;

/// Default autocomplete bucket key length.
pub const DEFAULT_MIN_SUGGESTION_LENGTH: usize = 3;

/// Search text configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextConfig {
    /// Bytes of raw text captured before and after each hit.
    pub snippet_size: usize,

    /// Context is only attached when fewer results than this are returned.
    pub max_results_with_context: usize,

    /// Minimum normalised query length for autocomplete, also the bucket key length.
    pub min_suggestion_length: usize,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl TextConfig {
    /// Create new configuration with defaults.
    pub fn new() -> Self {
        Self {
            snippet_size: DEFAULT_SNIPPET_SIZE,
            max_results_with_context: DEFAULT_MAX_RESULTS_WITH_CONTEXT,
            min_suggestion_length: DEFAULT_MIN_SUGGESTION_LENGTH,
        }
    }

    /// Set the context snippet size.
    pub fn with_snippet_size(mut self, size: usize) -> Self {
        self.snippet_size = size;
        self
    }

    /// Set the result count limit for attaching context.
    pub fn with_max_results_with_context(mut self, max: usize) -> Self {
        self.max_results_with_context = max;
        self
    }

    /// Set the autocomplete key length.
    pub fn with_min_suggestion_length(mut self, len: usize) -> Self {
        self.min_suggestion_length = len.max(1);
        self
    }
}
