//! Error types for the text library.
//!
//! The token generator and the search converter never fail. These errors come
//! from the supplementary operations: page assembly, structure validation and
//! loading trees or hit lists from JSON.

/// Result type alias for library operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while assembling, validating or loading text.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Requested image does not exist in the text
    #[error("Image index {index} out of range (text has {count} images)")]
    ImageIndexOutOfRange {
        /// Requested image index
        index: usize,
        /// Number of images in the text
        count: usize,
    },

    /// Block tree violates an ordering or nesting invariant
    #[error("Invalid block structure: {0}")]
    InvalidStructure(String),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
