//! Plain text rendering.

use super::TokenConverter;
use crate::text::Block;
use std::fmt::Write;

/// Renders words, spaces and line breaks, dropping block boundaries.
///
/// Line breaks use the platform line terminator.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextConverter;

impl TokenConverter for PlainTextConverter {
    fn convert(&self, block: &Block) -> String {
        let mut out = String::new();
        for token in block.tokens() {
            if token.is_boundary() {
                continue;
            }
            // Writing to a String cannot fail.
            let _ = write!(out, "{}", token);
        }
        out
    }
}
