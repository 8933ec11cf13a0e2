//! Renderers that turn a block tree's token stream into text.
//!
//! - **Plain text**: words, spaces and line breaks only
//! - **HTML**: one element per block, escaped words, `<br/>` line breaks
//!
//! # Examples
//!
//! ```
//! use alto_text::converters::{HtmlConverter, PlainTextConverter, TokenConverter};
//! use alto_text::text::{Block, Line, Word};
//!
//! let block = Block::new(0, 4).with_line(Line::new(
//!     0,
//!     vec![Word::new("Fish", "fish", 0), Word::new("&chips", "chips", 5)],
//! ));
//!
//! let text = PlainTextConverter.convert(&block);
//! assert!(text.starts_with("Fish &chips"));
//!
//! let html = HtmlConverter::new().convert(&block);
//! assert!(html.contains("Fish &amp;chips<br/>"));
//! ```

pub mod html;
pub mod plain_text;

pub use html::{HtmlConverter, escape_html};
pub use plain_text::PlainTextConverter;

use crate::text::Block;

/// Renders a block tree to a string.
pub trait TokenConverter {
    /// Render `block` and everything under it.
    fn convert(&self, block: &Block) -> String;
}

/// Options for the HTML renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Element used for each block (default: `div`).
    pub block_element: String,

    /// Prefix for every CSS class written (default: empty).
    pub class_prefix: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            block_element: "div".to_string(),
            class_prefix: String::new(),
        }
    }
}

impl RenderOptions {
    /// Set the block element name.
    pub fn with_block_element(mut self, element: impl Into<String>) -> Self {
        self.block_element = element.into();
        self
    }

    /// Set the CSS class prefix.
    pub fn with_class_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.class_prefix = prefix.into();
        self
    }
}
