// Allow some clippy lints that are too pedantic for this project
#![allow(clippy::new_without_default)]
#![allow(clippy::should_implement_trait)]
#![allow(clippy::match_like_matches_macro)]
// Allow unused for tests
#![cfg_attr(test, allow(dead_code))]
#![cfg_attr(test, allow(unused_variables))]

//! # ALTO Text
//!
//! Full text model for OCR'd page images: a flat, searchable text for a whole
//! work, plus per-page block trees that can be walked as a single ordered
//! stream of tokens.
//!
//! ## Core Features
//!
//! - **Token Stream**: Lazy, nesting-aware walk of a block tree, merging each
//!   block's own lines with its child blocks by word position
//! - **Search**: Substring search over the normalised text, resolved to word
//!   rectangles with hit numbers and raw-text context
//! - **Player Results**: Grouping of hit rectangles by page
//! - **Page Assembly**: Rebuilding a page's block tree from the full text and
//!   its composed regions
//! - **Validation**: Checks for the ordering invariants the stream relies on
//! - **Rendering**: Plain text and HTML renderers over the token stream
//!
//! ## Quick Start
//!
//! ```
//! use alto_text::{SearchText, TokenConverter, PlainTextConverter};
//! use alto_text::text::Geometry;
//!
//! let mut builder = SearchText::builder();
//! builder.begin_image(None);
//! builder.begin_line();
//! builder.push_word("The", Geometry::new(10, 10, 30, 12), 4);
//! builder.push_word("cat", Geometry::new(44, 10, 30, 12), 4);
//! builder.push_word("sat.", Geometry::new(78, 10, 40, 12), 0);
//! let text = builder.build();
//!
//! // Search and group by page
//! let pages = text.search_for_player("CAT");
//! assert_eq!(pages.len(), 1);
//! assert_eq!(pages[0].rects[0].word, "cat");
//!
//! // Rebuild the page and render it
//! let page = text.page(0)?;
//! assert!(PlainTextConverter.convert(&page).starts_with("The cat sat."));
//! # Ok::<(), alto_text::Error>(())
//! ```

#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

// Error handling
pub mod error;

// Configuration
pub mod config;

// Page content model
pub mod text;

// Token stream over block trees
pub mod tokens;

// Search results and page grouping
pub mod search;

// Block tree invariants
pub mod structure;

// Full text of a work
pub mod document;

// Renderers
pub mod converters;

// Re-exports
pub use config::TextConfig;
pub use converters::{HtmlConverter, PlainTextConverter, RenderOptions, TokenConverter};
pub use document::{SearchText, SearchTextBuilder};
pub use error::{Error, Result};
pub use search::{Rect, ResultRect, SearchConverter, SearchResult};
pub use text::{Block, ComposedBlock, Line, Word};
pub use tokens::{TextToken, TokenStream};

// Internal utilities
pub(crate) mod utils {
    //! Internal utility functions for the library.

    /// Largest char boundary of `s` at or below `index`, clamped to `s.len()`.
    ///
    /// Used to cut byte-sized context windows out of text without splitting
    /// a multi-byte character.
    #[inline]
    pub fn floor_char_boundary(s: &str, index: usize) -> usize {
        if index >= s.len() {
            return s.len();
        }
        let mut i = index;
        while !s.is_char_boundary(i) {
            i -= 1;
        }
        i
    }

}

// Version info
/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
