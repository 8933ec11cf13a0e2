//! Token stream generation for block trees.
//!
//! A [`Block`](crate::text::Block) tree is two things at once: a hierarchy
//! of regions and a linear sequence of word positions. Renderers want a
//! single flat sequence, so [`TokenStream`] walks the tree depth-first and
//! slots each child block into the word sequence at its start position:
//!
//! ```text
//! BlockStart(root) Word Space Word BlockStart(child) ... BlockEnd(child)
//!     Space Word NewLine BlockEnd(root)
//! ```
//!
//! ## Example
//!
//! ```
//! use alto_text::text::{Block, Line, Word};
//! use alto_text::tokens::TextToken;
//!
//! let block = Block::new(0, 4).with_line(Line::new(
//!     0,
//!     vec![Word::new("Hello", "hello", 0), Word::new("world.", "world", 6)],
//! ));
//!
//! let text: String = block
//!     .tokens()
//!     .filter(|t| !t.is_boundary())
//!     .map(|t| t.to_string())
//!     .collect();
//! assert_eq!(text.trim_end(), "Hello world.");
//! ```

mod stream;
mod token;

pub use stream::TokenStream;
pub use token::{BLOCK_END_MARKER, BLOCK_START_MARKER, LINE_TERMINATOR, TextToken};
