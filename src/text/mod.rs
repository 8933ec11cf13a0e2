//! Structural model of recognized text.
//!
//! OCR output arrives as words, grouped into lines, grouped into a tree of
//! logical blocks (paragraphs, columns, composed regions such as tables):
//!
//! ```text
//! Block
//!   ├─ Line ─ Word Word Word
//!   ├─ Line ─ Word Word
//!   └─ Block (child, interleaved by word position)
//!        └─ Line ─ Word
//! ```
//!
//! The model is read-only for everything in this crate: blocks own their
//! lines and children exclusively and nothing mutates them after assembly.

mod block;
mod line;
mod word;

pub use block::{Block, BlockExtension, ComposedBlock};
pub use line::Line;
pub use word::{Geometry, Word};
