//! Token variants of the block token stream.

use crate::text::{Block, Word};
use std::fmt;

/// Line terminator emitted for [`TextToken::NewLine`].
#[cfg(windows)]
pub const LINE_TERMINATOR: &str = "\r\n";

/// Line terminator emitted for [`TextToken::NewLine`].
#[cfg(not(windows))]
pub const LINE_TERMINATOR: &str = "\n";

/// Debug marker written for a block start.
pub const BLOCK_START_MARKER: &str = "----------start block----------";

/// Debug marker written for a block end.
pub const BLOCK_END_MARKER: &str = "-----------end block-----------";

/// One element of a block token stream.
///
/// Tokens borrow the structure they mark; they never own it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TextToken<'a> {
    /// A block opens
    BlockStart(&'a Block),
    /// A block closes
    BlockEnd(&'a Block),
    /// A word, rendered as its raw text
    Word(&'a Word),
    /// Separator between two words of a line
    Space,
    /// End of a line
    NewLine,
}

impl<'a> TextToken<'a> {
    /// The block this token opens or closes, if any.
    pub fn block(&self) -> Option<&'a Block> {
        match self {
            TextToken::BlockStart(block) | TextToken::BlockEnd(block) => Some(block),
            _ => None,
        }
    }

    /// The word carried by this token, if any.
    pub fn word(&self) -> Option<&'a Word> {
        match self {
            TextToken::Word(word) => Some(word),
            _ => None,
        }
    }

    /// True for block start and end markers.
    pub fn is_boundary(&self) -> bool {
        matches!(self, TextToken::BlockStart(_) | TextToken::BlockEnd(_))
    }
}

impl fmt::Display for TextToken<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextToken::BlockStart(_) => write!(f, "{}{}", BLOCK_START_MARKER, LINE_TERMINATOR),
            TextToken::BlockEnd(_) => write!(f, "{}{}", BLOCK_END_MARKER, LINE_TERMINATOR),
            TextToken::Word(word) => f.write_str(word.raw()),
            TextToken::Space => f.write_str(" "),
            TextToken::NewLine => f.write_str(LINE_TERMINATOR),
        }
    }
}
