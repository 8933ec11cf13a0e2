//! Lines of words.

use super::word::Word;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An ordered run of words sharing a line number.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Line {
    /// Line number (the document line number when assembled from a text)
    pub line_number: usize,

    /// Words in reading order
    #[serde(default)]
    pub words: Vec<Word>,
}

impl Line {
    /// Create a line from its words.
    pub fn new(line_number: usize, words: Vec<Word>) -> Self {
        Self { line_number, words }
    }

    /// Raw text of the line: the raw form of each word joined by single spaces.
    ///
    /// An empty line gives an empty string.
    pub fn raw_text(&self) -> String {
        self.words
            .iter()
            .map(Word::raw)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// True if the line holds no words.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.words.is_empty() {
            return write!(f, "[({}) <no words>]", self.line_number);
        }
        let words = self
            .words
            .iter()
            .map(|w| w.content_norm.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        write!(f, "[({}) {}]", self.line_number, words)
    }
}
