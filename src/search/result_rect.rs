//! Raw search hit rectangles.

use crate::text::Word;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A page-indexed rectangle covering one or more matched words.
///
/// One hit can produce several rectangles, e.g. when a phrase starts on one
/// line and finishes on the next; they share the same `hit` number.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRect {
    /// Normalised text of the matched words
    #[serde(default)]
    pub content_norm: String,

    /// Raw text of the matched words
    pub content_raw: String,

    /// Left edge
    pub x: i32,
    /// Top edge
    pub y: i32,
    /// Width
    pub w: i32,
    /// Height
    pub h: i32,

    /// Document word numbers covered by this rectangle
    #[serde(default)]
    pub wds: Vec<usize>,

    /// Normalised text positions of the covered words
    #[serde(default)]
    pub pos_norms: Vec<usize>,

    /// Document line number the rectangle is on
    #[serde(default)]
    pub li: usize,

    /// Width of the space after the last covered word
    #[serde(default)]
    pub sp: i32,

    /// Image (page) index the rectangle is on
    pub idx: usize,

    /// Hit number; rectangles of the same match share it
    pub hit: usize,

    /// Raw text position of the first covered word
    #[serde(default)]
    pub pos_raw: usize,

    /// Raw text preceding the hit
    #[serde(default)]
    pub before: Option<String>,

    /// Raw text following the hit
    #[serde(default)]
    pub after: Option<String>,
}

impl ResultRect {
    /// Rectangle covering exactly one word.
    pub fn from_word(word: &Word, hit: usize) -> Self {
        Self {
            content_norm: word.content_norm.clone(),
            content_raw: word.content_raw.clone(),
            x: word.x,
            y: word.y,
            w: word.w,
            h: word.h,
            wds: vec![word.wd],
            pos_norms: vec![word.pos_norm],
            li: word.li,
            sp: word.sp,
            idx: word.idx,
            hit,
            pos_raw: word.pos_raw,
            before: None,
            after: None,
        }
    }

    /// Position of the first covered word in the normalised text, 0 if none.
    pub fn pos_norm(&self) -> usize {
        self.pos_norms.first().copied().unwrap_or(0)
    }

    /// Length of the normalised content in bytes.
    pub fn len_norm(&self) -> usize {
        self.content_norm.len()
    }

    /// Length of the raw content in bytes.
    pub fn len_raw(&self) -> usize {
        self.content_raw.len()
    }

    /// Whether `word` directly follows this rectangle on the same line.
    pub fn is_adjacent_to(&self, word: &Word) -> bool {
        self.li == word.li && self.wds.last().is_some_and(|&last| last + 1 == word.wd)
    }

    /// Grow the rectangle to take in the next word on the same line.
    pub fn extend_with(&mut self, word: &Word) {
        self.y = self.y.min(word.y);
        self.h = self.h.max(word.h);
        self.w = (word.x + word.w) - self.x;
        self.wds.push(word.wd);
        self.pos_norms.push(word.pos_norm);
        self.sp = word.sp;
        self.content_norm.push(' ');
        self.content_norm.push_str(&word.content_norm);
        self.content_raw.push(' ');
        self.content_raw.push_str(&word.content_raw);
    }
}

impl fmt::Display for ResultRect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.content_norm)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::Geometry;

    fn word(raw: &str, wd: usize, li: usize, geometry: Geometry) -> Word {
        Word::new(raw, raw.to_lowercase(), wd * 10)
            .with_numbering(wd, li)
            .with_geometry(geometry)
            .with_image(4)
            .with_pos_raw(wd * 12)
            .with_space(6)
    }

    #[test]
    fn test_from_word() {
        let w = word("Cat", 7, 2, Geometry::new(100, 50, 40, 20));
        let rect = ResultRect::from_word(&w, 3);

        assert_eq!(rect.content_raw, "Cat");
        assert_eq!(rect.content_norm, "cat");
        assert_eq!((rect.x, rect.y, rect.w, rect.h), (100, 50, 40, 20));
        assert_eq!(rect.wds, vec![7]);
        assert_eq!(rect.pos_norm(), 70);
        assert_eq!(rect.idx, 4);
        assert_eq!(rect.hit, 3);
        assert_eq!(rect.pos_raw, 84);
        assert!(rect.before.is_none() && rect.after.is_none());
    }

    #[test]
    fn test_pos_norm_defaults_to_zero() {
        assert_eq!(ResultRect::default().pos_norm(), 0);
    }

    #[test]
    fn test_extend_with_adjacent_word() {
        let my = word("My", 1, 0, Geometry::new(10, 12, 20, 10));
        let cat = word("Cat", 2, 0, Geometry::new(36, 10, 30, 14));
        let mut rect = ResultRect::from_word(&my, 0);

        assert!(rect.is_adjacent_to(&cat));
        rect.extend_with(&cat);

        assert_eq!((rect.x, rect.y, rect.w, rect.h), (10, 10, 56, 14));
        assert_eq!(rect.wds, vec![1, 2]);
        assert_eq!(rect.pos_norms, vec![10, 20]);
        assert_eq!(rect.content_raw, "My Cat");
        assert_eq!(rect.content_norm, "my cat");
        assert_eq!(rect.len_raw(), 6);
        assert_eq!(rect.to_string(), "my cat");
    }

    #[test]
    fn test_not_adjacent_across_lines_or_gaps() {
        let rect = ResultRect::from_word(&word("My", 1, 0, Geometry::default()), 0);
        assert!(!rect.is_adjacent_to(&word("Cat", 2, 1, Geometry::default())));
        assert!(!rect.is_adjacent_to(&word("Cat", 3, 0, Geometry::default())));
    }
}
