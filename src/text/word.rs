//! Recognized words and their page geometry.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Bounding box of a word on its page image, in the source coordinate system.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Geometry {
    /// Left edge
    pub x: i32,
    /// Top edge
    pub y: i32,
    /// Width
    pub w: i32,
    /// Height
    pub h: i32,
}

impl Geometry {
    /// Create a new bounding box.
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Smallest box containing both `self` and `other`.
    pub fn union(self, other: Geometry) -> Geometry {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = (self.x + self.w).max(other.x + other.w);
        let bottom = (self.y + self.h).max(other.y + other.h);
        Geometry::new(x, y, right - x, bottom - y)
    }
}

/// A single recognized word.
///
/// `pos_norm` is the word's offset in the normalised full text of the work. It
/// is unique and strictly increasing in reading order, and it is the key every
/// merge in this crate orders by.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Word {
    /// Literal OCR text, original casing and punctuation
    pub content_raw: String,

    /// Normalised form used for indexing and search
    pub content_norm: String,

    /// Left edge on the page image
    #[serde(default)]
    pub x: i32,
    /// Top edge on the page image
    #[serde(default)]
    pub y: i32,
    /// Width on the page image
    #[serde(default)]
    pub w: i32,
    /// Height on the page image
    #[serde(default)]
    pub h: i32,

    /// Word number within the document; consecutive numbers are adjacent words
    #[serde(default)]
    pub wd: usize,

    /// Line number within the document; equal numbers share a line
    #[serde(default)]
    pub li: usize,

    /// Width of the space following this word
    #[serde(default)]
    pub sp: i32,

    /// Image (page) index this word is on
    #[serde(default)]
    pub idx: usize,

    /// Offset of this word within the normalised full text
    pub pos_norm: usize,

    /// Offset of this word within the raw full text
    #[serde(default)]
    pub pos_raw: usize,
}

impl Word {
    /// Create a word at a normalised position with no geometry.
    pub fn new(
        content_raw: impl Into<String>,
        content_norm: impl Into<String>,
        pos_norm: usize,
    ) -> Self {
        Self {
            content_raw: content_raw.into(),
            content_norm: content_norm.into(),
            pos_norm,
            ..Default::default()
        }
    }

    /// Set the bounding box.
    pub fn with_geometry(mut self, geometry: Geometry) -> Self {
        self.x = geometry.x;
        self.y = geometry.y;
        self.w = geometry.w;
        self.h = geometry.h;
        self
    }

    /// Set the document word and line numbers.
    pub fn with_numbering(mut self, wd: usize, li: usize) -> Self {
        self.wd = wd;
        self.li = li;
        self
    }

    /// Set the image index.
    pub fn with_image(mut self, idx: usize) -> Self {
        self.idx = idx;
        self
    }

    /// Set the raw text offset.
    pub fn with_pos_raw(mut self, pos_raw: usize) -> Self {
        self.pos_raw = pos_raw;
        self
    }

    /// Set the trailing space width.
    pub fn with_space(mut self, sp: i32) -> Self {
        self.sp = sp;
        self
    }

    /// Bounding box of the word.
    pub fn geometry(&self) -> Geometry {
        Geometry::new(self.x, self.y, self.w, self.h)
    }

    /// Length of the normalised form in bytes.
    pub fn len_norm(&self) -> usize {
        self.content_norm.len()
    }

    /// Length of the raw form in bytes.
    pub fn len_raw(&self) -> usize {
        self.content_raw.len()
    }

    /// The raw OCR text.
    pub fn raw(&self) -> &str {
        &self.content_raw
    }
}

impl fmt::Display for Word {
    /// Words display as their normalised form.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.content_norm)
    }
}
