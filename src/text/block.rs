//! Logical blocks: the tree that sits over the linear word stream.

use super::line::Line;
use super::word::{Geometry, Word};
use crate::tokens::TokenStream;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A composed region of a page, such as a table or a multi-column layout.
///
/// Sibling blocks cut from the same composed region share this identity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComposedBlock {
    /// Image (page) the region is on
    pub image_index: usize,

    /// Position of the first word of the region, same coordinate as `Word::pos_norm`
    pub start_character: usize,

    /// Position of the last word of the region
    pub end_character: usize,

    /// Index of the region within the whole work
    pub composed_block_index: usize,

    /// Source identifier of the region, unique per page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alto_id: Option<String>,

    /// Source region type (e.g. "Table")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_type: Option<String>,

    /// Bounding box of the region on its image
    #[serde(default)]
    pub geometry: Geometry,
}

impl ComposedBlock {
    /// Create a region spanning `[start_character, end_character]` on an image.
    pub fn new(
        image_index: usize,
        start_character: usize,
        end_character: usize,
        composed_block_index: usize,
    ) -> Self {
        Self {
            image_index,
            start_character,
            end_character,
            composed_block_index,
            alto_id: None,
            block_type: None,
            geometry: Geometry::default(),
        }
    }

    /// Set the region's bounding box.
    pub fn with_geometry(mut self, geometry: Geometry) -> Self {
        self.geometry = geometry;
        self
    }
}

/// Project-specific data attached to a block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BlockExtension {
    /// The block is a table region
    Table {
        /// Table caption, if known
        #[serde(default)]
        title: Option<String>,
        /// Number of columns
        columns: usize,
    },

    /// Arbitrary annotation supplied by a consumer
    Custom {
        /// Annotation name
        name: String,
        /// Annotation payload
        #[serde(default)]
        data: serde_json::Value,
    },
}

/// A node in the logical structure tree of a page or work.
///
/// A block owns its lines (leaf content) and its child blocks (structural
/// content). `start_word_position` and `end_word_position` are the inclusive
/// range of word positions the block and its descendants cover. Children are
/// expected in ascending start order; nothing here checks it (see
/// [`crate::structure::validate_block_tree`]).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// Child blocks in position order
    #[serde(default)]
    pub blocks: Vec<Block>,

    /// Lines of this block in line order
    #[serde(default)]
    pub lines: Vec<Line>,

    /// Position of the word this block starts with
    pub start_word_position: usize,

    /// Position of the last word in this block
    pub end_word_position: usize,

    /// Composed region this block was cut from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub composed_block: Option<ComposedBlock>,

    /// Consumer-supplied annotation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extension: Option<BlockExtension>,
}

impl Block {
    /// Create an empty block covering `[start, end]`.
    pub fn new(start_word_position: usize, end_word_position: usize) -> Self {
        Self {
            start_word_position,
            end_word_position,
            ..Default::default()
        }
    }

    /// Append a line.
    pub fn with_line(mut self, line: Line) -> Self {
        self.lines.push(line);
        self
    }

    /// Append a child block.
    pub fn with_block(mut self, block: Block) -> Self {
        self.blocks.push(block);
        self
    }

    /// Set the composed region identity.
    pub fn with_composed_block(mut self, composed_block: ComposedBlock) -> Self {
        self.composed_block = Some(composed_block);
        self
    }

    /// Attach an extension.
    pub fn with_extension(mut self, extension: BlockExtension) -> Self {
        self.extension = Some(extension);
        self
    }

    /// Add a line in place.
    pub fn add_line(&mut self, line: Line) {
        self.lines.push(line);
    }

    /// Add a child block in place.
    pub fn add_block(&mut self, block: Block) {
        self.blocks.push(block);
    }

    /// Lazily walk the block as a single ordered token stream.
    ///
    /// Every call starts a fresh, independent traversal.
    pub fn tokens(&self) -> TokenStream<'_> {
        TokenStream::new(self)
    }

    /// This block's own words, in line order. Child blocks are not included.
    pub fn words(&self) -> impl Iterator<Item = &Word> {
        self.lines.iter().flat_map(|line| line.words.iter())
    }

    /// Number of words in this block and all its descendants.
    pub fn word_count(&self) -> usize {
        self.words().count() + self.blocks.iter().map(Block::word_count).sum::<usize>()
    }

    /// Number of blocks in the tree rooted here, including this one.
    pub fn block_count(&self) -> usize {
        1 + self.blocks.iter().map(Block::block_count).sum::<usize>()
    }

    /// True if the block has neither lines nor children.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty() && self.blocks.is_empty()
    }
}

impl fmt::Display for Block {
    /// Debug rendering of the whole token stream with block boundary markers.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for token in self.tokens() {
            write!(f, "{}", token)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::LINE_TERMINATOR;

    fn sample() -> Block {
        Block::new(0, 10)
            .with_line(Line::new(0, vec![Word::new("A", "a", 0), Word::new("b", "b", 2)]))
            .with_block(
                Block::new(4, 6)
                    .with_line(Line::new(1, vec![Word::new("c", "c", 4), Word::new("d", "d", 6)])),
            )
    }

    #[test]
    fn test_counts() {
        let block = sample();
        assert_eq!(block.word_count(), 4);
        assert_eq!(block.block_count(), 2);
        assert_eq!(block.words().count(), 2);
        assert!(!block.is_empty());
        assert!(Block::new(0, 0).is_empty());
    }

    #[test]
    fn test_display_uses_markers() {
        let block = sample();
        let nl = LINE_TERMINATOR;
        let expected = format!(
            "----------start block----------{nl}A b{nl}----------start block----------{nl}c d{nl}\
             -----------end block-----------{nl}-----------end block-----------{nl}"
        );
        assert_eq!(block.to_string(), expected);
    }

    #[test]
    fn test_extension_serde_tagged() {
        let block = Block::new(0, 3).with_extension(BlockExtension::Table {
            title: Some("Deaths by district".to_string()),
            columns: 4,
        });
        let json = serde_json::to_value(&block).unwrap();
        assert_eq!(json["extension"]["kind"], "table");
        assert_eq!(json["extension"]["columns"], 4);

        let back: Block = serde_json::from_value(json).unwrap();
        assert_eq!(back, block);
    }

    #[test]
    fn test_custom_extension_payload() {
        let json = r#"{
            "start_word_position": 0,
            "end_word_position": 9,
            "extension": {"kind": "custom", "name": "moh", "data": {"district": "Hackney"}}
        }"#;
        let block: Block = serde_json::from_str(json).unwrap();
        match block.extension {
            Some(BlockExtension::Custom { ref name, ref data }) => {
                assert_eq!(name, "moh");
                assert_eq!(data["district"], "Hackney");
            },
            other => panic!("unexpected extension: {:?}", other),
        }
        assert!(block.lines.is_empty());
        assert!(block.blocks.is_empty());
    }

    #[test]
    fn test_composed_block_geometry_serde() {
        let json = r#"{"image_index": 1, "start_character": 4, "end_character": 9, "composed_block_index": 0}"#;
        let cb: ComposedBlock = serde_json::from_str(json).unwrap();
        assert_eq!(cb.geometry, Geometry::default());

        let cb = cb.with_geometry(Geometry::new(5, 6, 70, 80));
        let value = serde_json::to_value(&cb).unwrap();
        assert_eq!(value["geometry"]["w"], 70);
        let back: ComposedBlock = serde_json::from_value(value).unwrap();
        assert_eq!(back, cb);
    }
}
