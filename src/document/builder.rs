//! Incremental construction of a [`SearchText`].

use super::normalise::normalise;
use super::search_text::{ImageRange, SearchText};
use crate::config::TextConfig;
use crate::text::{ComposedBlock, Geometry, Word};
use indexmap::IndexMap;
use std::collections::{BTreeMap, BTreeSet};

/// Builds the full text of a work one image, line and word at a time.
///
/// Each word is appended to the normalised and raw full texts followed by a
/// single space; its offsets there become `pos_norm` and `pos_raw`. Word and
/// line numbers run across the whole work.
///
/// # Examples
///
/// ```
/// use alto_text::document::SearchTextBuilder;
/// use alto_text::text::Geometry;
///
/// let mut builder = SearchTextBuilder::new();
/// builder.begin_image(Some("1".to_string()));
/// builder.begin_line();
/// builder.push_word("The", Geometry::new(0, 0, 30, 10), 5);
/// builder.push_word("Cat.", Geometry::new(35, 0, 40, 10), 0);
///
/// let text = builder.build();
/// assert_eq!(text.normalised_full_text, "the cat");
/// assert_eq!(text.raw_full_text, "The Cat.");
/// ```
#[derive(Debug, Default)]
pub struct SearchTextBuilder {
    config: TextConfig,
    norm: String,
    raw: String,
    words: BTreeMap<usize, Word>,
    images: Vec<ImageRange>,
    composed_blocks: IndexMap<(usize, String), ComposedBlock>,
    buckets: BTreeMap<String, BTreeSet<String>>,
    line_counter: usize,
    word_counter: usize,
    current_line: Option<usize>,
}

impl SearchTextBuilder {
    /// Create a builder with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder with a custom configuration.
    pub fn with_config(config: TextConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    /// Start a new image (page). Returns its index.
    pub fn begin_image(&mut self, order_label: Option<String>) -> usize {
        let index = self.images.len();
        self.images.push(ImageRange {
            index,
            start_character: self.norm.len(),
            order_label,
        });
        self.current_line = None;
        index
    }

    /// Start a new line. Returns its document line number.
    pub fn begin_line(&mut self) -> usize {
        let line = self.line_counter;
        self.line_counter += 1;
        self.current_line = Some(line);
        line
    }

    /// Append a word to the current line. Returns its `pos_norm`.
    ///
    /// An image and a line are started implicitly if none is open.
    pub fn push_word(&mut self, raw: &str, geometry: Geometry, space: i32) -> usize {
        self.append(raw, geometry, space).pos_norm
    }

    /// Append a word that belongs to a composed region of the current image.
    ///
    /// `region_id` identifies the region within the image. The region's end
    /// position follows the last word added to it, and its bounding box grows
    /// to cover every word added to it.
    pub fn push_word_in_composed_block(
        &mut self,
        raw: &str,
        geometry: Geometry,
        space: i32,
        region_id: &str,
        block_type: Option<&str>,
    ) -> usize {
        let word = self.append(raw, geometry, space);
        let (pos, image) = (word.pos_norm, word.idx);

        let next_index = self.composed_blocks.len();
        self.composed_blocks
            .entry((image, region_id.to_string()))
            .and_modify(|cb| {
                cb.end_character = pos;
                cb.geometry = cb.geometry.union(geometry);
            })
            .or_insert_with(|| ComposedBlock {
                alto_id: Some(region_id.to_string()),
                block_type: block_type.map(str::to_string),
                ..ComposedBlock::new(image, pos, pos, next_index).with_geometry(geometry)
            });
        pos
    }

    fn append(&mut self, raw: &str, geometry: Geometry, space: i32) -> &Word {
        if self.images.is_empty() {
            self.begin_image(None);
        }
        let line = match self.current_line {
            Some(line) => line,
            None => self.begin_line(),
        };
        let image = self.images.len() - 1;

        // A word is one key in the normalised text, so it must not contain a separator.
        let norm = normalise(raw).replace(' ', "");
        let pos_norm = self.norm.len();
        let word = Word::new(raw, norm.clone(), pos_norm)
            .with_geometry(geometry)
            .with_numbering(self.word_counter, line)
            .with_image(image)
            .with_pos_raw(self.raw.len())
            .with_space(space);
        self.word_counter += 1;

        self.norm.push_str(&norm);
        self.norm.push(' ');
        self.raw.push_str(raw);
        self.raw.push(' ');

        let key_len = self.config.min_suggestion_length;
        if norm.chars().count() >= key_len {
            let key: String = norm.chars().take(key_len).collect();
            self.buckets.entry(key).or_default().insert(norm);
        }

        self.words.entry(pos_norm).or_insert(word)
    }

    /// Finish the text.
    pub fn build(self) -> SearchText {
        let mut normalised_full_text = self.norm;
        normalised_full_text.truncate(normalised_full_text.trim_end().len());
        let mut raw_full_text = self.raw;
        raw_full_text.truncate(raw_full_text.trim_end().len());

        log::info!("Raw text: {} bytes", raw_full_text.len());
        log::info!("Norm text: {} bytes", normalised_full_text.len());
        log::info!(
            "Words: {}, images: {}, composed blocks: {}",
            self.words.len(),
            self.images.len(),
            self.composed_blocks.len()
        );

        SearchText {
            normalised_full_text,
            raw_full_text,
            words: self.words,
            images: self.images,
            composed_blocks: self.composed_blocks.into_values().collect(),
            autocomplete_buckets: self.buckets,
            suggestion_key_length: self.config.min_suggestion_length,
            config: self.config,
        }
    }
}
