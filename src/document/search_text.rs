//! Full text of a work, optimised for searching.

use super::normalise::normalise;
use crate::config::TextConfig;
use crate::search::{ResultRect, SearchConverter, SearchResult};
use crate::text::{ComposedBlock, Word};
use crate::utils::floor_char_boundary;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Where one image (page) starts in the normalised full text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRange {
    /// Image index within the work
    pub index: usize,
    /// Offset of the image's first word in the normalised text
    pub start_character: usize,
    /// Page label, if the source has one
    #[serde(default)]
    pub order_label: Option<String>,
}

/// A hit together with the raw text around it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HitInContext {
    /// Raw text preceding the hit
    pub before: String,
    /// Raw text following the hit
    pub after: String,
    /// Raw words of the hit joined by spaces
    pub hit: String,
}

/// The full text of a sequence of page images (a whole book).
///
/// Rather than mirroring the OCR hierarchy, the text is held as one large
/// normalised string with punctuation removed. The offset of each word in
/// that string is also its key in [`words`](Self::words), so a substring
/// match resolves straight to the words (and rectangles) that make it up.
/// Per-image start offsets and composed-region extents allow a single page's
/// block tree to be rebuilt on demand, see [`SearchText::page`].
#[derive(Debug, Clone, Default)]
pub struct SearchText {
    /// Normalised words separated by single spaces
    pub normalised_full_text: String,

    /// Raw words separated by single spaces
    pub raw_full_text: String,

    /// Words keyed by their offset in the normalised text
    pub words: BTreeMap<usize, Word>,

    /// Start offsets of the source images
    pub images: Vec<ImageRange>,

    /// Composed regions, ordered by `composed_block_index`
    pub composed_blocks: Vec<ComposedBlock>,

    /// Normalised words bucketed by their leading characters
    pub autocomplete_buckets: BTreeMap<String, BTreeSet<String>>,

    /// Bucket key length, fixed when the buckets were built
    pub(crate) suggestion_key_length: usize,

    /// Search and context settings
    pub config: TextConfig,
}

impl SearchText {
    /// Find every occurrence of `term` and return its rectangles.
    ///
    /// The term is normalised first; a blank term finds nothing. A match that
    /// starts inside a word is widened to the start of that word, and every
    /// word the match touches is part of the hit. Hits are numbered from 0 in
    /// text order. For multi-word terms, adjacent words on one line are
    /// merged into a single rectangle.
    pub fn search(&self, term: &str) -> Vec<ResultRect> {
        let term = normalise(term);
        if term.is_empty() {
            return Vec::new();
        }

        let matched = self.find_matches(&term);
        log::debug!("Search for '{}' matched {} words", term, matched.len());
        self.rectangles(&term, &matched)
    }

    /// Search and group the rectangles by page for a player.
    pub fn search_for_player(&self, term: &str) -> Vec<SearchResult> {
        SearchConverter::convert_to_player_results(&self.search(term))
    }

    /// Words hit by each occurrence of `term`, with their hit number.
    fn find_matches(&self, term: &str) -> Vec<(&Word, usize)> {
        let text = &self.normalised_full_text;
        let bytes = text.as_bytes();
        let mut matched = Vec::new();
        let mut hit = 0;
        let mut start = 0;

        'scan: while start < text.len() {
            let Some(offset) = text[start..].find(term) else {
                break;
            };

            // The match might not be on a word boundary; walk back to the preceding space.
            let mut match_pos = start + offset;
            let mut padding = 0;
            while match_pos > 0 && bytes[match_pos - 1] != b' ' {
                match_pos -= 1;
                padding += 1;
            }

            let first = matched.len();
            let mut match_len = 0;
            let mut word_pos = match_pos;
            while match_len < term.len() + padding {
                let Some(word) = self.words.get(&word_pos) else {
                    log::warn!("No word at position {} while resolving '{}'", word_pos, term);
                    matched.truncate(first);
                    start += offset + term.len();
                    continue 'scan;
                };
                matched.push((word, hit));
                let len_in_text = word.len_norm() + 1;
                match_len += len_in_text;
                word_pos += len_in_text;
            }

            hit += 1;
            start = match_pos + match_len;
        }

        matched
    }

    /// Build rectangles for matched words, coalescing for multi-word terms.
    fn rectangles(&self, term: &str, matched: &[(&Word, usize)]) -> Vec<ResultRect> {
        let Some(&(first, first_hit)) = matched.first() else {
            return Vec::new();
        };

        let mut rects = if !term.contains(' ') {
            matched
                .iter()
                .map(|&(word, hit)| ResultRect::from_word(word, hit))
                .collect::<Vec<_>>()
        } else {
            let mut rects = Vec::new();
            let mut current = ResultRect::from_word(first, first_hit);
            for &(word, hit) in &matched[1..] {
                if current.is_adjacent_to(word) {
                    current.extend_with(word);
                } else {
                    let done = std::mem::replace(&mut current, ResultRect::from_word(word, hit));
                    rects.push(done);
                }
            }
            rects.push(current);
            rects
        };

        self.add_context(&mut rects);
        rects
    }

    fn add_context(&self, rects: &mut [ResultRect]) {
        if rects.len() >= self.config.max_results_with_context {
            log::debug!("Skipping context for {} results", rects.len());
            return;
        }
        let size = self.config.snippet_size;
        for rect in rects.iter_mut() {
            if let Some(hic) = self.hit_in_context(&rect.pos_norms, size, size) {
                rect.before = Some(hic.before);
                rect.after = Some(hic.after);
            }
        }
    }

    /// Raw text around the words at `positions` (normalised offsets).
    ///
    /// Takes up to `before` bytes preceding the first word and up to `after`
    /// bytes following the last, shortened to character boundaries. Returns
    /// `None` if no position names a word.
    pub fn hit_in_context(
        &self,
        positions: &[usize],
        before: usize,
        after: usize,
    ) -> Option<HitInContext> {
        let words: Vec<&Word> = positions.iter().filter_map(|p| self.words.get(p)).collect();
        let (first, last) = (words.first()?, words.last()?);
        let raw = &self.raw_full_text;

        let pre_end = floor_char_boundary(raw, first.pos_raw);
        let pre_start = floor_char_boundary(raw, pre_end.saturating_sub(before));
        let post_start = floor_char_boundary(raw, last.pos_raw + last.len_raw());
        let post_end = floor_char_boundary(raw, post_start.saturating_add(after));

        Some(HitInContext {
            before: raw[pre_start..pre_end].to_string(),
            after: raw[post_start..post_end].to_string(),
            hit: words.iter().map(|w| w.raw()).collect::<Vec<_>>().join(" "),
        })
    }

    /// The word at `pos`, or the nearest word starting before it.
    pub fn word_at(&self, pos: usize) -> Option<ResultRect> {
        self.words
            .range(..=pos)
            .next_back()
            .map(|(_, word)| ResultRect::from_word(word, 0))
    }

    /// The `n`-th word of the text (0-based).
    pub fn nth_word(&self, n: usize) -> Option<ResultRect> {
        self.words.values().nth(n).map(|word| ResultRect::from_word(word, 0))
    }

    /// Autocomplete suggestions for a partial term.
    ///
    /// Returns normalised words starting with the term, shortest first then
    /// alphabetically. Terms shorter than the bucket key length the text was
    /// built with give nothing.
    pub fn suggestions(&self, term: &str) -> Vec<String> {
        let term = normalise(term);
        let key_len = self.suggestion_key_length;
        if term.chars().count() < key_len {
            return Vec::new();
        }
        let key: String = term.chars().take(key_len).collect();
        let Some(bucket) = self.autocomplete_buckets.get(&key) else {
            return Vec::new();
        };

        let mut suggestions: Vec<String> =
            bucket.iter().filter(|s| s.starts_with(&term)).cloned().collect();
        suggestions.sort_by(|a, b| a.len().cmp(&b.len()).then_with(|| a.cmp(b)));
        suggestions
    }

    /// Minimum term length for [`suggestions`](Self::suggestions).
    pub fn suggestion_key_length(&self) -> usize {
        self.suggestion_key_length
    }

    /// Number of images in the text.
    pub fn image_count(&self) -> usize {
        self.images.len()
    }
}
