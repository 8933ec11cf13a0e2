//! Rebuilding one page's block tree from the flat full text.

use super::search_text::SearchText;
use crate::error::{Error, Result};
use crate::text::{Block, ComposedBlock, Line, Word};
use std::collections::HashMap;

impl SearchText {
    /// Assemble the block tree for one image.
    ///
    /// The root block covers the image from its start offset to its last
    /// word. Every composed region on the image becomes a child block that
    /// starts on the region's first word and ends on its last; a region that
    /// opens while another is still open nests inside it. A region whose end
    /// falls between words is closed before the next word past it, and one
    /// that runs beyond the image is cut at the image's last word. Of several
    /// regions starting on the same word only the first is used. Words are grouped
    /// into lines by their document line number within whichever block is
    /// innermost when they are reached.
    ///
    /// The result satisfies the ordering invariants of the token stream, and
    /// streaming it yields each of the image's words exactly once.
    pub fn page(&self, image_index: usize) -> Result<Block> {
        let image = self
            .images
            .get(image_index)
            .ok_or(Error::ImageIndexOutOfRange {
                index: image_index,
                count: self.images.len(),
            })?;
        let end = self
            .images
            .get(image_index + 1)
            .map_or(usize::MAX, |next| next.start_character);

        // First region wins when two start on the same word.
        let mut regions: HashMap<usize, &ComposedBlock> = HashMap::new();
        for cb in self.composed_blocks.iter().filter(|cb| cb.image_index == image_index) {
            regions.entry(cb.start_character).or_insert(cb);
        }

        let words = self.words.range(image.start_character..end).map(|(_, word)| word);
        let last = self
            .words
            .range(image.start_character..end)
            .next_back()
            .map_or(image.start_character, |(&pos, _)| pos);

        let mut root = Block::new(image.start_character, last);
        let mut open: Vec<Block> = Vec::new();

        for word in words {
            let pos = word.pos_norm;

            while open.last().is_some_and(|block| block.end_word_position < pos) {
                log::warn!("Composed block ended before word {} without closing", pos);
                close_innermost(&mut root, &mut open);
            }

            if let Some(cb) = regions.get(&pos) {
                let end = cb.end_character.clamp(pos, last);
                open.push(Block::new(pos, end).with_composed_block((*cb).clone()));
            }

            push_word(open.last_mut().unwrap_or(&mut root), word.clone());

            while open.last().is_some_and(|block| block.end_word_position <= pos) {
                close_innermost(&mut root, &mut open);
            }
        }

        while !open.is_empty() {
            close_innermost(&mut root, &mut open);
        }

        log::debug!(
            "Assembled image {}: {} words in {} blocks",
            image_index,
            root.word_count(),
            root.block_count()
        );
        Ok(root)
    }

    /// Assemble every page in image order.
    pub fn pages(&self) -> Result<Vec<Block>> {
        (0..self.images.len()).map(|index| self.page(index)).collect()
    }
}

fn push_word(block: &mut Block, word: Word) {
    match block.lines.last_mut() {
        Some(line) if line.line_number == word.li => line.words.push(word),
        _ => block.add_line(Line::new(word.li, vec![word])),
    }
}

fn close_innermost(root: &mut Block, open: &mut Vec<Block>) {
    if let Some(block) = open.pop() {
        match open.last_mut() {
            Some(parent) => parent.add_block(block),
            None => root.add_block(block),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::SearchTextBuilder;
    use super::*;
    use crate::structure::validate_block_tree;
    use crate::text::Geometry;
    use crate::tokens::TextToken;

    fn g() -> Geometry {
        Geometry::default()
    }

    /// Image 0: a heading line, a two-line table region, a closing line.
    /// Image 1: a single line.
    fn sample() -> SearchText {
        let mut b = SearchTextBuilder::new();
        b.begin_image(Some("i".to_string()));
        b.begin_line();
        b.push_word("Deaths", g(), 0);
        b.push_word("by", g(), 0);
        b.push_word("ward", g(), 0);
        b.begin_line();
        b.push_word_in_composed_block("North", g(), 0, "CB1", Some("Table"));
        b.push_word_in_composed_block("12", g(), 0, "CB1", None);
        b.begin_line();
        b.push_word_in_composed_block("South", g(), 0, "CB1", None);
        b.push_word_in_composed_block("9", g(), 0, "CB1", None);
        b.begin_line();
        b.push_word("Total", g(), 0);
        b.push_word("21.", g(), 0);
        b.begin_image(Some("ii".to_string()));
        b.begin_line();
        b.push_word("Appendix", g(), 0);
        b.build()
    }

    fn positions(block: &Block) -> Vec<usize> {
        block
            .tokens()
            .filter_map(|token| token.word().map(|w| w.pos_norm))
            .collect()
    }

    #[test]
    fn test_page_structure() {
        let text = sample();
        let page = text.page(0).unwrap();

        assert_eq!(page.start_word_position, 0);
        assert_eq!(page.lines.len(), 2);
        assert_eq!(page.lines[0].raw_text(), "Deaths by ward");
        assert_eq!(page.lines[1].raw_text(), "Total 21.");

        assert_eq!(page.blocks.len(), 1);
        let table = &page.blocks[0];
        assert_eq!(table.lines.len(), 2);
        assert_eq!(table.lines[0].raw_text(), "North 12");
        assert_eq!(table.lines[1].raw_text(), "South 9");
        let cb = table.composed_block.as_ref().unwrap();
        assert_eq!(cb.block_type.as_deref(), Some("Table"));
        assert_eq!(table.start_word_position, cb.start_character);
        assert_eq!(table.end_word_position, cb.end_character);
    }

    #[test]
    fn test_page_streams_every_word_once_in_order() {
        let text = sample();
        let page = text.page(0).unwrap();

        let expected: Vec<usize> = text
            .words
            .values()
            .filter(|w| w.idx == 0)
            .map(|w| w.pos_norm)
            .collect();
        assert_eq!(positions(&page), expected);
        assert_eq!(page.end_word_position, *expected.last().unwrap());
        assert!(validate_block_tree(&page).is_valid());
    }

    #[test]
    fn test_page_token_layout() {
        let text = sample();
        let page = text.page(0).unwrap();
        let starts = page.tokens().filter(|t| matches!(t, TextToken::BlockStart(_))).count();
        let ends = page.tokens().filter(|t| matches!(t, TextToken::BlockEnd(_))).count();

        assert_eq!(starts, 2);
        assert_eq!(ends, 2);
        let last = page.tokens().last();
        assert!(matches!(last, Some(TextToken::BlockEnd(b)) if std::ptr::eq(b, &page)));
    }

    #[test]
    fn test_second_page() {
        let text = sample();
        let page = text.page(1).unwrap();

        assert!(page.blocks.is_empty());
        assert_eq!(page.word_count(), 1);
        assert_eq!(page.lines[0].raw_text(), "Appendix");
        assert_eq!(page.start_word_position, text.images[1].start_character);
    }

    #[test]
    fn test_page_out_of_range() {
        let text = sample();
        match text.page(2) {
            Err(Error::ImageIndexOutOfRange { index, count }) => {
                assert_eq!((index, count), (2, 2));
            },
            other => panic!("expected out of range, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_image_gives_empty_root() {
        let mut b = SearchTextBuilder::new();
        b.begin_image(None);
        b.begin_image(None);
        b.push_word("only", g(), 0);
        let text = b.build();

        let page = text.page(0).unwrap();
        assert!(page.is_empty());
        assert_eq!(page.tokens().count(), 2);
    }

    /// One line of words "a" to "e" at positions 0, 2, 4, 6, 8, then a
    /// second image holding "f" at 10. Regions are added by hand.
    fn letters(regions: Vec<ComposedBlock>) -> SearchText {
        let mut b = SearchTextBuilder::new();
        b.begin_image(None);
        b.begin_line();
        for raw in ["a", "b", "c", "d", "e"] {
            b.push_word(raw, g(), 0);
        }
        b.begin_image(None);
        b.push_word("f", g(), 0);
        let mut text = b.build();
        text.composed_blocks = regions;
        text
    }

    #[test]
    fn test_region_ending_between_words_is_closed() {
        let text = letters(vec![ComposedBlock::new(0, 2, 5, 0)]);
        let page = text.page(0).unwrap();

        assert_eq!(page.lines.len(), 1);
        assert_eq!(page.lines[0].raw_text(), "a d e");
        assert_eq!(page.blocks.len(), 1);
        let region = &page.blocks[0];
        assert_eq!(region.lines[0].raw_text(), "b c");
        assert_eq!((region.start_word_position, region.end_word_position), (2, 5));

        assert_eq!(positions(&page), vec![0, 2, 4, 6, 8]);
        assert!(validate_block_tree(&page).is_valid());
    }

    #[test]
    fn test_region_running_past_image_is_cut_at_last_word() {
        let text = letters(vec![ComposedBlock::new(0, 6, 100, 0)]);
        let page = text.page(0).unwrap();

        assert_eq!(page.end_word_position, 8);
        assert_eq!(page.lines[0].raw_text(), "a b c");
        let region = &page.blocks[0];
        assert_eq!(region.lines[0].raw_text(), "d e");
        assert_eq!((region.start_word_position, region.end_word_position), (6, 8));

        assert_eq!(positions(&page), vec![0, 2, 4, 6, 8]);
        assert!(validate_block_tree(&page).is_valid());
        assert_eq!(text.page(1).unwrap().word_count(), 1);
    }

    #[test]
    fn test_nested_regions_with_unclosed_inner() {
        // Outer covers b..e; inner starts on c and claims to end past the image.
        let text = letters(vec![
            ComposedBlock::new(0, 2, 8, 0),
            ComposedBlock::new(0, 4, 50, 1),
        ]);
        let page = text.page(0).unwrap();

        assert_eq!(page.blocks.len(), 1);
        let outer = &page.blocks[0];
        assert_eq!(outer.lines[0].raw_text(), "b");
        assert_eq!(outer.blocks.len(), 1);
        assert_eq!(outer.blocks[0].lines[0].raw_text(), "c d e");

        assert_eq!(positions(&page), vec![0, 2, 4, 6, 8]);
        assert!(validate_block_tree(&page).is_valid());
    }

    #[test]
    fn test_first_region_wins_on_shared_start() {
        let first = ComposedBlock {
            alto_id: Some("CB1".to_string()),
            ..ComposedBlock::new(0, 2, 4, 0)
        };
        let second = ComposedBlock {
            alto_id: Some("CB2".to_string()),
            ..ComposedBlock::new(0, 2, 8, 1)
        };
        let text = letters(vec![first, second]);
        let page = text.page(0).unwrap();

        assert_eq!(page.blocks.len(), 1);
        let region = &page.blocks[0];
        let cb = region.composed_block.as_ref().unwrap();
        assert_eq!(cb.alto_id.as_deref(), Some("CB1"));
        assert_eq!(region.lines[0].raw_text(), "b c");
        assert_eq!(page.lines[0].raw_text(), "a d e");
        assert!(validate_block_tree(&page).is_valid());
    }

    #[test]
    fn test_pages() {
        let text = sample();
        let pages = text.pages().unwrap();
        assert_eq!(pages.len(), 2);
        let total: usize = pages.iter().map(Block::word_count).sum();
        assert_eq!(total, text.words.len());
    }
}
