//! Lazy token stream over a block tree.
//!
//! The stream merges two orderings: the block's own lines and words, and its
//! child blocks positioned by `start_word_position`. A child is emitted in the
//! gap between the last word emitted and the next one when its start position
//! falls strictly inside that gap. Children left over after the last word are
//! emitted at the end, before the block closes.
//!
//! The traversal is an explicit stack of frames, one per open block, so deep
//! trees do not recurse and nothing is buffered ahead of the consumer.

use super::token::TextToken;
use crate::text::Block;
use std::iter::FusedIterator;

/// Lazy, forward-only iterator of [`TextToken`]s for a block tree.
///
/// Created by [`Block::tokens`]. Each stream is independent; the tree is only
/// read.
#[derive(Debug, Clone)]
pub struct TokenStream<'a> {
    stack: Vec<Frame<'a>>,
}

impl<'a> TokenStream<'a> {
    /// Start a traversal at `root`.
    pub fn new(root: &'a Block) -> Self {
        Self {
            stack: vec![Frame::new(root)],
        }
    }

    /// Number of blocks currently open.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }
}

impl<'a> Iterator for TokenStream<'a> {
    type Item = TextToken<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let frame = self.stack.last_mut()?;
            match frame.step() {
                Step::Emit(token) => return Some(token),
                Step::Descend(child) => self.stack.push(Frame::new(child)),
                Step::Finished => {
                    self.stack.pop();
                },
            }
        }
    }
}

impl FusedIterator for TokenStream<'_> {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Open,
    Lines,
    Trailing,
    Close,
    Done,
}

enum Step<'a> {
    Emit(TextToken<'a>),
    Descend(&'a Block),
    Finished,
}

/// Traversal state of one open block.
#[derive(Debug, Clone)]
struct Frame<'a> {
    block: &'a Block,
    phase: Phase,
    /// Position of the last word emitted; `None` before the first.
    cursor: Option<usize>,
    line: usize,
    word: usize,
    /// Space already emitted for the current word.
    spaced: bool,
    /// Next child to examine for the current gap.
    scan: usize,
    emitted: Vec<bool>,
}

impl<'a> Frame<'a> {
    fn new(block: &'a Block) -> Self {
        Self {
            block,
            phase: Phase::Open,
            cursor: None,
            line: 0,
            word: 0,
            spaced: false,
            scan: 0,
            emitted: vec![false; block.blocks.len()],
        }
    }

    fn step(&mut self) -> Step<'a> {
        let block = self.block;
        loop {
            match self.phase {
                Phase::Open => {
                    self.phase = Phase::Lines;
                    return Step::Emit(TextToken::BlockStart(block));
                },
                Phase::Lines => {
                    let Some(line) = block.lines.get(self.line) else {
                        self.phase = Phase::Trailing;
                        self.scan = 0;
                        continue;
                    };
                    let Some(word) = line.words.get(self.word) else {
                        self.line += 1;
                        self.word = 0;
                        self.scan = 0;
                        return Step::Emit(TextToken::NewLine);
                    };

                    let cursor = self.cursor;
                    let next_pos = word.pos_norm;
                    if let Some(child) =
                        self.take_child(|start| is_after(cursor, start) && start < next_pos)
                    {
                        return Step::Descend(child);
                    }

                    if self.word > 0 && !self.spaced {
                        self.spaced = true;
                        return Step::Emit(TextToken::Space);
                    }

                    self.spaced = false;
                    self.cursor = Some(next_pos);
                    self.word += 1;
                    self.scan = 0;
                    return Step::Emit(TextToken::Word(word));
                },
                Phase::Trailing => {
                    let cursor = self.cursor;
                    if let Some(child) = self.take_child(|start| is_after(cursor, start)) {
                        return Step::Descend(child);
                    }
                    self.phase = Phase::Close;
                },
                Phase::Close => {
                    self.phase = Phase::Done;
                    return Step::Emit(TextToken::BlockEnd(block));
                },
                Phase::Done => return Step::Finished,
            }
        }
    }

    /// Next not-yet-emitted child, in stored order, whose start is accepted.
    fn take_child(&mut self, accept: impl Fn(usize) -> bool) -> Option<&'a Block> {
        let children: &'a [Block] = &self.block.blocks;
        while self.scan < children.len() {
            let index = self.scan;
            self.scan += 1;
            if !self.emitted[index] && accept(children[index].start_word_position) {
                self.emitted[index] = true;
                return Some(&children[index]);
            }
        }
        None
    }
}

/// Strictly after the cursor; everything is after the "before all words" cursor.
fn is_after(cursor: Option<usize>, start: usize) -> bool {
    match cursor {
        Some(pos) => start > pos,
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::{Line, Word};

    /// Compact rendering: `[` / `]` for blocks, word norm text, `_` space, `/` newline.
    fn shape(block: &Block) -> String {
        block
            .tokens()
            .map(|t| match t {
                TextToken::BlockStart(_) => "[".to_string(),
                TextToken::BlockEnd(_) => "]".to_string(),
                TextToken::Word(w) => w.content_norm.clone(),
                TextToken::Space => "_".to_string(),
                TextToken::NewLine => "/".to_string(),
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn word(pos: usize) -> Word {
        Word::new(format!("W{}", pos), format!("w{}", pos), pos)
    }

    fn line(number: usize, positions: &[usize]) -> Line {
        Line::new(number, positions.iter().map(|&p| word(p)).collect())
    }

    #[test]
    fn test_interleaves_children_between_words() {
        let root = Block::new(0, 5)
            .with_line(line(0, &[0, 1, 3, 4]))
            .with_block(Block::new(2, 2))
            .with_block(Block::new(6, 6));

        assert_eq!(shape(&root), "[ w0 _ w1 [ ] _ w3 _ w4 / [ ] ]");
    }

    #[test]
    fn test_space_follows_interleaved_child() {
        let root = Block::new(0, 9)
            .with_line(line(0, &[0, 5]))
            .with_block(Block::new(2, 3).with_line(line(1, &[2, 3])));

        assert_eq!(shape(&root), "[ w0 [ w2 _ w3 / ] _ w5 / ]");
    }

    #[test]
    fn test_child_before_first_word() {
        let root = Block::new(0, 9)
            .with_line(line(0, &[5, 6]))
            .with_block(Block::new(0, 4).with_line(line(1, &[0, 4])));

        assert_eq!(shape(&root), "[ [ w0 _ w4 / ] w5 _ w6 / ]");
    }

    #[test]
    fn test_no_leading_space_at_line_start() {
        let root = Block::new(0, 9).with_line(line(0, &[0, 1])).with_line(line(1, &[2, 3]));

        assert_eq!(shape(&root), "[ w0 _ w1 / w2 _ w3 / ]");
    }

    #[test]
    fn test_child_between_lines_goes_before_next_line_word() {
        let root = Block::new(0, 9)
            .with_line(line(0, &[0, 1]))
            .with_line(line(1, &[5, 6]))
            .with_block(Block::new(3, 3));

        assert_eq!(shape(&root), "[ w0 _ w1 / [ ] w5 _ w6 / ]");
    }

    #[test]
    fn test_empty_line_emits_bare_newline() {
        let root = Block::new(0, 0).with_line(Line::new(0, Vec::new()));
        let tokens: Vec<_> = root.tokens().collect();

        assert_eq!(tokens.len(), 3);
        assert!(matches!(tokens[0], TextToken::BlockStart(_)));
        assert_eq!(tokens[1], TextToken::NewLine);
        assert!(matches!(tokens[2], TextToken::BlockEnd(_)));
    }

    #[test]
    fn test_block_without_lines_flushes_all_children() {
        let root = Block::new(0, 9)
            .with_block(Block::new(0, 1).with_line(line(0, &[0, 1])))
            .with_block(Block::new(2, 2).with_line(line(1, &[2])));

        assert_eq!(shape(&root), "[ [ w0 _ w1 / ] [ w2 / ] ]");
    }

    #[test]
    fn test_child_starting_on_emitted_word_is_not_emitted() {
        // Strict bounds on both sides: a child whose start equals a word the
        // parent itself emits never falls inside a gap.
        let root = Block::new(0, 4)
            .with_line(line(0, &[0, 2, 4]))
            .with_block(Block::new(2, 2).with_line(line(1, &[9])));

        assert_eq!(shape(&root), "[ w0 _ w2 _ w4 / ]");
    }

    #[test]
    fn test_child_tied_with_first_word_is_not_emitted() {
        let root = Block::new(0, 4)
            .with_line(line(0, &[0, 1]))
            .with_block(Block::new(0, 0));

        assert_eq!(shape(&root), "[ w0 _ w1 / ]");
    }

    #[test]
    fn test_nested_children() {
        let inner = Block::new(3, 3).with_line(line(2, &[3]));
        let middle = Block::new(2, 4)
            .with_line(line(1, &[2, 4]))
            .with_block(inner);
        let root = Block::new(0, 6).with_line(line(0, &[0, 6])).with_block(middle);

        assert_eq!(shape(&root), "[ w0 [ w2 [ w3 / ] _ w4 / ] _ w6 / ]");
    }

    #[test]
    fn test_stream_is_restartable() {
        let root = Block::new(0, 5)
            .with_line(line(0, &[0, 1, 3]))
            .with_block(Block::new(2, 2));

        let first: Vec<_> = root.tokens().collect();
        let second: Vec<_> = root.tokens().collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_stream_is_lazy_and_fused() {
        let root = Block::new(0, 1).with_line(line(0, &[0, 1]));
        let mut stream = root.tokens();

        assert!(matches!(stream.next(), Some(TextToken::BlockStart(_))));
        assert_eq!(stream.depth(), 1);
        assert_eq!(stream.by_ref().count(), 5);
        assert_eq!(stream.next(), None);
        assert_eq!(stream.next(), None);
        assert_eq!(stream.depth(), 0);
    }

    #[test]
    fn test_unsorted_children_still_emit_once() {
        // Out-of-order input is not rejected; each child appears at most once.
        let root = Block::new(0, 9)
            .with_line(line(0, &[0, 5, 9]))
            .with_block(Block::new(7, 7))
            .with_block(Block::new(2, 2));

        let starts = root.tokens().filter(|t| matches!(t, TextToken::BlockStart(_))).count();
        assert_eq!(starts, 3);
        assert_eq!(shape(&root), "[ w0 [ ] _ w5 [ ] _ w9 / ]");
    }
}
