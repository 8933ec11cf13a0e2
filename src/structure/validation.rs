//! Structural validation of block trees.
//!
//! The token stream trusts its input. This pass checks the ordering and
//! nesting invariants the stream relies on, for use in tests or before
//! handing an externally built tree to a renderer.

use crate::error::{Error, Result};
use crate::text::Block;
use crate::tokens::TextToken;
use std::fmt;

/// Kind of structural problem found in a block tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IssueKind {
    /// `start_word_position` is after `end_word_position`
    InvertedRange,
    /// A child's range is not contained in its parent's range
    ChildOutsideParent,
    /// A child starts before its preceding sibling
    ChildrenOutOfOrder,
    /// Words are not strictly increasing in stream order
    WordsOutOfOrder,
    /// A child starts exactly on a word its parent emits, so the stream drops it
    ChildStartsOnParentWord,
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            IssueKind::InvertedRange => "inverted range",
            IssueKind::ChildOutsideParent => "child outside parent",
            IssueKind::ChildrenOutOfOrder => "children out of order",
            IssueKind::WordsOutOfOrder => "words out of order",
            IssueKind::ChildStartsOnParentWord => "child starts on parent word",
        };
        f.write_str(name)
    }
}

/// A single structural problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructureIssue {
    /// Issue kind.
    pub kind: IssueKind,
    /// Child indexes from the root to the offending block (empty for the root).
    pub path: Vec<usize>,
    /// Human-readable message.
    pub message: String,
}

impl StructureIssue {
    fn new(kind: IssueKind, path: &[usize], message: impl Into<String>) -> Self {
        Self {
            kind,
            path: path.to_vec(),
            message: message.into(),
        }
    }

    /// Slash-separated location of the offending block, e.g. `root/2/0`.
    pub fn location(&self) -> String {
        let mut location = String::from("root");
        for index in &self.path {
            location.push('/');
            location.push_str(&index.to_string());
        }
        location
    }
}

impl fmt::Display for StructureIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}: {}", self.kind, self.location(), self.message)
    }
}

/// Result of validating a block tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    /// Problems found, in discovery order
    pub issues: Vec<StructureIssue>,
}

impl ValidationReport {
    /// True if no issues were found.
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }

    /// Issues of one kind.
    pub fn issues_of(&self, kind: IssueKind) -> impl Iterator<Item = &StructureIssue> {
        self.issues.iter().filter(move |issue| issue.kind == kind)
    }

    /// Turn the report into an error if any issue was found.
    pub fn into_result(self) -> Result<()> {
        if self.is_valid() {
            return Ok(());
        }
        let summary = self
            .issues
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        Err(Error::InvalidStructure(summary))
    }
}

/// Check a block tree against the invariants the token stream assumes.
///
/// Checks, per block: the range is not inverted, each child's range lies
/// within the parent's, children are in ascending start order, and no child
/// starts on a position where its parent has a word. Across the whole tree,
/// words must be strictly increasing in token-stream order.
pub fn validate_block_tree(root: &Block) -> ValidationReport {
    let mut report = ValidationReport::default();
    let mut path = Vec::new();
    validate_block(root, &mut path, &mut report);
    validate_word_order(root, &mut report);

    if report.is_valid() {
        log::trace!("Block tree valid ({} blocks)", root.block_count());
    } else {
        log::debug!("Block tree has {} structural issues", report.issues.len());
    }
    report
}

fn validate_block(block: &Block, path: &mut Vec<usize>, report: &mut ValidationReport) {
    if block.start_word_position > block.end_word_position {
        report.issues.push(StructureIssue::new(
            IssueKind::InvertedRange,
            path,
            format!(
                "start {} is after end {}",
                block.start_word_position, block.end_word_position
            ),
        ));
    }

    let mut previous_start: Option<usize> = None;
    for (index, child) in block.blocks.iter().enumerate() {
        path.push(index);

        if child.start_word_position < block.start_word_position
            || child.end_word_position > block.end_word_position
        {
            report.issues.push(StructureIssue::new(
                IssueKind::ChildOutsideParent,
                path,
                format!(
                    "range [{}, {}] not within parent [{}, {}]",
                    child.start_word_position,
                    child.end_word_position,
                    block.start_word_position,
                    block.end_word_position
                ),
            ));
        }

        if let Some(previous) = previous_start {
            if child.start_word_position < previous {
                report.issues.push(StructureIssue::new(
                    IssueKind::ChildrenOutOfOrder,
                    path,
                    format!(
                        "starts at {} before preceding sibling at {}",
                        child.start_word_position, previous
                    ),
                ));
            }
        }
        previous_start = Some(child.start_word_position);

        if block.words().any(|word| word.pos_norm == child.start_word_position) {
            report.issues.push(StructureIssue::new(
                IssueKind::ChildStartsOnParentWord,
                path,
                format!(
                    "starts at {}, which is a word of its parent",
                    child.start_word_position
                ),
            ));
        }

        validate_block(child, path, report);
        path.pop();
    }
}

fn validate_word_order(root: &Block, report: &mut ValidationReport) {
    let mut last: Option<usize> = None;
    for word in root.tokens().filter_map(|token| match token {
        TextToken::Word(word) => Some(word),
        _ => None,
    }) {
        if let Some(previous) = last {
            if word.pos_norm <= previous {
                report.issues.push(StructureIssue::new(
                    IssueKind::WordsOutOfOrder,
                    &[],
                    format!(
                        "word '{}' at {} follows position {}",
                        word.content_raw, word.pos_norm, previous
                    ),
                ));
            }
        }
        last = Some(word.pos_norm);
    }
}
