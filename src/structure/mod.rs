//! Block tree structure checks.
//!
//! ## Invariants
//!
//! The token stream assumes, without checking:
//! - every block's range is `start <= end`;
//! - a child's range lies within its parent's;
//! - children are stored in ascending start order;
//! - word positions increase strictly in reading order across the tree.
//!
//! A child that starts exactly on one of its parent's own word positions is
//! never emitted by the stream. Trees assembled by
//! [`SearchText::page`](crate::document::SearchText::page) cannot produce
//! that case because the starting word moves into the child.
//!
//! ## Example
//!
//! ```
//! use alto_text::structure::validate_block_tree;
//! use alto_text::text::Block;
//!
//! let tree = Block::new(0, 10).with_block(Block::new(4, 12));
//! let report = validate_block_tree(&tree);
//! assert!(!report.is_valid());
//! assert!(report.into_result().is_err());
//! ```

mod validation;

pub use validation::{IssueKind, StructureIssue, ValidationReport, validate_block_tree};
