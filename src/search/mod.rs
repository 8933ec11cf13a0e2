//! Search hits and their conversion to highlight rectangles.
//!
//! A search index produces [`ResultRect`]s: one rectangle per matched word
//! (or run of adjacent words on a line), each tagged with the page image it
//! sits on. Players want them grouped by page instead, so
//! [`SearchConverter`] regroups them into [`SearchResult`]s of [`Rect`]s.
//!
//! ## Example
//!
//! ```
//! use alto_text::search::{ResultRect, SearchConverter};
//!
//! let hits = vec![
//!     ResultRect { idx: 2, content_raw: "Cat".into(), ..Default::default() },
//!     ResultRect { idx: 0, content_raw: "cat".into(), hit: 1, ..Default::default() },
//!     ResultRect { idx: 2, content_raw: "CAT".into(), hit: 2, ..Default::default() },
//! ];
//!
//! let pages = SearchConverter::convert_to_player_results(&hits);
//! assert_eq!(pages.len(), 2);
//! assert_eq!(pages[0].index, 2);
//! assert_eq!(pages[0].rects.len(), 2);
//! ```

mod converter;
mod result_rect;

pub use converter::{Rect, SearchConverter, SearchResult};
pub use result_rect::ResultRect;
