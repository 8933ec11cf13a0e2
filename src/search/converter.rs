//! Conversion of raw hits to the page-grouped player format.

use super::result_rect::ResultRect;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A highlight rectangle in the player format.
///
/// The page index is not carried here: it is the owning [`SearchResult`]'s.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge
    pub x: i32,
    /// Top edge
    pub y: i32,
    /// Width
    pub w: i32,
    /// Height
    pub h: i32,
    /// Hit number
    pub hit: usize,
    /// Raw text preceding the hit
    pub before: Option<String>,
    /// Raw text following the hit
    pub after: Option<String>,
    /// Raw text of the hit
    pub word: String,
}

impl From<&ResultRect> for Rect {
    fn from(rr: &ResultRect) -> Self {
        Self {
            x: rr.x,
            y: rr.y,
            w: rr.w,
            h: rr.h,
            hit: rr.hit,
            before: rr.before.clone(),
            after: rr.after.clone(),
            word: rr.content_raw.clone(),
        }
    }
}

/// All highlight rectangles on one page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Image (page) index
    pub index: usize,
    /// Rectangles on the page, in query order
    pub rects: Vec<Rect>,
}

/// Groups raw hits by page.
pub struct SearchConverter;

impl SearchConverter {
    /// Convert results to the simplified player format: page indexes and rectangles.
    ///
    /// One [`SearchResult`] per distinct `idx`, in order of first appearance.
    /// Within a page, rectangles keep their input order. Empty input gives an
    /// empty vector.
    pub fn convert_to_player_results(results: &[ResultRect]) -> Vec<SearchResult> {
        let mut pages: IndexMap<usize, Vec<Rect>> = IndexMap::new();
        for rr in results {
            pages.entry(rr.idx).or_default().push(Rect::from(rr));
        }

        log::debug!("Grouped {} rectangles onto {} pages", results.len(), pages.len());

        pages
            .into_iter()
            .map(|(index, rects)| SearchResult { index, rects })
            .collect()
    }

    /// Same as [`convert_to_player_results`](Self::convert_to_player_results),
    /// with pages in ascending index order.
    pub fn convert_sorted(results: &[ResultRect]) -> Vec<SearchResult> {
        let mut pages = Self::convert_to_player_results(results);
        pages.sort_by_key(|page| page.index);
        pages
    }
}
