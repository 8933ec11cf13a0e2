//! The full text of a work and operations over it.
//!
//! A [`SearchText`] holds every word of a work in one normalised string, so
//! search is a substring scan. Per-page block trees are rebuilt from it on
//! demand with [`SearchText::page`].

mod builder;
mod normalise;
mod page;
mod search_text;

pub use builder::SearchTextBuilder;
pub use normalise::normalise;
pub use search_text::{HitInContext, ImageRange, SearchText};

impl SearchText {
    /// Start building a text.
    pub fn builder() -> SearchTextBuilder {
        SearchTextBuilder::new()
    }
}
