//! HTML rendering of block trees.
//!
//! Each block becomes one element carrying a `block` class. Blocks cut from a
//! composed region also carry its index as `data-composed-block`, and table
//! blocks get an extra `table` class. Words are escaped; line ends become
//! `<br/>`.

use super::{RenderOptions, TokenConverter};
use crate::text::{Block, BlockExtension};
use crate::tokens::TextToken;

/// Converter for block trees to HTML.
///
/// # Examples
///
/// ```
/// use alto_text::converters::{HtmlConverter, RenderOptions, TokenConverter};
/// use alto_text::text::Block;
///
/// let converter = HtmlConverter::with_options(RenderOptions::default().with_class_prefix("alto-"));
/// assert_eq!(converter.convert(&Block::new(0, 0)), r#"<div class="alto-block"></div>"#);
/// ```
#[derive(Debug, Clone, Default)]
pub struct HtmlConverter {
    options: RenderOptions,
}

impl HtmlConverter {
    /// Create a converter with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a converter with custom options.
    pub fn with_options(options: RenderOptions) -> Self {
        Self { options }
    }

    fn open_tag(&self, block: &Block) -> String {
        let prefix = &self.options.class_prefix;
        let mut classes = format!("{}block", prefix);
        if matches!(block.extension, Some(BlockExtension::Table { .. })) {
            classes.push(' ');
            classes.push_str(prefix);
            classes.push_str("table");
        }

        let mut tag = format!("<{} class=\"{}\"", self.options.block_element, escape_html(&classes));
        if let Some(cb) = &block.composed_block {
            tag.push_str(&format!(" data-composed-block=\"{}\"", cb.composed_block_index));
        }
        tag.push('>');
        tag
    }
}

impl TokenConverter for HtmlConverter {
    fn convert(&self, block: &Block) -> String {
        let mut html = String::new();
        for token in block.tokens() {
            match token {
                TextToken::BlockStart(b) => html.push_str(&self.open_tag(b)),
                TextToken::BlockEnd(_) => {
                    html.push_str("</");
                    html.push_str(&self.options.block_element);
                    html.push('>');
                },
                TextToken::Word(word) => html.push_str(&escape_html(&word.content_raw)),
                TextToken::Space => html.push(' '),
                TextToken::NewLine => html.push_str("<br/>"),
            }
        }
        html
    }
}

/// Escape HTML special characters.
///
/// # Examples
///
/// ```
/// use alto_text::converters::escape_html;
///
/// assert_eq!(escape_html("<b>Fish & \"chips\"</b>"), "&lt;b&gt;Fish &amp; &quot;chips&quot;&lt;/b&gt;");
/// ```
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}
