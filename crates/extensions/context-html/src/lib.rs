//! # vocab-context-html
//!
//! Derives disambiguating context for a selection from an HTML page.
//!
//! The page is parsed with `scraper`; the selection is anchored on a text
//! node and the nearest block-level ancestor (at most a few levels up)
//! supplies the context.

mod display;
mod extractor;
mod source;
mod visible_text;

pub use display::{resolved_display, DisplayRole};
pub use extractor::{extract_context, HtmlContextExtractor, MAX_ANCESTOR_LEVELS};
pub use source::PageLoader;
