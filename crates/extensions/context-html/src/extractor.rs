//! Context extraction around an anchored selection.

use async_trait::async_trait;
use scraper::{ElementRef, Html, Node};
use tracing::debug;
use vocab_protocols::text::truncate_chars;
use vocab_protocols::{
    ContextExtractor, ContextSnippet, ExtractError, SelectionEvent, FALLBACK_CONTEXT_LIMIT,
    PRIMARY_CONTEXT_LIMIT,
};

use crate::display::resolved_display;
use crate::source::PageLoader;
use crate::visible_text::{collapse_whitespace, is_hidden, visible_text};

/// Levels examined from the anchor text node upwards, the text node included.
pub const MAX_ANCESTOR_LEVELS: usize = 5;

/// Tags accepted as context containers regardless of their display role.
const CONTAINER_TAGS: &[&str] = &["p", "div", "li", "blockquote", "td", "article", "section"];

/// A rendered text node together with the element holding it.
struct TextSlot<'a> {
    parent: ElementRef<'a>,
    text: String,
}

fn collect_text_slots<'a>(element: ElementRef<'a>, out: &mut Vec<TextSlot<'a>>) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => {
                let text = collapse_whitespace(text);
                if !text.is_empty() {
                    out.push(TextSlot { parent: element, text });
                }
            }
            Node::Element(_) => {
                if let Some(child_el) = ElementRef::wrap(child) {
                    if !is_hidden(&child_el) {
                        collect_text_slots(child_el, out);
                    }
                }
            }
            _ => {}
        }
    }
}

/// Element holding the `occurrence`-th match of `selected`.
fn find_anchor<'a>(document: &'a Html, selected: &str, occurrence: usize) -> Option<ElementRef<'a>> {
    let needle = collapse_whitespace(selected);
    if needle.is_empty() {
        return None;
    }

    let mut slots = Vec::new();
    collect_text_slots(document.root_element(), &mut slots);

    let mut seen = 0;
    let mut last_match = None;
    for slot in &slots {
        let count = slot.text.matches(needle.as_str()).count();
        if count == 0 {
            continue;
        }
        if occurrence < seen + count {
            return Some(slot.parent);
        }
        seen += count;
        last_match = Some(slot.parent);
    }
    if last_match.is_some() {
        debug!(occurrence, matches = seen, "Occurrence out of range, using last match");
        return last_match;
    }

    // Selection spans several text nodes: anchor on its first word.
    let first_word = needle.split(' ').next()?;
    slots
        .iter()
        .find(|slot| slot.text.contains(first_word))
        .map(|slot| slot.parent)
}

fn is_context_container(element: &ElementRef<'_>) -> bool {
    resolved_display(element).is_block_like()
        || CONTAINER_TAGS.contains(&element.value().name())
}

/// Extract the context snippet for `selected` from a parsed page.
///
/// Returns an empty snippet when the selection cannot be found.
pub fn extract_context(document: &Html, selected: &str, occurrence: usize) -> ContextSnippet {
    let Some(anchor_parent) = find_anchor(document, selected, occurrence) else {
        return ContextSnippet::empty();
    };

    // Level 0 is the text node itself, which is never a container.
    let mut current = Some(anchor_parent);
    for _level in 1..MAX_ANCESTOR_LEVELS {
        let Some(element) = current else {
            break;
        };
        if matches!(element.value().name(), "body" | "html") {
            break;
        }
        if is_context_container(&element) {
            let text = visible_text(&element);
            return ContextSnippet::new(truncate_chars(text.trim(), PRIMARY_CONTEXT_LIMIT));
        }
        current = element.parent().and_then(ElementRef::wrap);
    }

    let text = visible_text(&anchor_parent);
    ContextSnippet::new(truncate_chars(text.trim(), FALLBACK_CONTEXT_LIMIT))
}

/// Parses the markup and extracts in one step so the `!Send` document never
/// crosses an await point.
fn extract_from_markup(markup: &str, selected: &str, occurrence: usize) -> ContextSnippet {
    let document = Html::parse_document(markup);
    extract_context(&document, selected, occurrence)
}

/// [`ContextExtractor`] over HTML pages from files, URLs or memory.
#[derive(Debug, Clone)]
pub struct HtmlContextExtractor {
    loader: PageLoader,
}

impl HtmlContextExtractor {
    pub fn new() -> Result<Self, ExtractError> {
        Ok(Self {
            loader: PageLoader::new()?,
        })
    }

    pub fn with_loader(loader: PageLoader) -> Self {
        Self { loader }
    }
}

#[async_trait]
impl ContextExtractor for HtmlContextExtractor {
    async fn extract(&self, event: &SelectionEvent) -> Result<ContextSnippet, ExtractError> {
        let markup = self.loader.load(event.source()).await?;
        let snippet = extract_from_markup(&markup, event.selected_text(), event.occurrence());
        debug!(
            source = %event.source(),
            chars = snippet.as_str().chars().count(),
            "Extracted context"
        );
        Ok(snippet)
    }
}

#[cfg(test)]
#[path = "extractor_tests.rs"]
mod tests;
