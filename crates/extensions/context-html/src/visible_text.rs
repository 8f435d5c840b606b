//! Rendered-text approximation for an element subtree.

use scraper::{ElementRef, Node};

use crate::display::{resolved_display, DisplayRole};

/// Tags whose contents are never rendered as text.
const NON_RENDERED: &[&str] = &["script", "style", "noscript", "template", "head", "title"];

/// Whether `element` renders no text of its own.
pub(crate) fn is_hidden(element: &ElementRef<'_>) -> bool {
    NON_RENDERED.contains(&element.value().name())
        || resolved_display(element) == DisplayRole::None
}

/// Collapse every whitespace run to a single space.
pub(crate) fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Text a reader would see for `element`.
///
/// Whitespace inside text nodes collapses to single spaces, block-level
/// descendants start on their own line, and hidden subtrees are skipped.
pub(crate) fn visible_text(element: &ElementRef<'_>) -> String {
    let mut raw = String::new();
    collect(element, &mut raw);

    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn collect(element: &ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => {
                // Whitespace runs collapse across node boundaries too.
                for c in text.chars() {
                    if !c.is_whitespace() {
                        out.push(c);
                    } else if !(out.is_empty() || out.ends_with(' ') || out.ends_with('\n')) {
                        out.push(' ');
                    }
                }
            }
            Node::Element(_) => {
                let Some(child_el) = ElementRef::wrap(child) else {
                    continue;
                };
                if is_hidden(&child_el) {
                    continue;
                }
                if child_el.value().name() == "br" {
                    out.push('\n');
                    continue;
                }
                let block = resolved_display(&child_el).is_block_like()
                    || matches!(child_el.value().name(), "tr" | "table");
                if block {
                    out.push('\n');
                }
                collect(&child_el, out);
                if block {
                    out.push('\n');
                }
            }
            _ => {}
        }
    }
}
