//! Display role resolution for elements.
//!
//! There is no style engine here: an inline `display` declaration wins,
//! otherwise the user-agent default for the tag applies.

use scraper::ElementRef;

/// The subset of CSS display values the extractor distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayRole {
    Block,
    ListItem,
    TableCell,
    None,
    /// Inline, flex, table rows and everything else.
    Other,
}

impl DisplayRole {
    /// Block-like roles that can hold a self-contained piece of text.
    pub fn is_block_like(self) -> bool {
        matches!(self, DisplayRole::Block | DisplayRole::ListItem | DisplayRole::TableCell)
    }

    fn parse(value: &str) -> Self {
        let value = value.trim().trim_end_matches("!important").trim();
        match value.to_ascii_lowercase().as_str() {
            "block" => DisplayRole::Block,
            "list-item" => DisplayRole::ListItem,
            "table-cell" => DisplayRole::TableCell,
            "none" => DisplayRole::None,
            _ => DisplayRole::Other,
        }
    }
}

const UA_BLOCK_TAGS: &[&str] = &[
    "address", "article", "aside", "blockquote", "body", "center", "dd", "details", "dialog",
    "dir", "div", "dl", "dt", "fieldset", "figcaption", "figure", "footer", "form", "h1", "h2",
    "h3", "h4", "h5", "h6", "header", "hgroup", "hr", "html", "legend", "main", "menu", "nav",
    "ol", "p", "pre", "section", "summary", "ul",
];

/// Default display of a tag per the HTML user-agent stylesheet.
fn default_display(tag: &str) -> DisplayRole {
    match tag {
        "li" => DisplayRole::ListItem,
        "td" | "th" => DisplayRole::TableCell,
        "head" | "script" | "style" | "template" | "noscript" | "title" | "meta" | "link" => {
            DisplayRole::None
        }
        t if UA_BLOCK_TAGS.contains(&t) => DisplayRole::Block,
        _ => DisplayRole::Other,
    }
}

/// Value of the last `display` declaration in an inline style attribute.
fn inline_display(style: &str) -> Option<DisplayRole> {
    style
        .split(';')
        .filter_map(|decl| decl.split_once(':'))
        .filter(|(prop, _)| prop.trim().eq_ignore_ascii_case("display"))
        .map(|(_, value)| DisplayRole::parse(value))
        .last()
}

/// Resolved display role of `element`.
pub fn resolved_display(element: &ElementRef<'_>) -> DisplayRole {
    let el = element.value();
    if el.attr("hidden").is_some() {
        return DisplayRole::None;
    }
    el.attr("style")
        .and_then(inline_display)
        .unwrap_or_else(|| default_display(el.name()))
}
