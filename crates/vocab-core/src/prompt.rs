//! Prompt construction.

/// Placeholder used when the page context is absent or unrelated.
pub const CONTEXT_UNAVAILABLE: &str = "Not available";

/// Instruction text sent to the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    text: String,
    uses_context: bool,
}

impl Prompt {
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Whether the page context made it into the prompt.
    pub fn uses_context(&self) -> bool {
        self.uses_context
    }
}

impl std::fmt::Display for Prompt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

/// Build the definition prompt for `selected`.
///
/// `context` is only included when it is non-empty and actually contains the
/// selection; anything else is replaced with [`CONTEXT_UNAVAILABLE`].
pub fn build_prompt(selected: &str, context: &str) -> Prompt {
    let uses_context = !context.is_empty() && context.contains(selected);
    let context_line = if uses_context {
        format!("Context: \"{}\"", context)
    } else {
        format!("Context: {}", CONTEXT_UNAVAILABLE)
    };

    let text = format!(
        "You are a vocabulary assistant. Explain the selected text as it is used \
on the page the reader is looking at.

Selected Text: \"{selected}\"
{context_line}

Instructions:
- When context is available, give the meaning that fits that context, even if \
it differs from the most common meaning.
- When context is \"{unavailable}\", give the most common meaning.
- Answer in Markdown using exactly these three sections and nothing else:

### Definition
A concise definition of the selected text.

### Type
The part of speech or kind of expression (for example noun, verb, idiom).

### Examples
Two or three short example sentences using it in the same sense.",
        unavailable = CONTEXT_UNAVAILABLE,
    );

    Prompt { text, uses_context }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field_count(prompt: &Prompt, selected: &str) -> usize {
        prompt
            .as_str()
            .matches(&format!("Selected Text: \"{}\"", selected))
            .count()
    }

    #[test]
    fn test_context_used_when_it_contains_selection() {
        let prompt = build_prompt("ubiquitous", "Phones are ubiquitous today.");
        assert!(prompt.uses_context());
        assert!(prompt.as_str().contains("Context: \"Phones are ubiquitous today.\""));
        assert!(!prompt.as_str().contains("Context: Not available"));
    }

    #[test]
    fn test_unrelated_context_is_replaced() {
        let long = "A perfectly fine paragraph about something else. ".repeat(40);
        let prompt = build_prompt("ubiquitous", &long);
        assert!(!prompt.uses_context());
        assert!(prompt.as_str().contains("Context: Not available"));
        assert!(!prompt.as_str().contains("something else"));
    }

    #[test]
    fn test_empty_context_is_replaced() {
        let prompt = build_prompt("ubiquitous", "");
        assert!(!prompt.uses_context());
        assert!(prompt.as_str().contains("Context: Not available"));
    }

    #[test]
    fn test_containment_is_case_sensitive() {
        let prompt = build_prompt("Bank", "the river bank");
        assert!(!prompt.uses_context());
    }

    #[test]
    fn test_selection_appears_once_in_field() {
        let prompt = build_prompt("ubiquitous", "ubiquitous, so ubiquitous");
        assert_eq!(field_count(&prompt, "ubiquitous"), 1);
        assert_eq!(prompt.as_str().matches("Selected Text:").count(), 1);
    }

    #[test]
    fn test_deterministic() {
        let a = build_prompt("laconic", "a laconic reply");
        let b = build_prompt("laconic", "a laconic reply");
        assert_eq!(a, b);
    }

    #[test]
    fn test_requests_three_sections() {
        let prompt = build_prompt("laconic", "");
        let text = prompt.as_str();
        let def = text.find("### Definition").unwrap();
        let ty = text.find("### Type").unwrap();
        let ex = text.find("### Examples").unwrap();
        assert!(def < ty && ty < ex);
        assert!(text.contains("Markdown"));
    }
}
