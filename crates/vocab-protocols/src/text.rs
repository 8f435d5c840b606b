//! Text helpers shared by the extractor and the orchestrator.

/// Truncate `text` to at most `limit` characters (Unicode scalar values).
pub fn truncate_chars(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((byte_idx, _)) => text[..byte_idx].to_string(),
        None => text.to_string(),
    }
}
