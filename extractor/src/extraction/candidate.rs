//! Isolating a JSON object from free-form model text.
//!
//! This is a text heuristic, not a tokenizer. It handles a single object
//! wrapped in prose or markdown fences. A response holding several sibling
//! objects comes back as one span from the first `{` to the last `}`, which
//! will not parse; which object was meant is left unresolved.

/// Returns the substring most likely to be the JSON object.
///
/// 1. Trim. If the text already starts with `{` and ends with `}`, return it.
/// 2. Otherwise return the span from the first `{` to the last `}` after it.
/// 3. With no such span, return the trimmed text; parsing will then fail.
///
/// # Examples
///
/// ```
/// use opsnotes_extractor::extraction::extract_candidate;
///
/// assert_eq!(extract_candidate("prefix text {\"a\":1} suffix"), "{\"a\":1}");
/// assert_eq!(extract_candidate("no braces here"), "no braces here");
/// ```
#[must_use]
pub fn extract_candidate(raw: &str) -> &str {
    let text = raw.trim();
    if text.starts_with('{') && text.ends_with('}') {
        return text;
    }

    match (text.find('{'), text.rfind('}')) {
        (Some(start), Some(end)) if start < end => &text[start..=end],
        _ => text,
    }
}
