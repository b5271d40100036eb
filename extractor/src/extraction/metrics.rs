//! Metrics tracking and token estimation for extraction runs.

use std::time::Duration;

/// Metrics collected during one pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractionMetrics {
    /// Model calls made (1 or 2).
    pub total_attempts: usize,
    /// Wall-clock time for the run.
    pub wall_time: Duration,
    /// Estimated tokens sent across all calls.
    pub estimated_input_tokens: usize,
    /// Estimated tokens received across all calls.
    pub estimated_output_tokens: usize,
}

/// Characters per estimated token.
pub const CHARS_PER_TOKEN: usize = 4;

/// Token estimate for a character count, rounded up.
#[must_use]
pub const fn tokens_for_chars(chars: usize) -> usize {
    chars.div_ceil(CHARS_PER_TOKEN)
}

/// Estimate token count using the 4-chars-per-token heuristic.
///
/// Counts characters, not bytes, and rounds up.
///
/// # Examples
///
/// ```
/// use opsnotes_extractor::extraction::estimate_tokens;
///
/// assert_eq!(estimate_tokens("hello"), 2);
/// assert_eq!(estimate_tokens(""), 0);
/// ```
#[must_use]
pub fn estimate_tokens(text: &str) -> usize {
    tokens_for_chars(text.chars().count())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_estimate_tokens_counts_chars() {
        assert_eq!(estimate_tokens("abcd"), 1);
        assert_eq!(estimate_tokens("abcde"), 2);
        // 6 bytes, 2 chars
        assert_eq!(estimate_tokens("你好"), 1);
    }

    #[test]
    fn test_tokens_for_chars_rounds_up() {
        assert_eq!(tokens_for_chars(0), 0);
        assert_eq!(tokens_for_chars(1), 1);
        assert_eq!(tokens_for_chars(8), 2);
        assert_eq!(tokens_for_chars(9), 3);
    }
}
