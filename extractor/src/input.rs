//! Admission rules applied by request layers before calling the pipeline.
//!
//! The pipeline itself accepts any text; out-of-bound input is the request
//! layer's job to reject.

use thiserror::Error;

/// Largest notes payload, in characters.
pub const MAX_NOTES_CHARS: usize = 20_000;

/// Why notes were refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    /// Nothing but whitespace.
    #[error("Notes text may not be blank.")]
    Empty,

    /// Over [`MAX_NOTES_CHARS`].
    #[error("Notes text has {chars} characters; the limit is {max}.")]
    TooLong {
        /// Characters received.
        chars: usize,
        /// The limit.
        max: usize,
    },
}

/// Checks notes against the admission rules and hands them back unchanged.
pub fn admit(text: &str) -> Result<&str, InputError> {
    if text.trim().is_empty() {
        return Err(InputError::Empty);
    }

    let chars = text.chars().count();
    if chars > MAX_NOTES_CHARS {
        return Err(InputError::TooLong {
            chars,
            max: MAX_NOTES_CHARS,
        });
    }

    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_rejected() {
        assert_eq!(admit(""), Err(InputError::Empty));
        assert_eq!(admit(" \n\t "), Err(InputError::Empty));
    }

    #[test]
    fn test_limit_counts_characters_not_bytes() {
        let at_limit = "é".repeat(MAX_NOTES_CHARS);
        assert_eq!(admit(&at_limit), Ok(at_limit.as_str()));

        let over = "a".repeat(MAX_NOTES_CHARS + 1);
        assert_eq!(
            admit(&over),
            Err(InputError::TooLong {
                chars: MAX_NOTES_CHARS + 1,
                max: MAX_NOTES_CHARS
            })
        );
    }

    #[test]
    fn test_text_is_not_trimmed() {
        assert_eq!(admit("  standup notes \n"), Ok("  standup notes \n"));
    }
}
