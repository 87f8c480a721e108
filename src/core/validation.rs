//! Input validation run before a message is accepted.

use std::fmt;

/// Longest accepted message, counted in characters.
pub const MAX_MESSAGE_CHARS: usize = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// Nothing but whitespace.
    Empty,
    /// More than [`MAX_MESSAGE_CHARS`] characters.
    TooLong,
}

impl ValidationError {
    /// Text shown in the error banner.
    pub fn user_message(&self) -> &'static str {
        match self {
            ValidationError::Empty => "Message cannot be empty.",
            ValidationError::TooLong => "Your message is too long. Please shorten it.",
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.user_message())
    }
}

impl std::error::Error for ValidationError {}

/// Checks a candidate message. Length is checked before emptiness.
pub fn validate(input: &str) -> Result<(), ValidationError> {
    if input.chars().count() > MAX_MESSAGE_CHARS {
        return Err(ValidationError::TooLong);
    }
    if input.trim().is_empty() {
        return Err(ValidationError::Empty);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_inputs_are_empty() {
        for input in ["", " ", "\n", "\t  \n "] {
            assert_eq!(validate(input), Err(ValidationError::Empty), "{input:?}");
        }
    }

    #[test]
    fn test_length_boundary() {
        assert_eq!(validate(&"a".repeat(MAX_MESSAGE_CHARS)), Ok(()));
        assert_eq!(
            validate(&"a".repeat(MAX_MESSAGE_CHARS + 1)),
            Err(ValidationError::TooLong)
        );
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        // 1000 two-byte characters is still within the limit
        let persian = "س".repeat(MAX_MESSAGE_CHARS);
        assert!(persian.len() > MAX_MESSAGE_CHARS);
        assert_eq!(validate(&persian), Ok(()));
    }

    #[test]
    fn test_long_whitespace_reports_too_long() {
        let spaces = " ".repeat(MAX_MESSAGE_CHARS + 1);
        assert_eq!(validate(&spaces), Err(ValidationError::TooLong));
    }

    #[test]
    fn test_validation_is_repeatable() {
        let long = "x".repeat(1001);
        for input in ["hi", "", long.as_str()] {
            assert_eq!(validate(input), validate(input));
        }
    }

    #[test]
    fn test_display_uses_user_message() {
        assert_eq!(ValidationError::Empty.to_string(), "Message cannot be empty.");
        assert_eq!(
            ValidationError::TooLong.to_string(),
            "Your message is too long. Please shorten it."
        );
    }
}
