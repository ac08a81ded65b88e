//! Input validation applied before any gate, network or storage effect.

use crate::error::{EchoError, Result};

/// Checks a raw user message.
///
/// Rejects blank input and input longer than `max_chars` characters
/// (counted as Unicode scalar values, not bytes).
pub fn validate_message(text: &str, max_chars: usize) -> Result<()> {
    if text.trim().is_empty() {
        return Err(EchoError::validation("Message is required"));
    }
    if text.chars().count() > max_chars {
        return Err(EchoError::validation("Message is too long"));
    }
    Ok(())
}

/// Strips markup delimiters and surrounding whitespace from accepted input.
pub fn sanitize_message(text: &str) -> String {
    text.trim().chars().filter(|c| *c != '<' && *c != '>').collect()
}

/// True for scores in 1-5.
pub fn is_valid_score(value: u8) -> bool {
    (1..=5).contains(&value)
}

/// Validates a 1-5 score field.
pub fn validate_score(field: &str, value: u8) -> Result<()> {
    if is_valid_score(value) {
        Ok(())
    } else {
        Err(EchoError::validation(format!(
            "{} must be between 1 and 5 (got {})",
            field, value
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_blank_message() {
        assert!(validate_message("   ", 2000).unwrap_err().is_validation());
    }

    #[test]
    fn test_length_limit_counts_characters() {
        let exactly = "é".repeat(2000);
        assert!(validate_message(&exactly, 2000).is_ok());

        let over = "a".repeat(2001);
        let err = validate_message(&over, 2000).unwrap_err();
        assert_eq!(err, EchoError::validation("Message is too long"));
    }

    #[test]
    fn test_sanitize_strips_angle_brackets() {
        assert_eq!(sanitize_message("  <b>hi</b> "), "bhi/b");
    }

    #[test]
    fn test_score_bounds() {
        assert!(validate_score("mood", 1).is_ok());
        assert!(validate_score("mood", 5).is_ok());
        assert!(validate_score("mood", 0).is_err());
        assert!(validate_score("sleep", 6).is_err());
    }
}
