// Input validation - pure functions, no console I/O
//
// The interactive layer reads raw lines and calls into here; everything in
// this module is unit-testable without a terminal. Invalid answers are
// retried by the caller up to MAX_INPUT_ATTEMPTS, then the operation is
// aborted instead of looping (or recursing) forever.

use std::fmt;

/// How many consecutive invalid answers a prompt tolerates before the
/// current operation is aborted.
pub const MAX_INPUT_ATTEMPTS: usize = 3;

// ============================================================================
// ERROR TYPE
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidInputError {
    /// Nothing was entered.
    Empty,

    /// The answer is not one of the allowed options.
    NotAnOption { given: String, allowed: Vec<String> },

    /// The answer is not a whole number.
    NotANumber { given: String },

    /// The 1-based index is outside the collection.
    OutOfRange { given: usize, len: usize },

    /// Too many invalid answers in a row; the operation was abandoned.
    AttemptsExhausted { attempts: usize },
}

impl fmt::Display for InvalidInputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidInputError::Empty => write!(f, "no input given"),
            InvalidInputError::NotAnOption { given, allowed } => {
                write!(f, "'{}' is not one of: {}", given, allowed.join(", "))
            }
            InvalidInputError::NotANumber { given } => {
                write!(f, "'{}' is not a number", given)
            }
            InvalidInputError::OutOfRange { given, len } => {
                write!(f, "{} is out of range (1-{})", given, len)
            }
            InvalidInputError::AttemptsExhausted { attempts } => {
                write!(f, "gave up after {} invalid answers", attempts)
            }
        }
    }
}

impl std::error::Error for InvalidInputError {}

// ============================================================================
// VALIDATORS
// ============================================================================

/// Validate an answer against an allowed option set.
///
/// Matching is case-insensitive; the canonical (lowercase) option string is
/// returned so downstream parsing never sees mixed case.
pub fn validate_choice(raw: &str, allowed: &[&str]) -> Result<String, InvalidInputError> {
    let answer = raw.trim();
    if answer.is_empty() {
        return Err(InvalidInputError::Empty);
    }

    let lowered = answer.to_lowercase();
    if allowed.iter().any(|option| *option == lowered) {
        Ok(lowered)
    } else {
        Err(InvalidInputError::NotAnOption {
            given: answer.to_string(),
            allowed: allowed.iter().map(|s| s.to_string()).collect(),
        })
    }
}

/// Validate a 1-based index against a collection of `len` items.
///
/// Returns the validated 1-based index. Out-of-range answers are invalid
/// input, not a panic.
pub fn validate_index(raw: &str, len: usize) -> Result<usize, InvalidInputError> {
    let answer = raw.trim();
    if answer.is_empty() {
        return Err(InvalidInputError::Empty);
    }

    let index: usize = answer.parse().map_err(|_| InvalidInputError::NotANumber {
        given: answer.to_string(),
    })?;

    if index == 0 || index > len {
        return Err(InvalidInputError::OutOfRange { given: index, len });
    }

    Ok(index)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_choice_accepts_exact_option() {
        let result = validate_choice("coin", &["coin", "ensuite", "none"]);
        assert_eq!(result.unwrap(), "coin");
    }

    #[test]
    fn test_validate_choice_is_case_insensitive() {
        let result = validate_choice("  ENSUITE ", &["coin", "ensuite", "none"]);
        assert_eq!(result.unwrap(), "ensuite");
    }

    #[test]
    fn test_validate_choice_rejects_unknown_option() {
        let result = validate_choice("washer", &["coin", "ensuite", "none"]);
        match result.unwrap_err() {
            InvalidInputError::NotAnOption { given, allowed } => {
                assert_eq!(given, "washer");
                assert_eq!(allowed, vec!["coin", "ensuite", "none"]);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_validate_choice_rejects_empty() {
        assert_eq!(
            validate_choice("   ", &["yes", "no"]),
            Err(InvalidInputError::Empty)
        );
    }

    #[test]
    fn test_validate_index_accepts_in_range() {
        assert_eq!(validate_index("1", 3).unwrap(), 1);
        assert_eq!(validate_index(" 3 ", 3).unwrap(), 3);
    }

    #[test]
    fn test_validate_index_rejects_zero_and_past_end() {
        assert_eq!(
            validate_index("0", 3),
            Err(InvalidInputError::OutOfRange { given: 0, len: 3 })
        );
        assert_eq!(
            validate_index("4", 3),
            Err(InvalidInputError::OutOfRange { given: 4, len: 3 })
        );
    }

    #[test]
    fn test_validate_index_rejects_non_numeric() {
        match validate_index("two", 3).unwrap_err() {
            InvalidInputError::NotANumber { given } => assert_eq!(given, "two"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_validate_index_rejects_empty() {
        assert_eq!(validate_index("", 3), Err(InvalidInputError::Empty));
    }

    #[test]
    fn test_error_messages_are_operator_friendly() {
        let err = InvalidInputError::NotAnOption {
            given: "condo".to_string(),
            allowed: vec!["house".to_string(), "apartment".to_string()],
        };
        assert_eq!(err.to_string(), "'condo' is not one of: house, apartment");

        let err = InvalidInputError::OutOfRange { given: 9, len: 2 };
        assert_eq!(err.to_string(), "9 is out of range (1-2)");
    }
}
