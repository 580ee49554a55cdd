//! Assertion primitives available to harness predicates.

use thiserror::Error;

/// A failed assertion inside one test case.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct AssertionError {
    pub message: String,
}

impl AssertionError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Result type returned by harness predicates.
pub type AssertionResult = Result<(), AssertionError>;

/// Fail with `message` when `condition` is false.
pub fn ensure(condition: bool, message: impl Into<String>) -> AssertionResult {
    if condition {
        Ok(())
    } else {
        Err(AssertionError::new(message))
    }
}

/// Fail with `message` unless `haystack` contains `needle`.
pub fn ensure_contains(
    haystack: &str,
    needle: &str,
    message: impl Into<String>,
) -> AssertionResult {
    ensure(haystack.contains(needle), message)
}
