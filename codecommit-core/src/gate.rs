//! Confirmation gate for destructive operations
//!
//! A destructive action is only enabled once the user has typed the exact
//! name of the repository it targets. The comparison is byte-for-byte: no
//! trimming, no case folding. An empty expected value never confirms.

use crate::error::ValidationError;

/// Gate bound to the repository a destructive action targets
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmationGate {
    expected: String,
}

impl ConfirmationGate {
    /// Returns true iff `typed` is exactly `expected`
    ///
    /// Fails closed on an empty `expected`.
    pub fn validate(expected: &str, typed: &str) -> bool {
        !expected.is_empty() && expected.as_bytes() == typed.as_bytes()
    }

    /// Creates a gate for the given repository name
    pub fn for_repository(name: impl Into<String>) -> Self {
        Self {
            expected: name.into(),
        }
    }

    pub fn expected(&self) -> &str {
        &self.expected
    }

    /// Whether the destructive action may be enabled for this input
    pub fn is_satisfied_by(&self, typed: &str) -> bool {
        Self::validate(&self.expected, typed)
    }

    /// Like [`is_satisfied_by`](Self::is_satisfied_by) but returns a
    /// validation error on mismatch
    pub fn confirm(&self, typed: &str) -> Result<(), ValidationError> {
        if self.expected.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if !self.is_satisfied_by(typed) {
            return Err(ValidationError::ConfirmationMismatch {
                expected: self.expected.clone(),
            });
        }
        Ok(())
    }

    /// Warning shown before asking for confirmation
    pub fn warning(&self) -> String {
        format!(
            "Delete the repository {} permanently? This cannot be undone.",
            self.expected
        )
    }
}
