//! Validation errors
//!
//! Raised before a request is ever handed to the scheduler.

use thiserror::Error;

/// A request was rejected before scheduling
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("repository name is required")]
    EmptyName,

    #[error("repository name is {len} characters long (limit {max})")]
    NameTooLong { len: usize, max: usize },

    #[error("repository name '{name}' contains invalid character '{character}'")]
    InvalidNameCharacter { name: String, character: char },

    #[error("repository name '{name}' must not end with '.git'")]
    ReservedSuffix { name: String },

    #[error("repository description is {len} characters long (limit {max})")]
    DescriptionTooLong { len: usize, max: usize },

    #[error("confirmation does not match repository name '{expected}'")]
    ConfirmationMismatch { expected: String },

    #[error("invalid clone destination: {0}")]
    InvalidDestination(String),

    #[error("invalid region: '{0}'")]
    InvalidRegion(String),
}
