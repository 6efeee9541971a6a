//! Lifecycle requests
//!
//! A request has to be validated into a [`ValidatedRequest`] before it can be
//! scheduled, which is what keeps an unconfirmed delete from ever reaching
//! the remote service.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::domain::job::Operation;
use crate::domain::repository::{MAX_DESCRIPTION_LEN, MAX_NAME_LEN};
use crate::error::ValidationError;
use crate::gate::ConfirmationGate;

/// Request for one lifecycle operation on a repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LifecycleRequest {
    Create {
        name: String,
        description: Option<String>,
    },
    Delete {
        name: String,
        /// Text typed by the user, must equal `name` exactly
        confirmation: String,
    },
    Clone {
        name: String,
        destination: PathBuf,
    },
    Open {
        name: String,
    },
}

impl LifecycleRequest {
    pub fn create(name: impl Into<String>, description: Option<String>) -> Self {
        LifecycleRequest::Create {
            name: name.into(),
            description,
        }
    }

    pub fn delete(name: impl Into<String>, confirmation: impl Into<String>) -> Self {
        LifecycleRequest::Delete {
            name: name.into(),
            confirmation: confirmation.into(),
        }
    }

    pub fn clone_to(name: impl Into<String>, destination: impl Into<PathBuf>) -> Self {
        LifecycleRequest::Clone {
            name: name.into(),
            destination: destination.into(),
        }
    }

    pub fn open(name: impl Into<String>) -> Self {
        LifecycleRequest::Open { name: name.into() }
    }

    pub fn operation(&self) -> Operation {
        match self {
            LifecycleRequest::Create { .. } => Operation::Create,
            LifecycleRequest::Delete { .. } => Operation::Delete,
            LifecycleRequest::Clone { .. } => Operation::Clone,
            LifecycleRequest::Open { .. } => Operation::Open,
        }
    }

    pub fn repository_name(&self) -> &str {
        match self {
            LifecycleRequest::Create { name, .. }
            | LifecycleRequest::Delete { name, .. }
            | LifecycleRequest::Clone { name, .. }
            | LifecycleRequest::Open { name } => name,
        }
    }

    /// Validates the request so it can be scheduled
    pub fn validate(self) -> Result<ValidatedRequest, ValidationError> {
        match self {
            LifecycleRequest::Create { name, description } => {
                validate_new_name(&name)?;
                let description = description.filter(|d| !d.is_empty());
                if let Some(description) = &description {
                    let len = description.chars().count();
                    if len > MAX_DESCRIPTION_LEN {
                        return Err(ValidationError::DescriptionTooLong {
                            len,
                            max: MAX_DESCRIPTION_LEN,
                        });
                    }
                }
                Ok(ValidatedRequest(LifecycleRequest::Create { name, description }))
            }
            LifecycleRequest::Delete { name, confirmation } => {
                ConfirmationGate::for_repository(name.as_str()).confirm(&confirmation)?;
                Ok(ValidatedRequest(LifecycleRequest::Delete { name, confirmation }))
            }
            LifecycleRequest::Clone { name, destination } => {
                require_name(&name)?;
                if destination.as_os_str().is_empty() {
                    return Err(ValidationError::InvalidDestination(
                        "destination path is empty".to_string(),
                    ));
                }
                Ok(ValidatedRequest(LifecycleRequest::Clone { name, destination }))
            }
            LifecycleRequest::Open { name } => {
                require_name(&name)?;
                Ok(ValidatedRequest(LifecycleRequest::Open { name }))
            }
        }
    }
}

/// A request that passed validation
///
/// Only obtainable through [`LifecycleRequest::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedRequest(LifecycleRequest);

impl ValidatedRequest {
    pub fn request(&self) -> &LifecycleRequest {
        &self.0
    }

    pub fn into_inner(self) -> LifecycleRequest {
        self.0
    }

    pub fn operation(&self) -> Operation {
        self.0.operation()
    }

    pub fn repository_name(&self) -> &str {
        self.0.repository_name()
    }
}

fn require_name(name: &str) -> Result<(), ValidationError> {
    if name.is_empty() {
        return Err(ValidationError::EmptyName);
    }
    Ok(())
}

/// Naming rules for a repository about to be created
pub fn validate_new_name(name: &str) -> Result<(), ValidationError> {
    require_name(name)?;

    let len = name.chars().count();
    if len > MAX_NAME_LEN {
        return Err(ValidationError::NameTooLong {
            len,
            max: MAX_NAME_LEN,
        });
    }

    if let Some(character) = name
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-')))
    {
        return Err(ValidationError::InvalidNameCharacter {
            name: name.to_string(),
            character,
        });
    }

    if name.ends_with(".git") {
        return Err(ValidationError::ReservedSuffix {
            name: name.to_string(),
        });
    }

    Ok(())
}
