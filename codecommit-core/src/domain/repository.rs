//! Repository domain types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Maximum length of a repository name
pub const MAX_NAME_LEN: usize = 100;

/// Maximum length of a repository description
pub const MAX_DESCRIPTION_LEN: usize = 1000;

/// A named remote code repository
///
/// The name is unique within an account and region. Everything besides
/// `name` is filled in by the remote service and may be absent on values
/// built locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    pub name: String,
    pub id: Option<String>,
    pub description: Option<String>,
    pub arn: Option<String>,
    pub account_id: Option<String>,
    pub clone_url_http: Option<String>,
    pub clone_url_ssh: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

impl Repository {
    /// Creates a repository value with only a name and description
    pub fn new(name: impl Into<String>, description: Option<String>) -> Self {
        Self {
            name: name.into(),
            id: None,
            description,
            arn: None,
            account_id: None,
            clone_url_http: None,
            clone_url_ssh: None,
            created_at: None,
        }
    }

    /// Name shown to users
    pub fn display_name(&self) -> &str {
        &self.name
    }
}

/// Reference to a repository for a presentation layer to render
///
/// Produced by the Open operation. Never implies any mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryReference {
    pub repository: Repository,
    /// Service endpoint the repository was resolved against
    pub endpoint: String,
    pub account_id: Option<String>,
    pub console_url: String,
}
