//! Repository DTOs

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::repository::Repository;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRepositoryInput {
    pub repository_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository_description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryNameInput {
    pub repository_name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListRepositoriesInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
}

/// Response of CreateRepository and GetRepository
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryMetadataOutput {
    pub repository_metadata: Option<RepositoryMetadata>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteRepositoryOutput {
    pub repository_id: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListRepositoriesOutput {
    #[serde(default)]
    pub repositories: Vec<RepositoryNameIdPair>,
    pub next_token: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryNameIdPair {
    pub repository_name: String,
    pub repository_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryMetadata {
    pub repository_name: String,
    pub repository_id: Option<String>,
    pub repository_description: Option<String>,
    pub account_id: Option<String>,
    pub default_branch: Option<String>,
    /// Seconds since the epoch
    pub creation_date: Option<f64>,
    pub clone_url_http: Option<String>,
    pub clone_url_ssh: Option<String>,
    #[serde(rename = "Arn")]
    pub arn: Option<String>,
}

/// Error body returned with non-2xx responses
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServiceErrorBody {
    #[serde(rename = "__type")]
    pub error_type: Option<String>,
    #[serde(alias = "Message")]
    pub message: Option<String>,
}

impl ServiceErrorBody {
    /// Error code without the namespace prefix
    /// (`com.amazonaws.codecommit#RepositoryNameExistsException` becomes
    /// `RepositoryNameExistsException`)
    pub fn code(&self) -> Option<&str> {
        self.error_type
            .as_deref()
            .map(|t| t.rsplit('#').next().unwrap_or(t))
    }
}

fn epoch_to_datetime(seconds: f64) -> Option<DateTime<Utc>> {
    let millis = (seconds * 1000.0).round() as i64;
    Utc.timestamp_millis_opt(millis).single()
}

impl From<RepositoryMetadata> for Repository {
    fn from(meta: RepositoryMetadata) -> Self {
        Repository {
            name: meta.repository_name,
            id: meta.repository_id,
            description: meta.repository_description,
            arn: meta.arn,
            account_id: meta.account_id,
            clone_url_http: meta.clone_url_http,
            clone_url_ssh: meta.clone_url_ssh,
            created_at: meta.creation_date.and_then(epoch_to_datetime),
        }
    }
}

impl From<RepositoryNameIdPair> for Repository {
    fn from(pair: RepositoryNameIdPair) -> Self {
        let mut repository = Repository::new(pair.repository_name, None);
        repository.id = pair.repository_id;
        repository
    }
}
