//! Repository service contract

use async_trait::async_trait;
use codecommit_core::domain::repository::Repository;

use crate::error::Result;

/// Remote repository service
///
/// Implementations own their network timeout and retry policy. The
/// lifecycle core calls each method at most once per job.
#[async_trait]
pub trait RepositoryClient: Send + Sync {
    /// Create a repository
    async fn create(&self, name: &str, description: Option<&str>) -> Result<Repository>;

    /// Delete a repository
    async fn delete(&self, name: &str) -> Result<()>;

    /// Fetch a repository's metadata
    async fn describe(&self, name: &str) -> Result<Repository>;

    /// List all repositories visible to the caller
    async fn list(&self) -> Result<Vec<Repository>>;
}
