//! Repository actions of the HTTP client

use async_trait::async_trait;
use codecommit_core::domain::repository::Repository;
use codecommit_core::dto::repository::{
    CreateRepositoryInput, DeleteRepositoryOutput, ListRepositoriesInput, ListRepositoriesOutput,
    RepositoryMetadataOutput, RepositoryNameInput,
};
use tracing::{debug, info};

use crate::CodeCommitClient;
use crate::client::RepositoryClient;
use crate::error::{ClientError, Result};

#[async_trait]
impl RepositoryClient for CodeCommitClient {
    async fn create(&self, name: &str, description: Option<&str>) -> Result<Repository> {
        let input = CreateRepositoryInput {
            repository_name: name.to_string(),
            repository_description: description.map(str::to_string),
        };
        let output: RepositoryMetadataOutput = self.call("CreateRepository", &input).await?;

        info!("Created repository {}", name);

        // Older endpoints omit the metadata on create
        Ok(output
            .repository_metadata
            .map(Repository::from)
            .unwrap_or_else(|| Repository::new(name, input.repository_description)))
    }

    async fn delete(&self, name: &str) -> Result<()> {
        let input = RepositoryNameInput {
            repository_name: name.to_string(),
        };
        let output: DeleteRepositoryOutput = self.call("DeleteRepository", &input).await?;

        // The service answers without an id when the repository was already gone
        match output.repository_id {
            Some(id) => info!("Deleted repository {} ({})", name, id),
            None => info!("Repository {} did not exist", name),
        }
        Ok(())
    }

    async fn describe(&self, name: &str) -> Result<Repository> {
        let input = RepositoryNameInput {
            repository_name: name.to_string(),
        };
        let output: RepositoryMetadataOutput = self.call("GetRepository", &input).await?;

        output
            .repository_metadata
            .map(Repository::from)
            .ok_or_else(|| ClientError::NotFound(name.to_string()))
    }

    async fn list(&self) -> Result<Vec<Repository>> {
        let mut repositories = Vec::new();
        let mut input = ListRepositoriesInput::default();

        loop {
            let page: ListRepositoriesOutput = self.call("ListRepositories", &input).await?;
            debug!("Listed {} repositories", page.repositories.len());

            repositories.extend(page.repositories.into_iter().map(Repository::from));

            match page.next_token {
                Some(token) if !token.is_empty() => input.next_token = Some(token),
                _ => break,
            }
        }

        Ok(repositories)
    }
}
