//! Lifecycle jobs
//!
//! A job performs one operation against the repository service (or the git
//! collaborator for clones) and turns the outcome into a terminal
//! [`JobStatus`]. Remote errors are never retried here.

use codecommit_client::{ClientError, RepositoryClient};
use codecommit_core::domain::job::{JobId, JobOutput, JobStatus, Operation};
use codecommit_core::domain::repository::RepositoryReference;
use codecommit_core::domain::request::{LifecycleRequest, ValidatedRequest, validate_new_name};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::error::CloneError;
use crate::git::{GitCloner, check_destination};

/// Collaborators a job runs against
#[derive(Clone)]
pub struct JobContext {
    pub client: Arc<dyn RepositoryClient>,
    pub cloner: Arc<dyn GitCloner>,
    pub config: Arc<Config>,
}

/// One lifecycle operation waiting to run
#[derive(Debug, Clone)]
pub struct LifecycleJob {
    id: JobId,
    request: ValidatedRequest,
}

impl LifecycleJob {
    pub fn new(id: JobId, request: ValidatedRequest) -> Self {
        Self { id, request }
    }

    pub fn id(&self) -> JobId {
        self.id
    }

    pub fn operation(&self) -> Operation {
        self.request.operation()
    }

    pub fn repository_name(&self) -> &str {
        self.request.repository_name()
    }

    /// Runs the operation to a terminal status
    pub async fn run(self, ctx: JobContext) -> JobStatus {
        let id = self.id;
        let operation = self.operation();
        info!("Job {} running {} of '{}'", id, operation, self.repository_name());

        let result: Result<JobOutput, JobFailure> = match self.request.into_inner() {
            LifecycleRequest::Create { name, description } => ctx
                .client
                .create(&name, description.as_deref())
                .await
                .map(JobOutput::Created)
                .map_err(JobFailure::from),
            LifecycleRequest::Delete { name, .. } => {
                let deleted = ctx.client.delete(&name).await;
                deleted
                    .map(|()| JobOutput::Deleted { name })
                    .map_err(JobFailure::from)
            }
            LifecycleRequest::Clone { name, destination } => {
                let cloned = clone(&ctx, &name, &destination).await;
                cloned
                    .map(|destination| JobOutput::Cloned { name, destination })
                    .map_err(JobFailure::from)
            }
            LifecycleRequest::Open { name } => open(&ctx, &name)
                .await
                .map(JobOutput::Opened)
                .map_err(JobFailure::from),
        };

        match result {
            Ok(output) => {
                info!("Job {} ({}) succeeded", id, operation);
                JobStatus::Succeeded(output)
            }
            Err(failure) => {
                let reason = failure.to_string();
                match failure.severity() {
                    Severity::Rejected => {
                        info!("Job {} ({}) rejected by the service: {}", id, operation, reason)
                    }
                    Severity::Fault => {
                        error!("Job {} ({}) hit a service fault: {}", id, operation, reason)
                    }
                    Severity::Failed => warn!("Job {} ({}) failed: {}", id, operation, reason),
                }
                JobStatus::Failed { reason }
            }
        }
    }
}

/// Why a job failed; the `Display` text becomes the failure reason
#[derive(Debug, Error)]
enum JobFailure {
    #[error(transparent)]
    Service(#[from] ClientError),

    #[error(transparent)]
    Clone(#[from] CloneError),
}

/// Log level class of a failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Severity {
    /// The service refused the request (4xx)
    Rejected,
    /// The service itself failed (5xx)
    Fault,
    Failed,
}

impl JobFailure {
    fn severity(&self) -> Severity {
        match self {
            Self::Service(e) if e.is_server_error() => Severity::Fault,
            Self::Service(e) if e.is_client_error() => Severity::Rejected,
            _ => Severity::Failed,
        }
    }
}

/// Resolves the remote and destination, then hands off to git
async fn clone(ctx: &JobContext, name: &str, destination: &Path) -> Result<PathBuf, CloneError> {
    validate_new_name(name).map_err(|e| CloneError::RemoteUrl(e.to_string()))?;
    let remote_url = ctx
        .config
        .region
        .remote_url(ctx.config.clone_protocol, name);

    let destination = ctx.config.resolve_destination(destination);
    check_destination(&destination).await?;

    ctx.cloner
        .clone_repository(&remote_url, &destination)
        .await?;

    Ok(destination)
}

/// Resolves metadata and endpoint for a presentation layer
async fn open(
    ctx: &JobContext,
    name: &str,
) -> Result<RepositoryReference, ClientError> {
    let repository = ctx.client.describe(name).await?;
    let account_id = repository
        .account_id
        .clone()
        .or_else(|| ctx.config.account_id.clone());

    Ok(RepositoryReference {
        console_url: ctx.config.region.console_url(&repository.name),
        endpoint: ctx.config.service_endpoint(),
        account_id,
        repository,
    })
}
