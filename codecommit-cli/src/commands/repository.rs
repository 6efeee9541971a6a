//! Repository command handlers
//!
//! Every lifecycle command validates its request up front, schedules it and
//! waits for the outcome. Ctrl-C cancels the running job.

use anyhow::{Context, Result};
use codecommit_client::{CodeCommitClient, RepositoryClient};
use codecommit_core::ConfirmationGate;
use codecommit_core::domain::job::{EventResult, JobOutput, JobStatus};
use codecommit_core::domain::request::LifecycleRequest;
use codecommit_lifecycle::{
    Config, EventTracker, JobHandle, JobScheduler, LifecycleError, ProcessGitCloner,
    TracingEventTracker,
};
use colored::*;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::view::{self, ViewRefresh};

/// Everything a lifecycle command needs
struct App {
    client: Arc<CodeCommitClient>,
    scheduler: JobScheduler,
    refresh: Arc<ViewRefresh>,
    tracker: Arc<dyn EventTracker>,
}

impl App {
    fn new(config: Config) -> Self {
        let client = Arc::new(CodeCommitClient::new(config.service_endpoint()));
        let refresh = Arc::new(ViewRefresh::default());
        let tracker: Arc<dyn EventTracker> = Arc::new(TracingEventTracker);

        let scheduler = JobScheduler::builder(client.clone(), config)
            .notifier(refresh.clone())
            .tracker(tracker.clone())
            .build();

        Self {
            client,
            scheduler,
            refresh,
            tracker,
        }
    }

    /// Schedules a request and waits for its outcome
    async fn run(&self, request: LifecycleRequest, progress: &str) -> Result<JobStatus> {
        let operation = request.operation();
        let handle = submit_or_track(&self.scheduler, self.tracker.as_ref(), request)?;

        println!("{}", progress.dimmed());

        let status = tokio::select! {
            status = handle.wait() => status,
            _ = tokio::signal::ctrl_c() => {
                if self.scheduler.cancel(handle.id()) {
                    println!("{}", "Canceling...".yellow());
                }
                handle.wait().await
            }
        };

        view::print_outcome(&status);

        if operation.mutates() && self.refresh.take() {
            debug!("Repository list changed, refreshing");
            match self.client.list().await {
                Ok(mut repositories) => {
                    repositories.sort_by(|a, b| a.name.cmp(&b.name));
                    println!();
                    view::print_repositories(&repositories);
                }
                Err(e) => warn!("Failed to refresh repository list: {}", e),
            }
        }

        Ok(status)
    }
}

/// Submits `request`, reporting a validation failure to `tracker`
///
/// A request that fails validation is tracked once as canceled, since
/// nothing was ever attempted. No job is created and no refresh happens.
fn submit_or_track(
    scheduler: &JobScheduler,
    tracker: &dyn EventTracker,
    request: LifecycleRequest,
) -> Result<JobHandle, LifecycleError> {
    let operation = request.operation();

    match scheduler.submit_request(request) {
        Err(e @ LifecycleError::Validation(_)) => {
            tracker.track(operation, EventResult::Canceled);
            Err(e)
        }
        result => result,
    }
}

/// Turns a terminal status into the command's result
fn finish(status: JobStatus) -> Result<()> {
    match status {
        JobStatus::Succeeded(_) => Ok(()),
        JobStatus::Failed { reason } => anyhow::bail!(reason),
        JobStatus::Canceled => anyhow::bail!("operation canceled"),
        JobStatus::Pending | JobStatus::Running => anyhow::bail!("operation did not finish"),
    }
}

/// List all repositories
pub async fn list(config: &Config) -> Result<()> {
    let client = CodeCommitClient::new(config.service_endpoint());
    let mut repositories = client
        .list()
        .await
        .context("Failed to list repositories")?;
    repositories.sort_by(|a, b| a.name.cmp(&b.name));

    view::print_repositories(&repositories);
    Ok(())
}

/// Create a repository
pub async fn create(config: Config, name: String, description: Option<String>) -> Result<()> {
    let app = App::new(config);
    let status = app
        .run(
            LifecycleRequest::create(name, description),
            "Creating Repository...",
        )
        .await?;
    finish(status)
}

/// Delete a repository after the user typed its name
pub async fn delete(config: Config, name: String, confirm: Option<String>) -> Result<()> {
    let app = App::new(config);

    let confirmation = match confirm {
        Some(confirmation) => confirmation,
        None => prompt_confirmation(&ConfirmationGate::for_repository(name.as_str()))?,
    };

    let status = app
        .run(
            LifecycleRequest::delete(name, confirmation),
            "Deleting Repository...",
        )
        .await?;
    finish(status)
}

/// Clone a repository into a local directory
pub async fn clone(config: Config, name: String, destination: Option<PathBuf>) -> Result<()> {
    let git = ProcessGitCloner::new(config.git_program.clone());
    git.check_available()
        .await
        .context("git is required to clone repositories")?;

    let app = App::new(config);
    let destination = destination.unwrap_or_else(|| PathBuf::from(&name));
    let status = app
        .run(
            LifecycleRequest::clone_to(name, destination),
            "Cloning Repository...",
        )
        .await?;
    finish(status)
}

/// Show a repository's details
pub async fn open(config: Config, name: String, json: bool) -> Result<()> {
    let app = App::new(config);
    let status = app
        .run(LifecycleRequest::open(name), "Opening Repository...")
        .await?;

    if let JobStatus::Succeeded(JobOutput::Opened(reference)) = &status {
        if json {
            println!("{}", serde_json::to_string_pretty(reference)?);
        } else {
            println!();
            view::print_reference(reference);
        }
    }
    finish(status)
}

/// Ask for the repository name on stdin
///
/// Only the line terminator is stripped; the gate compares the rest as typed.
fn prompt_confirmation(gate: &ConfirmationGate) -> Result<String> {
    println!("{}", gate.warning().yellow().bold());
    print!("Type the name of the repository to confirm deletion: ");
    std::io::stdout().flush()?;

    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read confirmation")?;

    Ok(strip_line_ending(&line).to_string())
}

fn strip_line_ending(line: &str) -> &str {
    line.strip_suffix("\r\n")
        .or_else(|| line.strip_suffix('\n'))
        .unwrap_or(line)
}
