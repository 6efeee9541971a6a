//! Terminal presentation
//!
//! Rendering of repositories and job outcomes, and the refresh notifier
//! that tells the command loop to re-fetch the repository list.

use codecommit_core::domain::job::{JobOutput, JobStatus};
use codecommit_core::domain::repository::{Repository, RepositoryReference};
use codecommit_lifecycle::RefreshNotifier;
use colored::*;
use std::sync::atomic::{AtomicBool, Ordering};

/// Remembers that the repository list went stale
#[derive(Debug, Default)]
pub struct ViewRefresh {
    stale: AtomicBool,
}

impl ViewRefresh {
    /// Returns whether a refresh was requested, clearing the request
    pub fn take(&self) -> bool {
        self.stale.swap(false, Ordering::SeqCst)
    }
}

impl RefreshNotifier for ViewRefresh {
    fn notify_changed(&self) -> anyhow::Result<()> {
        self.stale.store(true, Ordering::SeqCst);
        Ok(())
    }
}

/// Print the repository list
pub fn print_repositories(repositories: &[Repository]) {
    if repositories.is_empty() {
        println!("{}", "No repositories found.".yellow());
        return;
    }

    println!(
        "{}",
        format!("Found {} repositories:", repositories.len()).bold()
    );
    println!();
    for repository in repositories {
        match &repository.id {
            Some(id) => println!(
                "  {} {} {}",
                "▸".cyan(),
                repository.display_name().bold(),
                id.dimmed()
            ),
            None => println!("  {} {}", "▸".cyan(), repository.display_name().bold()),
        }
    }
    println!();
}

/// Print an opened repository
pub fn print_reference(reference: &RepositoryReference) {
    let repository = &reference.repository;

    println!("{}", "Repository Details:".bold());
    println!("  Name:        {}", repository.name.cyan());
    if let Some(description) = &repository.description {
        println!("  Description: {}", description);
    }
    if let Some(id) = &repository.id {
        println!("  ID:          {}", id.dimmed());
    }
    if let Some(arn) = &repository.arn {
        println!("  ARN:         {}", arn.dimmed());
    }
    if let Some(account) = &reference.account_id {
        println!("  Account:     {}", account);
    }
    if let Some(created) = repository.created_at {
        println!("  Created:     {}", created.format("%Y-%m-%d %H:%M:%S"));
    }
    if let Some(url) = &repository.clone_url_http {
        println!("  HTTPS:       {}", url);
    }
    if let Some(url) = &repository.clone_url_ssh {
        println!("  SSH:         {}", url);
    }
    println!("  Endpoint:    {}", reference.endpoint.dimmed());
    println!("  Console:     {}", reference.console_url.underline());
}

/// Print the terminal status of a job
pub fn print_outcome(status: &JobStatus) {
    match status {
        JobStatus::Succeeded(output) => {
            let message = match output {
                JobOutput::Created(repository) => {
                    format!("Created repository {}", repository.name)
                }
                JobOutput::Deleted { name } => format!("Deleted repository {}", name),
                JobOutput::Cloned { name, destination } => {
                    format!("Cloned {} into {}", name, destination.display())
                }
                JobOutput::Opened(reference) => {
                    format!("Opened repository {}", reference.repository.name)
                }
            };
            println!("{} {}", "✓".green(), message);
        }
        JobStatus::Failed { reason } => {
            println!("{} {}", "✗".red(), reason.red());
        }
        JobStatus::Canceled => println!("{}", "Canceled.".yellow()),
        JobStatus::Pending | JobStatus::Running => {
            println!("{}", format!("{:?}", status).dimmed());
        }
    }
}
