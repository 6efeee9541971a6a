//! Lifecycle error types

use codecommit_core::ValidationError;
use std::path::PathBuf;
use thiserror::Error;

/// A request was refused before a job was created
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LifecycleError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A delete for the same repository is still pending or running
    #[error("a delete of repository '{name}' is already in progress")]
    Conflict { name: String },
}

/// Clone failures, reported as the job's failure reason
#[derive(Debug, Error)]
pub enum CloneError {
    #[error("clone destination {0} is an existing file")]
    DestinationIsFile(PathBuf),

    #[error("clone destination {0} is not empty")]
    DestinationNotEmpty(PathBuf),

    #[error("cannot inspect clone destination {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot resolve remote URL: {0}")]
    RemoteUrl(String),

    #[error("failed to run '{program}': {source}")]
    ToolUnavailable {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("git clone exited with {}: {stderr}", describe_exit(.exit_code))]
    CloneFailed {
        exit_code: Option<i32>,
        stderr: String,
    },
}

fn describe_exit(exit_code: &Option<i32>) -> String {
    match exit_code {
        Some(code) => format!("status {}", code),
        None => "a signal".to_string(),
    }
}
