//! Job domain types

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use uuid::Uuid;

use crate::domain::repository::{Repository, RepositoryReference};

/// Identifier of a scheduled lifecycle job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JobId(pub Uuid);

impl JobId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for JobId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Kind of lifecycle operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operation {
    Create,
    Delete,
    Clone,
    Open,
}

impl Operation {
    /// Whether the operation destroys remote state
    pub fn is_destructive(&self) -> bool {
        matches!(self, Operation::Delete)
    }

    /// Whether the operation can change the repository list
    pub fn mutates(&self) -> bool {
        matches!(self, Operation::Create | Operation::Delete)
    }

    /// Analytics event name reported for this operation
    pub fn event_name(&self) -> &'static str {
        match self {
            Operation::Create => "codecommit_createRepository",
            Operation::Delete => "codecommit_deleteRepository",
            Operation::Clone => "codecommit_cloneRepository",
            Operation::Open => "codecommit_openRepositoryEditor",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Operation::Create => "create",
            Operation::Delete => "delete",
            Operation::Clone => "clone",
            Operation::Open => "open",
        };
        f.write_str(s)
    }
}

/// Outcome reported to analytics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventResult {
    Succeeded,
    Failed,
    Canceled,
}

/// Value produced by a successful job
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobOutput {
    Created(Repository),
    Deleted { name: String },
    Cloned { name: String, destination: PathBuf },
    Opened(RepositoryReference),
}

/// Lifecycle job status
///
/// A job is `Pending` at submission and transitions exactly once to one of
/// the terminal states.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobStatus {
    Pending,
    Running,
    Succeeded(JobOutput),
    Failed { reason: String },
    Canceled,
}

impl JobStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            JobStatus::Succeeded(_) | JobStatus::Failed { .. } | JobStatus::Canceled
        )
    }

    /// Analytics outcome for a terminal status, `None` while still active
    pub fn event_result(&self) -> Option<EventResult> {
        match self {
            JobStatus::Succeeded(_) => Some(EventResult::Succeeded),
            JobStatus::Failed { .. } => Some(EventResult::Failed),
            JobStatus::Canceled => Some(EventResult::Canceled),
            JobStatus::Pending | JobStatus::Running => None,
        }
    }

    pub fn failed(reason: impl Into<String>) -> Self {
        JobStatus::Failed {
            reason: reason.into(),
        }
    }
}
