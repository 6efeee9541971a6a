//! Job handles and records

use chrono::{DateTime, Utc};
use codecommit_core::domain::job::{JobId, JobStatus, Operation};
use tokio::sync::watch;

/// Caller's view of a submitted job
///
/// Cheap to clone. Dropping a handle does not cancel the job.
#[derive(Debug, Clone)]
pub struct JobHandle {
    pub(crate) id: JobId,
    pub(crate) operation: Operation,
    pub(crate) repository_name: String,
    pub(crate) status: watch::Receiver<JobStatus>,
    pub(crate) settled: watch::Receiver<bool>,
}

impl JobHandle {
    pub fn id(&self) -> JobId {
        self.id
    }

    pub fn operation(&self) -> Operation {
        self.operation
    }

    pub fn repository_name(&self) -> &str {
        &self.repository_name
    }

    /// Current status, without waiting
    pub fn status(&self) -> JobStatus {
        self.status.borrow().clone()
    }

    /// Waits until the job is terminal and its notifications went out
    pub async fn wait(&self) -> JobStatus {
        let mut settled = self.settled.clone();
        // An error means the scheduler is gone; report what we last saw
        let _ = settled.wait_for(|done| *done).await;
        self.status()
    }
}

/// Snapshot of a job kept by the scheduler
#[derive(Debug, Clone, PartialEq)]
pub struct JobRecord {
    pub id: JobId,
    pub operation: Operation,
    pub repository_name: String,
    pub status: JobStatus,
    pub submitted_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
}
