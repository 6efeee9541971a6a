//! Completion notifications
//!
//! Every terminal job status is reported once to the [`RefreshNotifier`]
//! and then once to the [`EventTracker`]. Failures and panics inside either
//! callback are logged and swallowed here.

use codecommit_core::domain::job::{EventResult, JobId, JobStatus, Operation};
use std::panic::{self, AssertUnwindSafe};
use tracing::{debug, error, info, warn};

/// Tells a presentation layer to re-fetch the repository list
pub trait RefreshNotifier: Send + Sync {
    fn notify_changed(&self) -> anyhow::Result<()>;
}

/// Fire-and-forget telemetry
///
/// Implementations must not block.
pub trait EventTracker: Send + Sync {
    fn track(&self, operation: Operation, outcome: EventResult);
}

/// Notifier for callers that render nothing
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopRefreshNotifier;

impl RefreshNotifier for NoopRefreshNotifier {
    fn notify_changed(&self) -> anyhow::Result<()> {
        Ok(())
    }
}

/// Emits one `tracing` event per tracked operation
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingEventTracker;

impl EventTracker for TracingEventTracker {
    fn track(&self, operation: Operation, outcome: EventResult) {
        info!(
            target: "codecommit::analytics",
            event = operation.event_name(),
            result = ?outcome,
            "Tracked {} operation",
            operation
        );
    }
}

/// Delivers the notifications of a terminal status, refresh first
pub(crate) fn deliver(
    notifier: &dyn RefreshNotifier,
    tracker: &dyn EventTracker,
    job_id: JobId,
    operation: Operation,
    status: &JobStatus,
) {
    let Some(outcome) = status.event_result() else {
        warn!("Job {} has no terminal status, skipping notifications", job_id);
        return;
    };

    match panic::catch_unwind(AssertUnwindSafe(|| notifier.notify_changed())) {
        Ok(Ok(())) => debug!("Refresh notified for job {}", job_id),
        Ok(Err(e)) => warn!("Refresh notifier failed for job {}: {:#}", job_id, e),
        Err(_) => error!("Refresh notifier panicked for job {}", job_id),
    }

    if panic::catch_unwind(AssertUnwindSafe(|| tracker.track(operation, outcome))).is_err() {
        error!("Event tracker panicked for job {}", job_id);
    }
}
