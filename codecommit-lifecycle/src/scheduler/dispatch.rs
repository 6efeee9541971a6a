//! Job scheduler
//!
//! Each submitted job gets its own task. A semaphore bounds how many run at
//! once; the rest stay `Pending` until a permit frees up. Deletes are
//! serialized per repository name by refusing a second one while the first
//! is still in flight.
//!
//! Cancellation marks the job `Canceled` right away. A job that has not
//! started never reaches the client. A running job has its task aborted,
//! which drops the in-flight call without undoing anything the service
//! already committed.

use chrono::{DateTime, Utc};
use codecommit_client::RepositoryClient;
use codecommit_core::domain::job::{JobId, JobStatus, Operation};
use codecommit_core::domain::request::{LifecycleRequest, ValidatedRequest};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::{Semaphore, watch};
use tracing::{debug, error, info, warn};

use crate::config::Config;
use crate::error::LifecycleError;
use crate::git::{GitCloner, ProcessGitCloner};
use crate::job::{JobContext, LifecycleJob};
use crate::notify::{self, EventTracker, NoopRefreshNotifier, RefreshNotifier, TracingEventTracker};
use crate::scheduler::handle::{JobHandle, JobRecord};

/// Queues lifecycle jobs and reports their status
///
/// Cloning a scheduler yields another handle to the same job table.
/// Submission must happen inside a Tokio runtime.
#[derive(Clone)]
pub struct JobScheduler {
    shared: Arc<Shared>,
}

/// Builds a [`JobScheduler`] with optional collaborators
pub struct SchedulerBuilder {
    client: Arc<dyn RepositoryClient>,
    config: Config,
    cloner: Option<Arc<dyn GitCloner>>,
    notifier: Arc<dyn RefreshNotifier>,
    tracker: Arc<dyn EventTracker>,
}

struct Shared {
    context: JobContext,
    notifier: Arc<dyn RefreshNotifier>,
    tracker: Arc<dyn EventTracker>,
    permits: Arc<Semaphore>,
    state: Mutex<State>,
}

#[derive(Default)]
struct State {
    jobs: HashMap<JobId, JobEntry>,
    /// Repository names with a delete pending or running
    active_deletes: HashSet<String>,
}

struct JobEntry {
    operation: Operation,
    repository_name: String,
    submitted_at: DateTime<Utc>,
    finished_at: Option<DateTime<Utc>>,
    status: watch::Sender<JobStatus>,
    cancel: watch::Sender<bool>,
    settled: watch::Sender<bool>,
}

impl JobEntry {
    fn record(&self, id: JobId) -> JobRecord {
        JobRecord {
            id,
            operation: self.operation,
            repository_name: self.repository_name.clone(),
            status: self.status.borrow().clone(),
            submitted_at: self.submitted_at,
            finished_at: self.finished_at,
        }
    }
}

impl SchedulerBuilder {
    /// Replaces the process-backed git cloner
    pub fn cloner(mut self, cloner: Arc<dyn GitCloner>) -> Self {
        self.cloner = Some(cloner);
        self
    }

    pub fn notifier(mut self, notifier: Arc<dyn RefreshNotifier>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn tracker(mut self, tracker: Arc<dyn EventTracker>) -> Self {
        self.tracker = tracker;
        self
    }

    pub fn build(self) -> JobScheduler {
        let cloner = self
            .cloner
            .unwrap_or_else(|| Arc::new(ProcessGitCloner::new(self.config.git_program.clone())));
        // A zero-permit semaphore would leave every job pending forever
        let permits = Arc::new(Semaphore::new(self.config.max_parallel_jobs.max(1)));

        JobScheduler {
            shared: Arc::new(Shared {
                context: JobContext {
                    client: self.client,
                    cloner,
                    config: Arc::new(self.config),
                },
                notifier: self.notifier,
                tracker: self.tracker,
                permits,
                state: Mutex::new(State::default()),
            }),
        }
    }
}

impl JobScheduler {
    /// Scheduler with a no-op refresh notifier and a tracing event tracker
    pub fn new(client: Arc<dyn RepositoryClient>, config: Config) -> Self {
        Self::builder(client, config).build()
    }

    pub fn builder(client: Arc<dyn RepositoryClient>, config: Config) -> SchedulerBuilder {
        SchedulerBuilder {
            client,
            config,
            cloner: None,
            notifier: Arc::new(NoopRefreshNotifier),
            tracker: Arc::new(TracingEventTracker),
        }
    }

    pub fn config(&self) -> &Config {
        &self.shared.context.config
    }

    /// Validates and submits a request in one step
    pub fn submit_request(&self, request: LifecycleRequest) -> Result<JobHandle, LifecycleError> {
        let request = request.validate()?;
        self.submit(request)
    }

    /// Queues a job and returns immediately
    ///
    /// Fails with [`LifecycleError::Conflict`] when a delete of the same
    /// repository is still pending or running.
    pub fn submit(&self, request: ValidatedRequest) -> Result<JobHandle, LifecycleError> {
        let id = JobId::new();
        let operation = request.operation();
        let repository_name = request.repository_name().to_string();

        let (status_tx, status_rx) = watch::channel(JobStatus::Pending);
        let (cancel_tx, cancel_rx) = watch::channel(false);
        let (settled_tx, settled_rx) = watch::channel(false);

        {
            let mut state = self.shared.lock_state();
            if operation.is_destructive() && !state.active_deletes.insert(repository_name.clone())
            {
                warn!("Rejected duplicate delete of '{}'", repository_name);
                return Err(LifecycleError::Conflict {
                    name: repository_name,
                });
            }

            state.jobs.insert(
                id,
                JobEntry {
                    operation,
                    repository_name: repository_name.clone(),
                    submitted_at: Utc::now(),
                    finished_at: None,
                    status: status_tx,
                    cancel: cancel_tx,
                    settled: settled_tx,
                },
            );
        }

        info!("Job {} queued: {} '{}'", id, operation, repository_name);

        let shared = Arc::clone(&self.shared);
        let job = LifecycleJob::new(id, request);
        tokio::spawn(shared.drive(job, cancel_rx));

        Ok(JobHandle {
            id,
            operation,
            repository_name,
            status: status_rx,
            settled: settled_rx,
        })
    }

    /// Current status of a job, `None` for unknown ids
    pub fn status(&self, id: JobId) -> Option<JobStatus> {
        let state = self.shared.lock_state();
        state.jobs.get(&id).map(|entry| entry.status.borrow().clone())
    }

    /// Snapshot of a job's record
    pub fn snapshot(&self, id: JobId) -> Option<JobRecord> {
        let state = self.shared.lock_state();
        state.jobs.get(&id).map(|entry| entry.record(id))
    }

    /// Snapshots of every job still tracked, oldest first
    pub fn jobs(&self) -> Vec<JobRecord> {
        let state = self.shared.lock_state();
        let mut records: Vec<JobRecord> = state
            .jobs
            .iter()
            .map(|(id, entry)| entry.record(*id))
            .collect();
        records.sort_by_key(|r| r.submitted_at);
        records
    }

    /// Cancels a pending or running job
    ///
    /// The status becomes `Canceled` immediately. A canceled delete keeps
    /// its repository name claimed until the job's task has unwound, so a
    /// delete of the same name submitted right away may still get
    /// [`LifecycleError::Conflict`]; wait on the job's handle first.
    ///
    /// Returns false if the job is unknown or already terminal.
    pub fn cancel(&self, id: JobId) -> bool {
        let mut state = self.shared.lock_state();
        let Some(entry) = state.jobs.get_mut(&id) else {
            return false;
        };

        let canceled = entry.status.send_if_modified(|status| {
            if status.is_terminal() {
                false
            } else {
                *status = JobStatus::Canceled;
                true
            }
        });

        if canceled {
            entry.finished_at = Some(Utc::now());
            entry.cancel.send_replace(true);
            info!("Job {} canceled", id);
        }
        canceled
    }

    /// Drops records of jobs that finished and delivered their notifications
    ///
    /// Returns how many records were removed.
    pub fn prune_finished(&self) -> usize {
        let mut state = self.shared.lock_state();
        let before = state.jobs.len();
        state.jobs.retain(|_, entry| !*entry.settled.borrow());
        before - state.jobs.len()
    }
}

impl Shared {
    fn lock_state(&self) -> MutexGuard<'_, State> {
        // State stays consistent across a panic in another holder
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Owns a job from submission until its notifications are delivered
    async fn drive(self: Arc<Self>, job: LifecycleJob, mut cancel: watch::Receiver<bool>) {
        let id = job.id();
        let operation = job.operation();
        let repository_name = job.repository_name().to_string();

        let permit = tokio::select! {
            biased;
            _ = canceled(&mut cancel) => None,
            permit = Arc::clone(&self.permits).acquire_owned() => permit.ok(),
        };

        let outcome = match permit {
            Some(_permit) if self.mark_running(id) => {
                let mut task = tokio::spawn(job.run(self.context.clone()));
                tokio::select! {
                    biased;
                    _ = canceled(&mut cancel) => {
                        task.abort();
                        debug!("Job {} aborted while running", id);
                        JobStatus::Canceled
                    }
                    joined = &mut task => match joined {
                        Ok(status) => status,
                        Err(e) if e.is_panic() => {
                            error!("Job {} panicked", id);
                            JobStatus::failed("job panicked")
                        }
                        Err(_) => JobStatus::Canceled,
                    },
                }
            }
            _ => {
                debug!("Job {} canceled before running", id);
                JobStatus::Canceled
            }
        };

        let status = self.complete(id, operation, &repository_name, outcome);

        notify::deliver(
            self.notifier.as_ref(),
            self.tracker.as_ref(),
            id,
            operation,
            &status,
        );

        self.settle(id);
    }

    /// Pending -> Running; false if the job was canceled meanwhile
    fn mark_running(&self, id: JobId) -> bool {
        let state = self.lock_state();
        let Some(entry) = state.jobs.get(&id) else {
            return false;
        };
        entry.status.send_if_modified(|status| {
            if *status == JobStatus::Pending {
                *status = JobStatus::Running;
                true
            } else {
                false
            }
        })
    }

    /// Records the terminal status unless one was already set
    ///
    /// Returns the status the job ends with.
    fn complete(
        &self,
        id: JobId,
        operation: Operation,
        repository_name: &str,
        outcome: JobStatus,
    ) -> JobStatus {
        let mut state = self.lock_state();
        if operation.is_destructive() {
            state.active_deletes.remove(repository_name);
        }

        let Some(entry) = state.jobs.get_mut(&id) else {
            return outcome;
        };

        let mut final_status = outcome;
        let transitioned = entry.status.send_if_modified(|status| {
            if status.is_terminal() {
                final_status = status.clone();
                false
            } else {
                *status = final_status.clone();
                true
            }
        });

        if transitioned {
            entry.finished_at = Some(Utc::now());
        } else {
            debug!("Job {} already terminal, discarding its result", id);
        }
        final_status
    }

    fn settle(&self, id: JobId) {
        let state = self.lock_state();
        if let Some(entry) = state.jobs.get(&id) {
            entry.settled.send_replace(true);
        }
    }
}

/// Resolves once cancellation is requested
async fn canceled(cancel: &mut watch::Receiver<bool>) {
    if cancel.wait_for(|requested| *requested).await.is_err() {
        // Sender gone, cancellation can no longer arrive
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{RecordingNotifier, RecordingTracker, StubClient, StubCloner, until};
    use codecommit_core::ValidationError;
    use codecommit_core::domain::job::{EventResult, JobOutput};
    use codecommit_core::domain::repository::Repository;

    struct Fixture {
        scheduler: JobScheduler,
        client: Arc<StubClient>,
        cloner: Arc<StubCloner>,
        log: Arc<Mutex<Vec<String>>>,
    }

    fn fixture_with(client: StubClient, notifier: RecordingNotifier, config: Config) -> Fixture {
        let client = Arc::new(client);
        let cloner = Arc::new(StubCloner::default());
        let log = notifier.log();
        let scheduler = JobScheduler::builder(client.clone(), config)
            .cloner(cloner.clone())
            .notifier(Arc::new(notifier))
            .tracker(Arc::new(RecordingTracker::new(log.clone())))
            .build();
        Fixture {
            scheduler,
            client,
            cloner,
            log,
        }
    }

    fn fixture(client: StubClient) -> Fixture {
        fixture_with(client, RecordingNotifier::default(), Config::default())
    }

    fn entries(log: &Arc<Mutex<Vec<String>>>) -> Vec<String> {
        log.lock().unwrap().clone()
    }

    #[tokio::test]
    async fn test_create_succeeds_and_notifies_once() {
        let f = fixture(StubClient::default());

        let handle = f
            .scheduler
            .submit_request(LifecycleRequest::create(
                "demo",
                Some("test repo".to_string()),
            ))
            .unwrap();
        assert_eq!(handle.status(), JobStatus::Pending);

        let status = handle.wait().await;
        assert_eq!(
            status,
            JobStatus::Succeeded(JobOutput::Created(Repository::new(
                "demo",
                Some("test repo".to_string())
            )))
        );
        assert_eq!(f.client.creates(), 1);
        assert_eq!(entries(&f.log), vec!["refresh", "track:create:Succeeded"]);
        assert_eq!(f.scheduler.status(handle.id()), Some(status));
    }

    #[tokio::test]
    async fn test_create_failure_carries_reason_without_retry() {
        let f = fixture(StubClient::failing("Repository named demo already exists"));

        let handle = f
            .scheduler
            .submit_request(LifecycleRequest::create("demo", None))
            .unwrap();

        assert_eq!(
            handle.wait().await,
            JobStatus::failed("Repository named demo already exists")
        );
        assert_eq!(f.client.creates(), 1);
        assert_eq!(entries(&f.log), vec!["refresh", "track:create:Failed"]);
    }

    #[tokio::test]
    async fn test_unconfirmed_delete_never_reaches_client() {
        let f = fixture(StubClient::default());

        let result = f
            .scheduler
            .submit_request(LifecycleRequest::delete("demo", "dem"));

        assert_eq!(
            result.unwrap_err(),
            LifecycleError::Validation(ValidationError::ConfirmationMismatch {
                expected: "demo".to_string()
            })
        );
        tokio::task::yield_now().await;
        assert_eq!(f.client.deletes(), 0);
        assert!(f.scheduler.jobs().is_empty());
        assert!(entries(&f.log).is_empty());
    }

    #[tokio::test]
    async fn test_confirmed_delete_succeeds() {
        let f = fixture(StubClient::default());

        let handle = f
            .scheduler
            .submit_request(LifecycleRequest::delete("demo", "demo"))
            .unwrap();

        assert_eq!(
            handle.wait().await,
            JobStatus::Succeeded(JobOutput::Deleted {
                name: "demo".to_string()
            })
        );
        assert_eq!(f.client.deletes(), 1);
        assert_eq!(entries(&f.log), vec!["refresh", "track:delete:Succeeded"]);
    }

    #[tokio::test]
    async fn test_second_delete_of_same_repository_conflicts() {
        let f = fixture(StubClient::held());

        let first = f
            .scheduler
            .submit_request(LifecycleRequest::delete("demo", "demo"))
            .unwrap();

        // Still pending
        assert_eq!(
            f.scheduler
                .submit_request(LifecycleRequest::delete("demo", "demo"))
                .unwrap_err(),
            LifecycleError::Conflict {
                name: "demo".to_string()
            }
        );

        // And running
        until(|| f.client.deletes() == 1).await;
        assert_eq!(first.status(), JobStatus::Running);
        assert!(matches!(
            f.scheduler
                .submit_request(LifecycleRequest::delete("demo", "demo")),
            Err(LifecycleError::Conflict { .. })
        ));

        // Other repositories are unaffected
        let other = f
            .scheduler
            .submit_request(LifecycleRequest::delete("other", "other"))
            .unwrap();

        f.client.release();
        assert!(matches!(first.wait().await, JobStatus::Succeeded(_)));
        assert!(matches!(other.wait().await, JobStatus::Succeeded(_)));
        assert_eq!(f.client.deletes(), 2);

        // Slot is free again once the first delete finished
        let again = f
            .scheduler
            .submit_request(LifecycleRequest::delete("demo", "demo"))
            .unwrap();
        assert!(matches!(again.wait().await, JobStatus::Succeeded(_)));
    }

    #[tokio::test]
    async fn test_creates_are_not_serialized() {
        let f = fixture(StubClient::held());

        let a = f
            .scheduler
            .submit_request(LifecycleRequest::create("demo", None))
            .unwrap();
        let b = f
            .scheduler
            .submit_request(LifecycleRequest::create("demo", None))
            .unwrap();

        until(|| f.client.creates() == 2).await;
        f.client.release();
        a.wait().await;
        b.wait().await;
    }

    #[tokio::test]
    async fn test_cancel_before_run_never_calls_client() {
        let f = fixture(StubClient::default());

        let handle = f
            .scheduler
            .submit_request(LifecycleRequest::create("demo", None))
            .unwrap();
        assert!(f.scheduler.cancel(handle.id()));
        assert_eq!(handle.status(), JobStatus::Canceled);

        assert_eq!(handle.wait().await, JobStatus::Canceled);
        assert_eq!(f.client.creates(), 0);
        assert_eq!(entries(&f.log), vec!["refresh", "track:create:Canceled"]);

        // Already terminal
        assert!(!f.scheduler.cancel(handle.id()));
    }

    #[tokio::test]
    async fn test_cancel_while_waiting_for_permit() {
        let f = fixture_with(
            StubClient::held(),
            RecordingNotifier::default(),
            Config::default().with_max_parallel_jobs(1),
        );

        let running = f
            .scheduler
            .submit_request(LifecycleRequest::create("first", None))
            .unwrap();
        until(|| f.client.creates() == 1).await;

        let queued = f
            .scheduler
            .submit_request(LifecycleRequest::create("second", None))
            .unwrap();
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
        assert_eq!(queued.status(), JobStatus::Pending);

        assert!(f.scheduler.cancel(queued.id()));
        assert_eq!(queued.wait().await, JobStatus::Canceled);

        f.client.release();
        assert!(matches!(running.wait().await, JobStatus::Succeeded(_)));
        assert_eq!(f.client.creates(), 1);
    }

    #[tokio::test]
    async fn test_cancel_while_running_discards_result() {
        let f = fixture(StubClient::held());

        let handle = f
            .scheduler
            .submit_request(LifecycleRequest::delete("demo", "demo"))
            .unwrap();
        until(|| f.client.deletes() == 1).await;

        assert!(f.scheduler.cancel(handle.id()));
        assert_eq!(f.scheduler.status(handle.id()), Some(JobStatus::Canceled));

        // The name stays claimed until the canceled task has unwound
        assert_eq!(
            f.scheduler
                .submit_request(LifecycleRequest::delete("demo", "demo"))
                .unwrap_err(),
            LifecycleError::Conflict {
                name: "demo".to_string()
            }
        );
        f.client.release();

        assert_eq!(handle.wait().await, JobStatus::Canceled);
        assert_eq!(entries(&f.log), vec!["refresh", "track:delete:Canceled"]);

        let record = f.scheduler.snapshot(handle.id()).unwrap();
        assert_eq!(record.status, JobStatus::Canceled);
        assert!(record.finished_at.is_some());

        let retry = f
            .scheduler
            .submit_request(LifecycleRequest::delete("demo", "demo"))
            .unwrap();
        assert!(matches!(retry.wait().await, JobStatus::Succeeded(_)));
    }

    #[tokio::test]
    async fn test_cancel_unknown_job() {
        let f = fixture(StubClient::default());
        assert!(!f.scheduler.cancel(JobId::new()));
        assert!(f.scheduler.status(JobId::new()).is_none());
    }

    #[tokio::test]
    async fn test_failing_notifier_is_swallowed() {
        let f = fixture_with(
            StubClient::default(),
            RecordingNotifier::failing(),
            Config::default(),
        );

        let first = f
            .scheduler
            .submit_request(LifecycleRequest::create("one", None))
            .unwrap();
        let second = f
            .scheduler
            .submit_request(LifecycleRequest::create("two", None))
            .unwrap();

        assert!(matches!(first.wait().await, JobStatus::Succeeded(_)));
        assert!(matches!(second.wait().await, JobStatus::Succeeded(_)));

        let log = entries(&f.log);
        assert_eq!(log.iter().filter(|e| *e == "refresh").count(), 2);
        assert_eq!(
            log.iter()
                .filter(|e| *e == "track:create:Succeeded")
                .count(),
            2
        );
    }

    #[tokio::test]
    async fn test_panicking_notifier_still_tracks() {
        let f = fixture_with(
            StubClient::default(),
            RecordingNotifier::panicking(),
            Config::default(),
        );

        let handle = f
            .scheduler
            .submit_request(LifecycleRequest::open("demo"))
            .unwrap();

        assert!(matches!(handle.wait().await, JobStatus::Succeeded(_)));
        assert_eq!(entries(&f.log), vec!["refresh", "track:open:Succeeded"]);
    }

    #[tokio::test]
    async fn test_panicking_tracker_is_swallowed() {
        let notifier = RecordingNotifier::default();
        let log = notifier.log();
        let scheduler = JobScheduler::builder(Arc::new(StubClient::default()), Config::default())
            .cloner(Arc::new(StubCloner::default()))
            .notifier(Arc::new(notifier))
            .tracker(Arc::new(RecordingTracker::panicking(log.clone())))
            .build();

        let first = scheduler
            .submit_request(LifecycleRequest::create("one", None))
            .unwrap();
        assert!(matches!(first.wait().await, JobStatus::Succeeded(_)));

        // The scheduler keeps working after the tracker blew up
        let second = scheduler
            .submit_request(LifecycleRequest::delete("two", "two"))
            .unwrap();
        assert!(matches!(second.wait().await, JobStatus::Succeeded(_)));

        assert_eq!(
            entries(&log),
            vec![
                "refresh",
                "track:create:Succeeded",
                "refresh",
                "track:delete:Succeeded",
            ]
        );
        assert!(scheduler.jobs().iter().all(|r| r.finished_at.is_some()));
    }

    #[tokio::test]
    async fn test_panicking_job_fails_once() {
        let f = fixture(StubClient::panicking());

        let handle = f
            .scheduler
            .submit_request(LifecycleRequest::create("demo", None))
            .unwrap();

        assert_eq!(handle.wait().await, JobStatus::failed("job panicked"));
        assert_eq!(entries(&f.log), vec!["refresh", "track:create:Failed"]);
    }

    #[tokio::test]
    async fn test_open_resolves_reference() {
        let config = Config::default().with_account_id("111122223333");
        let f = fixture_with(StubClient::default(), RecordingNotifier::default(), config);

        let handle = f
            .scheduler
            .submit_request(LifecycleRequest::open("demo"))
            .unwrap();

        match handle.wait().await {
            JobStatus::Succeeded(JobOutput::Opened(reference)) => {
                assert_eq!(reference.repository.name, "demo");
                assert_eq!(
                    reference.endpoint,
                    "https://codecommit.us-east-1.amazonaws.com"
                );
                assert_eq!(reference.account_id.as_deref(), Some("111122223333"));
                assert!(reference.console_url.contains("/repositories/demo/"));
            }
            other => panic!("unexpected status: {:?}", other),
        }
        assert_eq!(f.client.describes(), 1);
    }

    #[tokio::test]
    async fn test_clone_hands_off_to_git() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default().with_clone_root(dir.path());
        let f = fixture_with(StubClient::default(), RecordingNotifier::default(), config);

        let handle = f
            .scheduler
            .submit_request(LifecycleRequest::clone_to("demo", "demo"))
            .unwrap();

        assert_eq!(
            handle.wait().await,
            JobStatus::Succeeded(JobOutput::Cloned {
                name: "demo".to_string(),
                destination: dir.path().join("demo"),
            })
        );
        assert_eq!(
            f.cloner.calls(),
            vec![(
                "https://git-codecommit.us-east-1.amazonaws.com/v1/repos/demo".to_string(),
                dir.path().join("demo")
            )]
        );
        assert_eq!(entries(&f.log), vec!["refresh", "track:clone:Succeeded"]);
    }

    #[tokio::test]
    async fn test_clone_into_non_empty_directory_fails_before_git() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("README.md"), "taken").unwrap();
        let f = fixture(StubClient::default());

        let handle = f
            .scheduler
            .submit_request(LifecycleRequest::clone_to("demo", dir.path()))
            .unwrap();

        match handle.wait().await {
            JobStatus::Failed { reason } => assert!(reason.contains("is not empty")),
            other => panic!("unexpected status: {:?}", other),
        }
        assert!(f.cloner.calls().is_empty());
    }

    #[tokio::test]
    async fn test_clone_with_unresolvable_remote_fails_before_git() {
        let dir = tempfile::tempdir().unwrap();
        let f = fixture(StubClient::default());

        let handle = f
            .scheduler
            .submit_request(LifecycleRequest::clone_to("bad name", dir.path().join("x")))
            .unwrap();

        match handle.wait().await {
            JobStatus::Failed { reason } => assert!(reason.starts_with("cannot resolve remote URL")),
            other => panic!("unexpected status: {:?}", other),
        }
        assert!(f.cloner.calls().is_empty());
    }

    #[tokio::test]
    async fn test_jobs_and_prune() {
        let f = fixture(StubClient::default());

        let a = f
            .scheduler
            .submit_request(LifecycleRequest::create("a", None))
            .unwrap();
        let b = f
            .scheduler
            .submit_request(LifecycleRequest::open("b"))
            .unwrap();
        a.wait().await;
        b.wait().await;

        let jobs = f.scheduler.jobs();
        assert_eq!(jobs.len(), 2);
        assert!(jobs.iter().all(|r| r.status.is_terminal()));

        assert_eq!(f.scheduler.prune_finished(), 2);
        assert!(f.scheduler.jobs().is_empty());
        assert!(f.scheduler.snapshot(a.id()).is_none());
    }
}
