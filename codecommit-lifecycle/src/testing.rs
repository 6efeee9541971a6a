//! Test doubles shared by the unit tests

use async_trait::async_trait;
use codecommit_client::{ClientError, RepositoryClient};
use codecommit_core::domain::job::{EventResult, Operation};
use codecommit_core::domain::repository::Repository;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::watch;

use crate::error::CloneError;
use crate::git::GitCloner;
use crate::notify::{EventTracker, RefreshNotifier};

/// Yields until `condition` holds, failing the test after five seconds
pub async fn until(condition: impl Fn() -> bool) {
    tokio::time::timeout(Duration::from_secs(5), async {
        while !condition() {
            tokio::task::yield_now().await;
        }
    })
    .await
    .expect("condition not reached in time");
}

#[derive(Default)]
enum Behavior {
    #[default]
    Succeed,
    Fail(String),
    Panic,
}

/// Call-counting repository client
///
/// A held client blocks every call after counting it until
/// [`release`](StubClient::release) is called.
pub struct StubClient {
    behavior: Behavior,
    gate: watch::Sender<bool>,
    creates: AtomicUsize,
    deletes: AtomicUsize,
    describes: AtomicUsize,
    lists: AtomicUsize,
}

impl Default for StubClient {
    fn default() -> Self {
        Self::with(Behavior::Succeed, true)
    }
}

impl StubClient {
    fn with(behavior: Behavior, open: bool) -> Self {
        Self {
            behavior,
            gate: watch::Sender::new(open),
            creates: AtomicUsize::new(0),
            deletes: AtomicUsize::new(0),
            describes: AtomicUsize::new(0),
            lists: AtomicUsize::new(0),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self::with(Behavior::Fail(message.to_string()), true)
    }

    pub fn panicking() -> Self {
        Self::with(Behavior::Panic, true)
    }

    pub fn held() -> Self {
        Self::with(Behavior::Succeed, false)
    }

    pub fn release(&self) {
        self.gate.send_replace(true);
    }

    pub fn creates(&self) -> usize {
        self.creates.load(Ordering::SeqCst)
    }

    pub fn deletes(&self) -> usize {
        self.deletes.load(Ordering::SeqCst)
    }

    pub fn describes(&self) -> usize {
        self.describes.load(Ordering::SeqCst)
    }

    async fn enter(&self, counter: &AtomicUsize) -> Result<(), ClientError> {
        counter.fetch_add(1, Ordering::SeqCst);

        let mut gate = self.gate.subscribe();
        let _ = gate.wait_for(|open| *open).await;

        match &self.behavior {
            Behavior::Succeed => Ok(()),
            Behavior::Fail(message) => Err(ClientError::service(
                400,
                "RepositoryNameExistsException",
                message.clone(),
            )),
            Behavior::Panic => panic!("stub client exploded"),
        }
    }
}

#[async_trait]
impl RepositoryClient for StubClient {
    async fn create(
        &self,
        name: &str,
        description: Option<&str>,
    ) -> codecommit_client::Result<Repository> {
        self.enter(&self.creates).await?;
        Ok(Repository::new(name, description.map(str::to_string)))
    }

    async fn delete(&self, _name: &str) -> codecommit_client::Result<()> {
        self.enter(&self.deletes).await
    }

    async fn describe(&self, name: &str) -> codecommit_client::Result<Repository> {
        self.enter(&self.describes).await?;
        Ok(Repository::new(name, None))
    }

    async fn list(&self) -> codecommit_client::Result<Vec<Repository>> {
        self.enter(&self.lists).await?;
        Ok(Vec::new())
    }
}

/// Records clone calls instead of running git
#[derive(Default)]
pub struct StubCloner {
    calls: Mutex<Vec<(String, PathBuf)>>,
}

impl StubCloner {
    pub fn calls(&self) -> Vec<(String, PathBuf)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl GitCloner for StubCloner {
    async fn clone_repository(
        &self,
        remote_url: &str,
        destination: &Path,
    ) -> Result<(), CloneError> {
        self.calls
            .lock()
            .unwrap()
            .push((remote_url.to_string(), destination.to_path_buf()));
        Ok(())
    }
}

#[derive(Default, Clone, Copy)]
enum NotifierMode {
    #[default]
    Ok,
    Fail,
    Panic,
}

/// Writes "refresh" into a shared log on every notification
#[derive(Default)]
pub struct RecordingNotifier {
    log: Arc<Mutex<Vec<String>>>,
    mode: NotifierMode,
}

impl RecordingNotifier {
    pub fn failing() -> Self {
        Self {
            mode: NotifierMode::Fail,
            ..Self::default()
        }
    }

    pub fn panicking() -> Self {
        Self {
            mode: NotifierMode::Panic,
            ..Self::default()
        }
    }

    pub fn log(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.log)
    }
}

impl RefreshNotifier for RecordingNotifier {
    fn notify_changed(&self) -> anyhow::Result<()> {
        self.log.lock().unwrap().push("refresh".to_string());
        match self.mode {
            NotifierMode::Ok => Ok(()),
            NotifierMode::Fail => anyhow::bail!("view is gone"),
            NotifierMode::Panic => panic!("listener exploded"),
        }
    }
}

/// Writes "track:<operation>:<outcome>" into a shared log
pub struct RecordingTracker {
    log: Arc<Mutex<Vec<String>>>,
    panics: bool,
}

impl RecordingTracker {
    pub fn new(log: Arc<Mutex<Vec<String>>>) -> Self {
        Self { log, panics: false }
    }

    /// Records the event, then panics
    pub fn panicking(log: Arc<Mutex<Vec<String>>>) -> Self {
        Self { log, panics: true }
    }
}

impl EventTracker for RecordingTracker {
    fn track(&self, operation: Operation, outcome: EventResult) {
        self.log
            .lock()
            .unwrap()
            .push(format!("track:{}:{:?}", operation, outcome));
        if self.panics {
            panic!("analytics backend exploded");
        }
    }
}
