//! CodeCommit Lifecycle
//!
//! Asynchronous orchestration of repository lifecycle operations.
//!
//! Architecture:
//! - Configuration: Region, endpoint and clone settings passed explicitly
//! - Jobs: One create, delete, clone or open operation each
//! - Scheduler: Runs jobs off the caller's task, tracks their status and
//!   rejects concurrent deletes of the same repository
//! - Notifications: Refresh then analytics, once per terminal status
//!
//! Callers never block on remote work: submit a validated request, then
//! poll [`JobScheduler::status`] or await [`JobHandle::wait`].
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use codecommit_client::CodeCommitClient;
//! use codecommit_core::domain::request::LifecycleRequest;
//! use codecommit_lifecycle::{Config, JobScheduler};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let client = Arc::new(CodeCommitClient::new(config.service_endpoint()));
//!     let scheduler = JobScheduler::new(client, config);
//!
//!     let handle = scheduler.submit_request(LifecycleRequest::create("demo", None))?;
//!     println!("{:?}", handle.wait().await);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod git;
pub mod job;
pub mod notify;
pub mod scheduler;

#[cfg(test)]
mod testing;

pub use config::Config;
pub use error::{CloneError, LifecycleError};
pub use git::{GitCloner, ProcessGitCloner};
pub use job::{JobContext, LifecycleJob};
pub use notify::{EventTracker, NoopRefreshNotifier, RefreshNotifier, TracingEventTracker};
pub use scheduler::{JobHandle, JobRecord, JobScheduler, SchedulerBuilder};
