//! Scheduler layer
//!
//! Runs lifecycle jobs off the caller's task, owns every job's status
//! record and delivers completion notifications.

pub mod dispatch;
pub mod handle;

pub use dispatch::{JobScheduler, SchedulerBuilder};
pub use handle::{JobHandle, JobRecord};
