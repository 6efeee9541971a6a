//! CodeCommit Core
//!
//! Core types and abstractions for repository lifecycle orchestration.
//!
//! This crate contains:
//! - Domain types: Repository, lifecycle requests, job status
//! - Confirmation gate and request validation
//! - Region and endpoint resolution
//! - DTOs: Wire shapes of the remote repository service

pub mod domain;
pub mod dto;
pub mod error;
pub mod gate;
pub mod region;

pub use error::ValidationError;
pub use gate::ConfirmationGate;
