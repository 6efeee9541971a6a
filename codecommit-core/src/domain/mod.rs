//! Core domain types
//!
//! This module contains the core domain structures shared between the
//! remote client, the lifecycle scheduler and front ends.

pub mod job;
pub mod repository;
pub mod request;
