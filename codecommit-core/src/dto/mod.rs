//! Data Transfer Objects
//!
//! Wire shapes of the remote repository service (JSON 1.1 protocol).
//! Field names follow the service; conversions into domain types live next
//! to the shapes.

pub mod repository;
