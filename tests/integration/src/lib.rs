//! Integration test utilities for the users API
//!
//! Spawns the full axum application on an ephemeral port and drives it over
//! HTTP with `reqwest`.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
