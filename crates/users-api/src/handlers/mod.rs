//! Route handlers

pub mod health;
pub mod statistics;
pub mod users;
