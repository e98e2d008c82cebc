//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in users-core.

mod activity;
mod error;
mod user;

pub use activity::PgActivityRepository;
pub use user::PgUserRepository;
