//! # users-db
//!
//! Storage layer implementing the repository traits of `users-core`.
//!
//! ## Overview
//!
//! - PostgreSQL connection pool and migrations
//! - Database models with SQLx `FromRow` derives
//! - Model → entity mappers
//! - PostgreSQL repositories
//! - An in-memory store implementing the same traits, used when no database
//!   is configured
//!
//! ## Usage
//!
//! ```rust,ignore
//! use users_common::DatabaseConfig;
//! use users_db::{create_pool, run_migrations, PgUserRepository};
//!
//! async fn example(config: &DatabaseConfig) -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = create_pool(config).await?;
//!     run_migrations(&pool).await?;
//!     let user_repo = PgUserRepository::new(pool);
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod memory;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use memory::MemoryStore;
pub use pool::{create_pool, run_migrations, PgPool, PoolError, MIGRATIONS_DIR};
pub use repositories::{PgActivityRepository, PgUserRepository};
