//! Database models - SQLx-compatible structs for PostgreSQL tables

mod activity;
mod user;

pub use activity::{TrainingSetVersionModel, UserActivityModel};
pub use user::UserModel;
