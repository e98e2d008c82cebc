//! Domain entities - core business objects

mod activity;
mod user;

pub use activity::{NewActivity, UserActivity};
pub use user::{NewUser, User, UserPatch};
