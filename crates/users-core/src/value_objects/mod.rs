//! Value objects - immutable types that represent domain concepts

mod patch;
mod user_id;

pub use patch::Patch;
pub use user_id::{UserId, UserIdParseError};
