//! Axum extractors for request handling
//!
//! Every rejection is turned into an [`ApiError`](crate::response::ApiError)
//! so clients always receive the JSON error body.

mod path;
mod query;
mod validated;

pub use path::UserIdPath;
pub use query::{QueryParams, ValidatedQuery};
pub use validated::ValidatedJson;
