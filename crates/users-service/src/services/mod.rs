//! Business logic services
//!
//! Services are cheap views over a shared [`ServiceContext`]; handlers build
//! one per request.

pub mod activity;
pub mod context;
pub mod error;
pub mod model_cache;
pub mod statistics;
pub mod user;

pub use activity::ActivityPredictionService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use model_cache::{ActivityModelCache, CachedModel};
pub use statistics::StatisticsService;
pub use user::UserService;
