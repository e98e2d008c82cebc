//! # users-core
//!
//! Domain layer containing entities, value objects, repository traits, the
//! statistics rules and the activity classifier.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod classifier;
pub mod entities;
pub mod error;
pub mod statistics;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use classifier::{
    ActivityClassifier, ActivityFeatures, ActivityModel, ClassifierError, ForestParams,
    TrainingReport,
};
pub use entities::{NewActivity, NewUser, User, UserActivity, UserPatch};
pub use error::DomainError;
pub use traits::{
    ActivityRepository, PageRequest, RepoResult, TrainingSetVersion, TrainingSnapshot,
    UserRepository,
};
pub use value_objects::{Patch, UserId, UserIdParseError};
