//! Traits (ports) implemented by the infrastructure layer

mod repositories;

pub use repositories::{
    ActivityRepository, PageRequest, RepoResult, TrainingSetVersion, TrainingSnapshot,
    UserRepository,
};
