//! # users-service
//!
//! Application layer containing services, the activity model cache and DTOs.

pub mod dto;
pub mod services;

pub use services::{
    ActivityModelCache, ActivityPredictionService, ServiceContext, ServiceContextBuilder,
    ServiceError, ServiceResult, StatisticsService, UserService,
};
