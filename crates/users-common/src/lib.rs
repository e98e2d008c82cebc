//! # users-common
//!
//! Shared utilities including configuration, error handling and telemetry.

pub mod config;
pub mod error;
pub mod telemetry;

// Re-export commonly used types at crate root
pub use config::{
    ActivityModelConfig, AppConfig, AppSettings, ConfigError, CorsConfig, DatabaseConfig,
    Environment, ServerConfig,
};
pub use error::{domain_status_code, AppError};
pub use telemetry::{try_init_tracing, TracingConfig, TracingError};
