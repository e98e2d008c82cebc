//! Configuration structs

mod app_config;

pub use app_config::{
    ActivityModelConfig, AppConfig, AppSettings, ConfigError, CorsConfig, DatabaseConfig,
    Environment, ServerConfig,
};
