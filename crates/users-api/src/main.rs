//! Users API Server entry point
//!
//! Run with:
//! ```bash
//! cargo run -p users-api
//! ```
//!
//! Configuration is loaded from environment variables (and `.env`).
//! Without `DATABASE_URL` the server keeps its records in memory.

use tracing::{error, info};
use users_common::{try_init_tracing, AppConfig, TracingConfig};

#[tokio::main]
async fn main() {
    let config = AppConfig::from_env();

    // Initialize tracing, picking the output format from the environment
    let tracing_config = config
        .as_ref()
        .map(|c| TracingConfig::for_environment(c.app.env))
        .unwrap_or_default();
    if let Err(e) = try_init_tracing(&tracing_config) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    let config = match config {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Failed to load configuration");
            std::process::exit(1);
        }
    };

    if let Err(e) = run(config).await {
        error!(error = %e, "Server failed to start");
        std::process::exit(1);
    }
}

async fn run(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    info!(
        name = %config.app.name,
        env = ?config.app.env,
        port = config.api.port,
        in_memory = config.database.is_in_memory(),
        "Configuration loaded"
    );

    users_api::run(config).await?;

    Ok(())
}
