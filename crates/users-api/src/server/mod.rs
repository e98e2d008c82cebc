//! Server setup and initialization
//!
//! Provides the application builder and the server runner.

use axum::Router;
use tokio::net::TcpListener;
use tracing::{info, warn};
use users_common::{AppConfig, AppError};
use users_db::{create_pool, run_migrations, MemoryStore};
use users_service::ServiceContext;

use crate::middleware::apply_middleware;
use crate::routes::create_router;
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    let config = state.config();
    let router = apply_middleware(
        create_router(),
        &config.cors,
        config.app.env.is_production(),
    );
    router.with_state(state)
}

/// Initialize the record store and create AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    let service_context = if config.database.is_in_memory() {
        warn!("DATABASE_URL is not set, records are kept in memory only");
        ServiceContext::in_memory(MemoryStore::new(), &config.activity_model)
    } else {
        info!("Connecting to PostgreSQL...");
        let pool = create_pool(&config.database)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        info!("PostgreSQL connection established");

        if config.database.run_migrations {
            run_migrations(&pool)
                .await
                .map_err(|e| AppError::Database(e.to_string()))?;
        }

        ServiceContext::postgres(pool, &config.activity_model)
    };

    info!(
        backend = service_context.backend(),
        model_cache = config.activity_model.cache_enabled,
        "Service context ready"
    );

    Ok(AppState::new(service_context, config))
}

/// Serve `app` on an already bound listener until the process is interrupted
pub async fn serve(listener: TcpListener, app: Router) -> Result<(), AppError> {
    if let Ok(addr) = listener.local_addr() {
        info!("Server listening on http://{}", addr);
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
            info!("Shutdown signal received");
        })
        .await
        .map_err(|e| AppError::Server(e.to_string()))
}

/// Run the HTTP server
pub async fn run_server(app: Router, addr: &str) -> Result<(), AppError> {
    info!("Starting HTTP server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Server(format!("failed to bind to {addr}: {e}")))?;

    serve(listener, app).await
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr = config.api.address();

    let state = create_app_state(config).await?;
    let app = create_app(state);

    run_server(app, &addr).await
}
