//! Route definitions
//!
//! Every route answers with and without a trailing slash.

use axum::{routing::get, Router};

use crate::handlers::{health, statistics, users};
use crate::state::AppState;

/// Create the main router with all routes
pub fn create_router() -> Router<AppState> {
    Router::new().merge(health_routes()).merge(user_routes())
}

/// Health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// User routes
///
/// `/users/statistics` is a static segment and wins over `/users/:user_id`.
fn user_routes() -> Router<AppState> {
    let collection = get(users::list_users).post(users::create_user);
    let stats = get(statistics::get_statistics);
    let item = get(users::get_user)
        .patch(users::update_user)
        .delete(users::delete_user);

    Router::new()
        .route("/users", collection.clone())
        .route("/users/", collection)
        .route("/users/statistics", stats.clone())
        .route("/users/statistics/", stats)
        .route("/users/:user_id", item.clone())
        .route("/users/:user_id/", item)
}
