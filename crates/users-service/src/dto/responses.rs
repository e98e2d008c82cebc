//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output.

use chrono::{DateTime, Utc};
use serde::Serialize;

// ============================================================================
// User Responses
// ============================================================================

/// User as returned by create, update and list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub registration_date: DateTime<Utc>,
}

/// User detail with the predicted activity
#[derive(Debug, Clone, Serialize)]
pub struct UserDetailResponse {
    #[serde(flatten)]
    pub user: UserResponse,
    /// `None` when the user has no activity row
    pub activity_probability_next_month: Option<f64>,
}

/// One page of the user list
#[derive(Debug, Clone, Serialize)]
pub struct UsersPageResponse {
    pub page: u32,
    pub limit: u32,
    pub users: Vec<UserResponse>,
}

/// Aggregate statistics over all users
#[derive(Debug, Clone, Serialize)]
pub struct UserStatisticsResponse {
    pub recent_users_count: i64,
    /// Usernames, longest first
    pub top_users_with_longest_names: Vec<String>,
    /// `None` when no domain was requested
    pub email_domain_percentage: Option<f64>,
}

/// Plain message response
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

// ============================================================================
// Health Responses
// ============================================================================

/// Health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Status of each dependency
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub store: String,
    pub backend: &'static str,
}

impl ReadinessResponse {
    pub fn new(store_ok: bool, backend: &'static str) -> Self {
        Self {
            status: if store_ok { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                store: if store_ok { "ok" } else { "unavailable" }.to_string(),
                backend,
            },
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }
}
