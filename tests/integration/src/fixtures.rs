//! Test fixtures and data generators

use std::sync::atomic::{AtomicU64, Ordering};

use anyhow::Result;
use serde::{Deserialize, Serialize};
use users_core::{NewActivity, UserId};
use users_service::ActivityPredictionService;

use crate::helpers::TestServer;

static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// Create user request body
#[derive(Debug, Clone, Serialize)]
pub struct CreateUser {
    pub username: String,
    pub email: String,
}

impl CreateUser {
    pub fn new(username: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
        }
    }

    pub fn unique() -> Self {
        let suffix = unique_suffix();
        Self::new(format!("user{suffix}"), format!("user{suffix}@example.com"))
    }
}

/// User as returned by the API
#[derive(Debug, Clone, Deserialize)]
pub struct UserBody {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub registration_date: String,
}

/// User detail as returned by `GET /users/{id}`
#[derive(Debug, Clone, Deserialize)]
pub struct UserDetailBody {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub activity_probability_next_month: Option<f64>,
}

/// One page of users
#[derive(Debug, Clone, Deserialize)]
pub struct UsersPageBody {
    pub page: u32,
    pub limit: u32,
    pub users: Vec<UserBody>,
}

/// Statistics as returned by `GET /users/statistics`
#[derive(Debug, Clone, Deserialize)]
pub struct StatisticsBody {
    pub recent_users_count: i64,
    pub top_users_with_longest_names: Vec<String>,
    pub email_domain_percentage: Option<f64>,
}

/// `{"error": {...}}`
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorEnvelope {
    pub error: ErrorBody,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
    pub details: Option<serde_json::Value>,
}

/// Store an activity row for `user_id` through the shared service context
pub async fn record_activity(
    server: &TestServer,
    user_id: i64,
    visits: i32,
    next_month_activity: i32,
) -> Result<()> {
    let activity = NewActivity {
        user_id: UserId::new(user_id),
        visits,
        actions: visits * 3,
        session_duration: f64::from(visits) * 1.5,
        next_month_activity,
    };
    ActivityPredictionService::new(server.context())
        .record_activity(&activity)
        .await?;
    Ok(())
}
