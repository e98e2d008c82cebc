//! Activity database models

use sqlx::FromRow;

/// Database model for user_activity table
#[derive(Debug, Clone, FromRow)]
pub struct UserActivityModel {
    pub id: i64,
    pub user_id: i64,
    pub visits: i32,
    pub actions: i32,
    pub session_duration: f64,
    pub next_month_activity: i32,
}

/// Aggregate row describing the whole user_activity table
#[derive(Debug, Clone, Copy, FromRow)]
pub struct TrainingSetVersionModel {
    pub row_count: i64,
    pub max_id: i64,
    pub checksum: i64,
}
