//! PostgreSQL implementation of ActivityRepository

use async_trait::async_trait;
use sqlx::{PgExecutor, PgPool};
use tracing::instrument;

use users_core::entities::{NewActivity, UserActivity};
use users_core::traits::{ActivityRepository, RepoResult, TrainingSetVersion, TrainingSnapshot};
use users_core::value_objects::UserId;

use crate::models::{TrainingSetVersionModel, UserActivityModel};

use super::error::{map_db_error, map_foreign_key_violation, user_not_found};

/// PostgreSQL implementation of ActivityRepository
#[derive(Clone)]
pub struct PgActivityRepository {
    pool: PgPool,
}

impl PgActivityRepository {
    /// Create a new PgActivityRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

async fn select_all<'e>(executor: impl PgExecutor<'e>) -> RepoResult<Vec<UserActivity>> {
    let rows = sqlx::query_as::<_, UserActivityModel>(
        r"
        SELECT id, user_id, visits, actions, session_duration, next_month_activity
        FROM user_activity
        ORDER BY id ASC
        ",
    )
    .fetch_all(executor)
    .await
    .map_err(map_db_error)?;

    Ok(rows.into_iter().map(UserActivity::from).collect())
}

async fn select_version<'e>(executor: impl PgExecutor<'e>) -> RepoResult<TrainingSetVersion> {
    // Mirrors UserActivity::fingerprint
    let row = sqlx::query_as::<_, TrainingSetVersionModel>(
        r"
        SELECT
            COUNT(*)::BIGINT AS row_count,
            COALESCE(MAX(id), 0)::BIGINT AS max_id,
            COALESCE(SUM(
                (id * 1000003
                 + visits::BIGINT * 8191
                 + actions::BIGINT * 131
                 + next_month_activity::BIGINT * 7
                 + ROUND(session_duration * 1000)::BIGINT) % 2147483647
            ), 0)::BIGINT AS checksum
        FROM user_activity
        ",
    )
    .fetch_one(executor)
    .await
    .map_err(map_db_error)?;

    Ok(TrainingSetVersion::from(row))
}

#[async_trait]
impl ActivityRepository for PgActivityRepository {
    #[instrument(skip(self))]
    async fn first_for_user(&self, user_id: UserId) -> RepoResult<Option<UserActivity>> {
        let result = sqlx::query_as::<_, UserActivityModel>(
            r"
            SELECT id, user_id, visits, actions, session_duration, next_month_activity
            FROM user_activity
            WHERE user_id = $1
            ORDER BY id ASC
            LIMIT 1
            ",
        )
        .bind(user_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(UserActivity::from))
    }

    #[instrument(skip(self))]
    async fn list_all(&self) -> RepoResult<Vec<UserActivity>> {
        select_all(&self.pool).await
    }

    #[instrument(skip(self))]
    async fn insert(&self, activity: &NewActivity) -> RepoResult<UserActivity> {
        let row = sqlx::query_as::<_, UserActivityModel>(
            r"
            INSERT INTO user_activity (user_id, visits, actions, session_duration, next_month_activity)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, user_id, visits, actions, session_duration, next_month_activity
            ",
        )
        .bind(activity.user_id.into_inner())
        .bind(activity.visits)
        .bind(activity.actions)
        .bind(activity.session_duration)
        .bind(activity.next_month_activity)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_foreign_key_violation(e, || user_not_found(activity.user_id)))?;

        Ok(UserActivity::from(row))
    }

    #[instrument(skip(self))]
    async fn training_set_version(&self) -> RepoResult<TrainingSetVersion> {
        select_version(&self.pool).await
    }

    #[instrument(skip(self))]
    async fn training_snapshot(&self) -> RepoResult<TrainingSnapshot> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;
        // Both reads must see the same table
        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ READ ONLY")
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

        let rows = select_all(&mut *tx).await?;
        let version = select_version(&mut *tx).await?;
        tx.commit().await.map_err(map_db_error)?;

        Ok(TrainingSnapshot { rows, version })
    }
}
