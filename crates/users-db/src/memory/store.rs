//! Tables behind [`MemoryStore`] and its repository impls

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use tracing::instrument;

use users_core::entities::{NewActivity, NewUser, User, UserActivity, UserPatch};
use users_core::error::DomainError;
use users_core::statistics::by_name_length_desc;
use users_core::traits::{
    ActivityRepository, PageRequest, RepoResult, TrainingSetVersion, TrainingSnapshot,
    UserRepository,
};
use users_core::value_objects::UserId;

#[derive(Debug, Default)]
struct Tables {
    users: BTreeMap<i64, User>,
    activities: BTreeMap<i64, UserActivity>,
    last_user_id: i64,
    last_activity_id: i64,
}

/// Shared in-memory tables; clones see the same data
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a user with an explicit registration date
    pub fn insert_user_at(&self, user: &NewUser, registration_date: DateTime<Utc>) -> User {
        let mut tables = self.inner.write();
        tables.last_user_id += 1;

        let user = User {
            id: UserId::new(tables.last_user_id),
            username: user.username.clone(),
            email: user.email.clone(),
            registration_date,
        };
        tables.users.insert(user.id.into_inner(), user.clone());
        user
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    #[instrument(skip(self))]
    async fn create(&self, user: &NewUser) -> RepoResult<User> {
        Ok(self.insert_user_at(user, Utc::now()))
    }

    #[instrument(skip(self))]
    async fn list(&self, page: PageRequest) -> RepoResult<Vec<User>> {
        let tables = self.inner.read();
        let offset = usize::try_from(page.offset()).unwrap_or(usize::MAX);

        Ok(tables
            .users
            .values()
            .skip(offset)
            .take(page.limit as usize)
            .cloned()
            .collect())
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: UserId) -> RepoResult<Option<User>> {
        Ok(self.inner.read().users.get(&id.into_inner()).cloned())
    }

    #[instrument(skip(self))]
    async fn update(&self, id: UserId, patch: &UserPatch) -> RepoResult<User> {
        let mut tables = self.inner.write();
        let user = tables
            .users
            .get_mut(&id.into_inner())
            .ok_or(DomainError::UserNotFound(id))?;

        user.apply(patch);
        Ok(user.clone())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: UserId) -> RepoResult<()> {
        let mut tables = self.inner.write();
        if tables.users.remove(&id.into_inner()).is_none() {
            return Err(DomainError::UserNotFound(id));
        }
        tables.activities.retain(|_, activity| activity.user_id != id);
        Ok(())
    }

    async fn count_all(&self) -> RepoResult<i64> {
        Ok(self.inner.read().users.len() as i64)
    }

    async fn count_registered_between(
        &self,
        since: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> RepoResult<i64> {
        let tables = self.inner.read();
        let mut count = 0;
        for user in tables.users.values() {
            if user.registration_date >= since && user.registration_date <= until {
                count += 1;
            }
        }
        Ok(count)
    }

    async fn count_with_email_suffix(&self, suffix: &str) -> RepoResult<i64> {
        let tables = self.inner.read();
        let mut count = 0;
        for user in tables.users.values() {
            if user.email_ends_with(suffix) {
                count += 1;
            }
        }
        Ok(count)
    }

    async fn top_by_name_length(&self, limit: usize) -> RepoResult<Vec<User>> {
        let mut users: Vec<User> = self.inner.read().users.values().cloned().collect();
        users.sort_by(by_name_length_desc);
        users.truncate(limit);
        Ok(users)
    }

    async fn ping(&self) -> RepoResult<()> {
        Ok(())
    }
}

#[async_trait]
impl ActivityRepository for MemoryStore {
    #[instrument(skip(self))]
    async fn first_for_user(&self, user_id: UserId) -> RepoResult<Option<UserActivity>> {
        let tables = self.inner.read();
        Ok(tables
            .activities
            .values()
            .find(|activity| activity.user_id == user_id)
            .cloned())
    }

    async fn list_all(&self) -> RepoResult<Vec<UserActivity>> {
        Ok(self.inner.read().activities.values().cloned().collect())
    }

    #[instrument(skip(self))]
    async fn insert(&self, activity: &NewActivity) -> RepoResult<UserActivity> {
        let mut tables = self.inner.write();
        if !tables.users.contains_key(&activity.user_id.into_inner()) {
            return Err(DomainError::UserNotFound(activity.user_id));
        }
        tables.last_activity_id += 1;

        let row = UserActivity {
            id: tables.last_activity_id,
            user_id: activity.user_id,
            visits: activity.visits,
            actions: activity.actions,
            session_duration: activity.session_duration,
            next_month_activity: activity.next_month_activity,
        };
        tables.activities.insert(row.id, row.clone());
        Ok(row)
    }

    async fn training_set_version(&self) -> RepoResult<TrainingSetVersion> {
        let tables = self.inner.read();
        let rows: Vec<UserActivity> = tables.activities.values().cloned().collect();
        Ok(TrainingSetVersion::of(&rows))
    }

    async fn training_snapshot(&self) -> RepoResult<TrainingSnapshot> {
        let rows: Vec<UserActivity> = self.inner.read().activities.values().cloned().collect();
        let version = TrainingSetVersion::of(&rows);
        Ok(TrainingSnapshot { rows, version })
    }
}
