//! Repository traits (ports) - define the interface for data access
//!
//! These traits follow the Repository pattern from Domain-Driven Design.
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::entities::{NewActivity, NewUser, User, UserActivity, UserPatch};
use crate::error::DomainError;
use crate::value_objects::UserId;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// User Repository
// ============================================================================

/// Offset pagination: zero-based `page`, `limit` rows per page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub limit: u32,
}

impl PageRequest {
    pub fn new(page: u32, limit: u32) -> Self {
        Self { page, limit }
    }

    /// Index of the first row of the page
    #[inline]
    pub fn offset(&self) -> u64 {
        u64::from(self.page) * u64::from(self.limit)
    }
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user; the store assigns id and registration date
    async fn create(&self, user: &NewUser) -> RepoResult<User>;

    /// List users ordered by id ascending, restricted to one page
    async fn list(&self, page: PageRequest) -> RepoResult<Vec<User>>;

    /// Find user by ID
    async fn find_by_id(&self, id: UserId) -> RepoResult<Option<User>>;

    /// Apply a partial update and return the stored result
    async fn update(&self, id: UserId, patch: &UserPatch) -> RepoResult<User>;

    /// Delete a user together with its activity rows
    async fn delete(&self, id: UserId) -> RepoResult<()>;

    /// Total number of users
    async fn count_all(&self) -> RepoResult<i64>;

    /// Number of users registered within `[since, until]`
    async fn count_registered_between(
        &self,
        since: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> RepoResult<i64>;

    /// Number of users whose email ends with `suffix` (literal, case-sensitive)
    async fn count_with_email_suffix(&self, suffix: &str) -> RepoResult<i64>;

    /// Users ordered by username length descending, then id ascending
    async fn top_by_name_length(&self, limit: usize) -> RepoResult<Vec<User>>;

    /// Check that the store is reachable
    async fn ping(&self) -> RepoResult<()>;
}

// ============================================================================
// Activity Repository
// ============================================================================

/// Fingerprint of the whole activity table
///
/// Two equal versions mean the classifier would be trained on the same data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TrainingSetVersion {
    pub rows: i64,
    pub max_id: i64,
    pub checksum: i64,
}

impl TrainingSetVersion {
    /// Compute the version of an in-memory set of rows
    pub fn of(activities: &[UserActivity]) -> Self {
        activities.iter().fold(Self::default(), |acc, activity| Self {
            rows: acc.rows + 1,
            max_id: acc.max_id.max(activity.id),
            checksum: acc.checksum.wrapping_add(activity.fingerprint()),
        })
    }
}

/// Activity rows together with the version they were read at
#[derive(Debug, Clone, Default)]
pub struct TrainingSnapshot {
    pub rows: Vec<UserActivity>,
    pub version: TrainingSetVersion,
}

#[async_trait]
pub trait ActivityRepository: Send + Sync {
    /// First activity row of a user (lowest id)
    async fn first_for_user(&self, user_id: UserId) -> RepoResult<Option<UserActivity>>;

    /// Every activity row, ordered by id
    async fn list_all(&self) -> RepoResult<Vec<UserActivity>>;

    /// Insert an activity row; fails with `UserNotFound` for an unknown user
    async fn insert(&self, activity: &NewActivity) -> RepoResult<UserActivity>;

    /// Current fingerprint of the activity table
    async fn training_set_version(&self) -> RepoResult<TrainingSetVersion>;

    /// Every activity row and the table version, read from one consistent view
    async fn training_snapshot(&self) -> RepoResult<TrainingSnapshot>;
}
