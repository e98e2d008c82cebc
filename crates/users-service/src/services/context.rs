//! Service context - dependency container for services
//!
//! Holds the repositories, the optional database pool and the activity model
//! cache. Cloning is cheap; every clone shares the same store and cache.

use std::sync::Arc;

use users_common::ActivityModelConfig;
use users_core::traits::{ActivityRepository, UserRepository};
use users_db::{MemoryStore, PgActivityRepository, PgPool, PgUserRepository};

use super::error::{ServiceError, ServiceResult};
use super::model_cache::ActivityModelCache;

/// Service context containing all dependencies
#[derive(Clone)]
pub struct ServiceContext {
    // Database pool, absent on the in-memory backend
    pool: Option<PgPool>,

    // Repositories
    user_repo: Arc<dyn UserRepository>,
    activity_repo: Arc<dyn ActivityRepository>,

    model_cache: Arc<ActivityModelCache>,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    pub fn new(
        pool: Option<PgPool>,
        user_repo: Arc<dyn UserRepository>,
        activity_repo: Arc<dyn ActivityRepository>,
        model_cache: Arc<ActivityModelCache>,
    ) -> Self {
        Self {
            pool,
            user_repo,
            activity_repo,
            model_cache,
        }
    }

    /// Context backed by PostgreSQL
    pub fn postgres(pool: PgPool, model: &ActivityModelConfig) -> Self {
        Self::new(
            Some(pool.clone()),
            Arc::new(PgUserRepository::new(pool.clone())),
            Arc::new(PgActivityRepository::new(pool)),
            Arc::new(ActivityModelCache::from_config(model)),
        )
    }

    /// Context backed by an in-memory store
    pub fn in_memory(store: MemoryStore, model: &ActivityModelConfig) -> Self {
        Self::new(
            None,
            Arc::new(store.clone()),
            Arc::new(store),
            Arc::new(ActivityModelCache::from_config(model)),
        )
    }

    // === Database Pool ===

    /// Get the PostgreSQL connection pool, if any
    pub fn pool(&self) -> Option<&PgPool> {
        self.pool.as_ref()
    }

    /// Name of the storage backend
    pub fn backend(&self) -> &'static str {
        if self.pool.is_some() {
            "postgres"
        } else {
            "memory"
        }
    }

    // === Repositories ===

    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    pub fn activity_repo(&self) -> &dyn ActivityRepository {
        self.activity_repo.as_ref()
    }

    // === Activity Model ===

    pub fn model_cache(&self) -> &ActivityModelCache {
        self.model_cache.as_ref()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("backend", &self.backend())
            .field("repositories", &"...")
            .field("model_cache", &self.model_cache)
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
#[derive(Default)]
pub struct ServiceContextBuilder {
    pool: Option<PgPool>,
    user_repo: Option<Arc<dyn UserRepository>>,
    activity_repo: Option<Arc<dyn ActivityRepository>>,
    model_cache: Option<Arc<ActivityModelCache>>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pool(mut self, pool: PgPool) -> Self {
        self.pool = Some(pool);
        self
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn activity_repo(mut self, repo: Arc<dyn ActivityRepository>) -> Self {
        self.activity_repo = Some(repo);
        self
    }

    pub fn model_cache(mut self, cache: Arc<ActivityModelCache>) -> Self {
        self.model_cache = Some(cache);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if a repository is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        Ok(ServiceContext::new(
            self.pool,
            self.user_repo
                .ok_or_else(|| ServiceError::validation("user_repo is required"))?,
            self.activity_repo
                .ok_or_else(|| ServiceError::validation("activity_repo is required"))?,
            self.model_cache.unwrap_or_default(),
        ))
    }
}
