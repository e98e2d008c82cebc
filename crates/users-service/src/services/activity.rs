//! Activity prediction service
//!
//! Trains the activity classifier on the whole `user_activity` table and
//! scores a user's first activity row. Fitted models are reused through the
//! context's [`ActivityModelCache`](super::ActivityModelCache).

use std::sync::Arc;

use tracing::{info, instrument};

use users_core::classifier::{ActivityFeatures, ActivityModel, TrainingReport};
use users_core::entities::{NewActivity, UserActivity};
use users_core::error::DomainError;
use users_core::value_objects::UserId;

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::model_cache::CachedModel;

/// Activity prediction service
pub struct ActivityPredictionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ActivityPredictionService<'a> {
    /// Create a new ActivityPredictionService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Model for the current activity table, trained on demand
    #[instrument(skip(self))]
    pub async fn model(&self) -> ServiceResult<Arc<ActivityModel>> {
        let version = self.ctx.activity_repo().training_set_version().await?;
        if let Some(model) = self.ctx.model_cache().get(version) {
            return Ok(model);
        }

        // The table may have moved on since `version` was read; key the
        // model on the version of the rows it is actually fitted on
        let snapshot = self.ctx.activity_repo().training_snapshot().await?;
        let version = snapshot.version;
        let (model, report) = self.fit(snapshot.rows).await?;
        self.ctx.model_cache().store(CachedModel {
            version,
            model: Arc::clone(&model),
            report,
        });
        Ok(model)
    }

    /// Fit a fresh model on every activity row, bypassing the cache
    #[instrument(skip(self))]
    pub async fn train(&self) -> ServiceResult<(Arc<ActivityModel>, TrainingReport)> {
        let snapshot = self.ctx.activity_repo().training_snapshot().await?;
        self.fit(snapshot.rows).await
    }

    async fn fit(
        &self,
        rows: Vec<UserActivity>,
    ) -> ServiceResult<(Arc<ActivityModel>, TrainingReport)> {
        let classifier = self.ctx.model_cache().classifier().clone();

        // CPU-bound; keep it off the async workers
        let (model, report) = tokio::task::spawn_blocking(move || classifier.train(&rows))
            .await
            .map_err(|e| ServiceError::internal(format!("training task failed: {e}")))?
            .map_err(DomainError::from)?;

        Ok((Arc::new(model), report))
    }

    /// Probability that a user with these features is active next month
    pub async fn predict(&self, features: &ActivityFeatures) -> ServiceResult<f64> {
        let model = self.model().await?;
        Ok(model.predict_probability(features))
    }

    /// Probability for a user's first activity row; `None` without one
    #[instrument(skip(self))]
    pub async fn predict_for_user(&self, user_id: UserId) -> ServiceResult<Option<f64>> {
        let Some(activity) = self.ctx.activity_repo().first_for_user(user_id).await? else {
            return Ok(None);
        };
        self.predict(&activity.features()).await.map(Some)
    }

    /// Store an activity row and drop the cached model
    #[instrument(skip(self))]
    pub async fn record_activity(&self, activity: &NewActivity) -> ServiceResult<UserActivity> {
        let row = self.ctx.activity_repo().insert(activity).await?;
        self.ctx.model_cache().invalidate();

        info!(activity_id = row.id, user_id = %row.user_id, "Activity recorded");
        Ok(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};

    use async_trait::async_trait;
    use users_common::ActivityModelConfig;
    use users_core::entities::NewUser;
    use users_core::traits::{
        ActivityRepository, RepoResult, TrainingSetVersion, TrainingSnapshot, UserRepository,
    };
    use users_db::MemoryStore;

    use crate::services::context::ServiceContextBuilder;
    use crate::services::model_cache::ActivityModelCache;

    /// Activity repository that lets another writer land right before the
    /// first training read
    struct ConcurrentWriter {
        store: MemoryStore,
        writer: UserId,
        fired: AtomicBool,
    }

    impl ConcurrentWriter {
        async fn write_once(&self) {
            if self.fired.swap(true, Ordering::SeqCst) {
                return;
            }
            for i in 0..30 {
                self.store
                    .insert(&NewActivity {
                        user_id: self.writer,
                        visits: 100 + i,
                        actions: i,
                        session_duration: 0.5,
                        next_month_activity: i % 2,
                    })
                    .await
                    .unwrap();
            }
        }
    }

    #[async_trait]
    impl ActivityRepository for ConcurrentWriter {
        async fn first_for_user(&self, user_id: UserId) -> RepoResult<Option<UserActivity>> {
            self.store.first_for_user(user_id).await
        }

        async fn list_all(&self) -> RepoResult<Vec<UserActivity>> {
            self.write_once().await;
            self.store.list_all().await
        }

        async fn insert(&self, activity: &NewActivity) -> RepoResult<UserActivity> {
            self.store.insert(activity).await
        }

        async fn training_set_version(&self) -> RepoResult<TrainingSetVersion> {
            self.store.training_set_version().await
        }

        async fn training_snapshot(&self) -> RepoResult<TrainingSnapshot> {
            self.write_once().await;
            self.store.training_snapshot().await
        }
    }

    fn config(cache_enabled: bool) -> ActivityModelConfig {
        ActivityModelConfig {
            cache_enabled,
            trees: 10,
            seed: 42,
        }
    }

    async fn seeded(cache_enabled: bool) -> (ServiceContext, UserId) {
        let store = MemoryStore::new();
        let ctx = ServiceContext::in_memory(store.clone(), &config(cache_enabled));
        let user = store
            .insert_user_at(&NewUser::new("scored", "s@example.com"), chrono::Utc::now());

        let service = ActivityPredictionService::new(&ctx);
        for i in 0..20 {
            service
                .record_activity(&NewActivity {
                    user_id: user.id,
                    visits: i,
                    actions: i * 3,
                    session_duration: f64::from(i) * 2.0,
                    next_month_activity: i32::from(i >= 10),
                })
                .await
                .unwrap();
        }
        (ctx, user.id)
    }

    #[tokio::test]
    async fn test_predict_for_user_in_unit_interval() {
        let (ctx, user_id) = seeded(true).await;
        let p = ActivityPredictionService::new(&ctx)
            .predict_for_user(user_id)
            .await
            .unwrap()
            .unwrap();
        assert!((0.0..=1.0).contains(&p));
    }

    #[tokio::test]
    async fn test_user_without_activity_has_no_probability() {
        let (ctx, _) = seeded(true).await;
        let p = ActivityPredictionService::new(&ctx)
            .predict_for_user(UserId::new(999))
            .await
            .unwrap();
        assert!(p.is_none());
    }

    #[tokio::test]
    async fn test_model_is_cached_until_data_changes() {
        let (ctx, user_id) = seeded(true).await;
        let service = ActivityPredictionService::new(&ctx);

        let first = service.model().await.unwrap();
        let second = service.model().await.unwrap();
        assert!(Arc::ptr_eq(&first, &second));

        service
            .record_activity(&NewActivity {
                user_id,
                visits: 50,
                actions: 50,
                session_duration: 50.0,
                next_month_activity: 1,
            })
            .await
            .unwrap();
        assert!(ctx.model_cache().cached_version().is_none());

        let third = service.model().await.unwrap();
        assert!(!Arc::ptr_eq(&second, &third));
    }

    #[tokio::test]
    async fn test_cache_notices_writes_that_bypass_the_service() {
        let (ctx, user_id) = seeded(true).await;
        let service = ActivityPredictionService::new(&ctx);
        let first = service.model().await.unwrap();

        ctx.activity_repo()
            .insert(&NewActivity {
                user_id,
                visits: 1,
                actions: 1,
                session_duration: 1.0,
                next_month_activity: 0,
            })
            .await
            .unwrap();

        let second = service.model().await.unwrap();
        assert!(!Arc::ptr_eq(&first, &second));
    }

    #[tokio::test]
    async fn test_disabled_cache_retrains_every_time() {
        let (ctx, _) = seeded(false).await;
        let service = ActivityPredictionService::new(&ctx);

        let first = service.model().await.unwrap();
        let second = service.model().await.unwrap();
        assert!(!Arc::ptr_eq(&first, &second));
    }

    #[tokio::test]
    async fn test_retraining_is_deterministic() {
        let (ctx, user_id) = seeded(false).await;
        let service = ActivityPredictionService::new(&ctx);

        let a = service.predict_for_user(user_id).await.unwrap();
        let b = service.predict_for_user(user_id).await.unwrap();
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn test_single_class_is_degenerate() {
        let store = MemoryStore::new();
        let ctx = ServiceContext::in_memory(store.clone(), &config(true));
        let user = store.insert_user_at(&NewUser::new("one", "o@example.com"), chrono::Utc::now());
        for visits in 0..5 {
            store
                .insert(&NewActivity {
                    user_id: user.id,
                    visits,
                    actions: 1,
                    session_duration: 1.0,
                    next_month_activity: 1,
                })
                .await
                .unwrap();
        }

        let err = ActivityPredictionService::new(&ctx)
            .predict_for_user(user.id)
            .await
            .unwrap_err();
        assert!(err.is_degenerate_training_set());
    }

    async fn seed_rows(store: &MemoryStore) -> UserId {
        let user = store.insert_user_at(&NewUser::new("scored", "s@example.com"), chrono::Utc::now());
        for i in 0..20 {
            store
                .insert(&NewActivity {
                    user_id: user.id,
                    visits: i,
                    actions: i * 3,
                    session_duration: f64::from(i) * 2.0,
                    next_month_activity: i32::from(i >= 10),
                })
                .await
                .unwrap();
        }
        user.id
    }

    #[tokio::test]
    async fn test_model_is_keyed_on_the_rows_it_was_trained_on() {
        let store = MemoryStore::new();
        let owner = seed_rows(&store).await;
        let writer = store.insert_user_at(&NewUser::new("writer", "w@example.com"), chrono::Utc::now());
        let initial = store.training_set_version().await.unwrap();

        let ctx = ServiceContextBuilder::new()
            .user_repo(Arc::new(store.clone()))
            .activity_repo(Arc::new(ConcurrentWriter {
                store: store.clone(),
                writer: writer.id,
                fired: AtomicBool::new(false),
            }))
            .model_cache(Arc::new(ActivityModelCache::from_config(&config(true))))
            .build()
            .unwrap();
        let service = ActivityPredictionService::new(&ctx);

        let first = service.model().await.unwrap();
        let cached = ctx.model_cache().cached_version().unwrap();
        assert_eq!(cached.rows, 50);
        assert_eq!(cached, store.training_set_version().await.unwrap());

        // Dropping the concurrent rows restores the initial table exactly
        store.delete(writer.id).await.unwrap();
        assert_eq!(store.training_set_version().await.unwrap(), initial);

        let second = service.model().await.unwrap();
        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(ctx.model_cache().cached_version(), Some(initial));

        // Same rows in an untouched store give the same model
        let reference = MemoryStore::new();
        seed_rows(&reference).await;
        let reference_ctx = ServiceContext::in_memory(reference, &config(true));
        let fresh = ActivityPredictionService::new(&reference_ctx).model().await.unwrap();

        let features = store.first_for_user(owner).await.unwrap().unwrap().features();
        assert_eq!(
            second.predict_probability(&features),
            fresh.predict_probability(&features)
        );
    }
}
