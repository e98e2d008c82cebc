//! Versioned cache of the fitted activity model
//!
//! A cached model is served only while the store reports the same
//! [`TrainingSetVersion`] it was trained on. [`ActivityModelCache::invalidate`]
//! drops it unconditionally.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::debug;

use users_common::ActivityModelConfig;
use users_core::classifier::{ActivityClassifier, ActivityModel, ForestParams, TrainingReport};
use users_core::traits::TrainingSetVersion;

/// Model fitted on one version of the activity table
#[derive(Debug, Clone)]
pub struct CachedModel {
    pub version: TrainingSetVersion,
    pub model: Arc<ActivityModel>,
    pub report: TrainingReport,
}

#[derive(Debug)]
pub struct ActivityModelCache {
    classifier: ActivityClassifier,
    enabled: bool,
    slot: Mutex<Option<CachedModel>>,
}

impl ActivityModelCache {
    pub fn new(classifier: ActivityClassifier, enabled: bool) -> Self {
        Self {
            classifier,
            enabled,
            slot: Mutex::new(None),
        }
    }

    pub fn from_config(config: &ActivityModelConfig) -> Self {
        let params = ForestParams {
            n_trees: config.trees,
            seed: config.seed,
            ..ForestParams::default()
        };
        Self::new(ActivityClassifier::new(params), config.cache_enabled)
    }

    pub fn classifier(&self) -> &ActivityClassifier {
        &self.classifier
    }

    /// With caching disabled every lookup misses
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Model trained on exactly `version`, if cached
    pub fn get(&self, version: TrainingSetVersion) -> Option<Arc<ActivityModel>> {
        if !self.enabled {
            return None;
        }
        let slot = self.slot.lock();
        match slot.as_ref() {
            Some(cached) if cached.version == version => Some(Arc::clone(&cached.model)),
            Some(cached) => {
                debug!(cached = ?cached.version, current = ?version, "Activity model is stale");
                None
            }
            None => None,
        }
    }

    /// Remember a freshly trained model
    pub fn store(&self, cached: CachedModel) {
        if self.enabled {
            *self.slot.lock() = Some(cached);
        }
    }

    /// Drop the cached model
    pub fn invalidate(&self) {
        if self.slot.lock().take().is_some() {
            debug!("Activity model invalidated");
        }
    }

    /// Version of the cached model, if any
    pub fn cached_version(&self) -> Option<TrainingSetVersion> {
        self.slot.lock().as_ref().map(|cached| cached.version)
    }
}

impl Default for ActivityModelCache {
    fn default() -> Self {
        Self::from_config(&ActivityModelConfig::default())
    }
}
