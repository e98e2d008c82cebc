//! Activity model -> entity mappers

use users_core::entities::UserActivity;
use users_core::traits::TrainingSetVersion;
use users_core::value_objects::UserId;

use crate::models::{TrainingSetVersionModel, UserActivityModel};

impl From<UserActivityModel> for UserActivity {
    fn from(model: UserActivityModel) -> Self {
        UserActivity {
            id: model.id,
            user_id: UserId::new(model.user_id),
            visits: model.visits,
            actions: model.actions,
            session_duration: model.session_duration,
            next_month_activity: model.next_month_activity,
        }
    }
}

impl From<TrainingSetVersionModel> for TrainingSetVersion {
    fn from(model: TrainingSetVersionModel) -> Self {
        TrainingSetVersion {
            rows: model.row_count,
            max_id: model.max_id,
            checksum: model.checksum,
        }
    }
}
