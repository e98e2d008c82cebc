//! User activity entity - behavioural sample used to train the activity classifier

use crate::classifier::ActivityFeatures;
use crate::value_objects::UserId;

/// One row of the `user_activity` table
#[derive(Debug, Clone, PartialEq)]
pub struct UserActivity {
    pub id: i64,
    pub user_id: UserId,
    pub visits: i32,
    pub actions: i32,
    pub session_duration: f64,
    /// 1 - active next month, 0 - inactive
    pub next_month_activity: i32,
}

impl UserActivity {
    /// Feature triple fed to the classifier
    pub fn features(&self) -> ActivityFeatures {
        ActivityFeatures {
            visits: self.visits,
            actions: self.actions,
            session_duration: self.session_duration,
        }
    }

    /// Stable per-row fingerprint, summed into the training-set version
    ///
    /// Must stay in sync with the SQL expression in `users-db`.
    pub fn fingerprint(&self) -> i64 {
        let duration_millis = (self.session_duration * 1000.0).round() as i64;
        self.id
            .wrapping_mul(1_000_003)
            .wrapping_add(i64::from(self.visits).wrapping_mul(8191))
            .wrapping_add(i64::from(self.actions).wrapping_mul(131))
            .wrapping_add(i64::from(self.next_month_activity).wrapping_mul(7))
            .wrapping_add(duration_millis)
            % 2_147_483_647
    }
}

/// Activity row to insert (seeding and tests)
#[derive(Debug, Clone, PartialEq)]
pub struct NewActivity {
    pub user_id: UserId,
    pub visits: i32,
    pub actions: i32,
    pub session_duration: f64,
    pub next_month_activity: i32,
}
