//! Statistics aggregator
//!
//! Read-only aggregates over the user population.

use chrono::{DateTime, Utc};
use tracing::instrument;

use users_core::entities::User;
use users_core::statistics::{email_domain_suffix, percentage, recent_window, DEFAULT_TOP_USERS};

use crate::dto::UserStatisticsResponse;

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Statistics service
pub struct StatisticsService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> StatisticsService<'a> {
    /// Create a new StatisticsService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Users registered from the start of the day seven days before `now` up to `now`
    #[instrument(skip(self))]
    pub async fn count_recent(&self, now: DateTime<Utc>) -> ServiceResult<i64> {
        let (since, until) = recent_window(now);
        Ok(self
            .ctx
            .user_repo()
            .count_registered_between(since, until)
            .await?)
    }

    /// Up to `n` users with the longest usernames
    #[instrument(skip(self))]
    pub async fn top_by_name_length(&self, n: usize) -> ServiceResult<Vec<User>> {
        Ok(self.ctx.user_repo().top_by_name_length(n).await?)
    }

    /// Share of users whose email ends with `@domain`, in percent
    #[instrument(skip(self))]
    pub async fn email_domain_percentage(&self, domain: &str) -> ServiceResult<f64> {
        let repo = self.ctx.user_repo();
        let total = repo.count_all().await?;
        if total == 0 {
            return Ok(0.0);
        }
        let matching = repo.count_with_email_suffix(&email_domain_suffix(domain)).await?;
        Ok(percentage(matching, total))
    }

    /// All statistics; the percentage is omitted without a non-empty domain
    pub async fn summary(
        &self,
        domain: Option<&str>,
        now: DateTime<Utc>,
    ) -> ServiceResult<UserStatisticsResponse> {
        let recent_users_count = self.count_recent(now).await?;
        let top = self.top_by_name_length(DEFAULT_TOP_USERS).await?;

        let email_domain_percentage = match domain.filter(|d| !d.is_empty()) {
            Some(domain) => Some(self.email_domain_percentage(domain).await?),
            None => None,
        };

        Ok(UserStatisticsResponse {
            recent_users_count,
            top_users_with_longest_names: top.into_iter().map(|u| u.username).collect(),
            email_domain_percentage,
        })
    }
}
