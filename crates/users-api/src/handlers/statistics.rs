//! Population statistics handler

use axum::{extract::State, Json};
use chrono::Utc;
use users_service::dto::{StatisticsQuery, UserStatisticsResponse};
use users_service::StatisticsService;

use crate::extractors::QueryParams;
use crate::response::ApiResult;
use crate::state::AppState;

/// Recent registrations, longest usernames and the share of an email domain
///
/// GET /users/statistics?domain=...
pub async fn get_statistics(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<StatisticsQuery>,
) -> ApiResult<Json<UserStatisticsResponse>> {
    let service = StatisticsService::new(state.service_context());
    let response = service.summary(query.domain.as_deref(), Utc::now()).await?;
    Ok(Json(response))
}
