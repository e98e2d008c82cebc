//! User handlers
//!
//! CRUD endpoints of the user registry.

use axum::{extract::State, Json};
use users_service::dto::{
    CreateUserRequest, ListUsersQuery, MessageResponse, UpdateUserRequest, UserDetailResponse,
    UserResponse, UsersPageResponse,
};
use users_service::UserService;

use crate::extractors::{UserIdPath, ValidatedJson, ValidatedQuery};
use crate::response::ApiResult;
use crate::state::AppState;

/// Create a user
///
/// POST /users
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateUserRequest>,
) -> ApiResult<Json<UserResponse>> {
    let service = UserService::new(state.service_context());
    let response = service.create_user(request).await?;
    Ok(Json(response))
}

/// List users ordered by id
///
/// GET /users?page=0&limit=10
pub async fn list_users(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<ListUsersQuery>,
) -> ApiResult<Json<UsersPageResponse>> {
    let service = UserService::new(state.service_context());
    let response = service.list_users(query).await?;
    Ok(Json(response))
}

/// Get a user with the predicted probability of activity next month
///
/// GET /users/{user_id}
pub async fn get_user(
    State(state): State<AppState>,
    UserIdPath(user_id): UserIdPath,
) -> ApiResult<Json<UserDetailResponse>> {
    let service = UserService::new(state.service_context());
    let response = service.get_user_detail(user_id).await?;
    Ok(Json(response))
}

/// Partially update a user
///
/// PATCH /users/{user_id}
pub async fn update_user(
    State(state): State<AppState>,
    UserIdPath(user_id): UserIdPath,
    ValidatedJson(request): ValidatedJson<UpdateUserRequest>,
) -> ApiResult<Json<UserResponse>> {
    let service = UserService::new(state.service_context());
    let response = service.update_user(user_id, request).await?;
    Ok(Json(response))
}

/// Delete a user and its activity rows
///
/// DELETE /users/{user_id}
pub async fn delete_user(
    State(state): State<AppState>,
    UserIdPath(user_id): UserIdPath,
) -> ApiResult<Json<MessageResponse>> {
    let service = UserService::new(state.service_context());
    let response = service.delete_user(user_id).await?;
    Ok(Json(response))
}
