//! User service
//!
//! CRUD over users plus the detail view with the predicted activity.

use tracing::{info, instrument, warn};

use users_core::entities::{NewUser, User, UserPatch};
use users_core::error::DomainError;
use users_core::traits::PageRequest;
use users_core::value_objects::UserId;

use crate::dto::{
    CreateUserRequest, ListUsersQuery, MessageResponse, UpdateUserRequest, UserDetailResponse,
    UserResponse, UsersPageResponse,
};

use super::activity::ActivityPredictionService;
use super::context::ServiceContext;
use super::error::ServiceResult;

/// User service
pub struct UserService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> UserService<'a> {
    /// Create a new UserService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create a user; id and registration date come from the store
    #[instrument(skip(self, request))]
    pub async fn create_user(&self, request: CreateUserRequest) -> ServiceResult<UserResponse> {
        let user = self.ctx.user_repo().create(&NewUser::from(request)).await?;

        info!(user_id = %user.id, "User created");
        Ok(UserResponse::from(user))
    }

    /// One page of users ordered by id
    #[instrument(skip(self))]
    pub async fn list_users(&self, query: ListUsersQuery) -> ServiceResult<UsersPageResponse> {
        let page = PageRequest::from(query);
        let users = self.ctx.user_repo().list(page).await?;

        Ok(UsersPageResponse {
            page: page.page,
            limit: page.limit,
            users: users.into_iter().map(UserResponse::from).collect(),
        })
    }

    /// Get user entity by ID
    #[instrument(skip(self))]
    pub async fn get_user_entity(&self, user_id: UserId) -> ServiceResult<User> {
        Ok(self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::UserNotFound(user_id))?)
    }

    /// Get user by ID
    pub async fn get_user(&self, user_id: UserId) -> ServiceResult<UserResponse> {
        self.get_user_entity(user_id).await.map(UserResponse::from)
    }

    /// User with the probability of being active next month
    ///
    /// The probability is `None` when the user has no activity row, or when
    /// the stored activity cannot train a model.
    #[instrument(skip(self))]
    pub async fn get_user_detail(&self, user_id: UserId) -> ServiceResult<UserDetailResponse> {
        let user = self.get_user_entity(user_id).await?;

        let probability = match ActivityPredictionService::new(self.ctx)
            .predict_for_user(user_id)
            .await
        {
            Ok(probability) => probability,
            Err(e) if e.is_degenerate_training_set() => {
                warn!(user_id = %user_id, error = %e, "Activity model unavailable");
                None
            }
            Err(e) => return Err(e),
        };

        Ok(UserDetailResponse::new(&user, probability))
    }

    /// Apply a partial update
    #[instrument(skip(self, request))]
    pub async fn update_user(
        &self,
        user_id: UserId,
        request: UpdateUserRequest,
    ) -> ServiceResult<UserResponse> {
        let patch = UserPatch::from(request);
        let user = self.ctx.user_repo().update(user_id, &patch).await?;

        if !patch.is_empty() {
            info!(user_id = %user_id, "User updated");
        }
        Ok(UserResponse::from(user))
    }

    /// Delete a user and its activity rows
    #[instrument(skip(self))]
    pub async fn delete_user(&self, user_id: UserId) -> ServiceResult<MessageResponse> {
        self.ctx.user_repo().delete(user_id).await?;

        info!(user_id = %user_id, "User deleted");
        Ok(MessageResponse::new("User deleted successfully"))
    }
}
