//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize` and `Validate` for input validation.

use serde::Deserialize;
use validator::Validate;

use users_core::entities::{NewUser, UserPatch};
use users_core::traits::PageRequest;
use users_core::value_objects::Patch;

/// Default page size of the user list
pub const DEFAULT_PAGE_LIMIT: u32 = 10;
/// Maximum page size of the user list
pub const MAX_PAGE_LIMIT: u32 = 100;

// ============================================================================
// User Requests
// ============================================================================

/// Create user request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 1, message = "Username must not be empty"))]
    pub username: String,

    #[validate(length(min = 1, message = "Email must not be empty"))]
    pub email: String,
}

impl From<CreateUserRequest> for NewUser {
    fn from(request: CreateUserRequest) -> Self {
        NewUser::new(request.username, request.email)
    }
}

/// Partial update request; missing or null fields are left unchanged
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, message = "Username must not be empty"))]
    pub username: Option<String>,

    #[validate(length(min = 1, message = "Email must not be empty"))]
    pub email: Option<String>,
}

impl From<UpdateUserRequest> for UserPatch {
    fn from(request: UpdateUserRequest) -> Self {
        UserPatch {
            username: Patch::from(request.username),
            email: Patch::from(request.email),
        }
    }
}

// ============================================================================
// Query Parameters
// ============================================================================

/// Offset pagination query of the user list
#[derive(Debug, Clone, Copy, Deserialize, Validate)]
pub struct ListUsersQuery {
    #[serde(default)]
    pub page: u32,

    #[serde(default = "default_limit")]
    #[validate(range(min = 1, max = 100, message = "Limit must be between 1 and 100"))]
    pub limit: u32,
}

fn default_limit() -> u32 {
    DEFAULT_PAGE_LIMIT
}

impl Default for ListUsersQuery {
    fn default() -> Self {
        Self {
            page: 0,
            limit: DEFAULT_PAGE_LIMIT,
        }
    }
}

impl From<ListUsersQuery> for PageRequest {
    fn from(query: ListUsersQuery) -> Self {
        PageRequest::new(query.page, query.limit.min(MAX_PAGE_LIMIT))
    }
}

/// Statistics query
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatisticsQuery {
    /// Email domain without the `@`
    pub domain: Option<String>,
}
