//! Entity to DTO mappers

use users_core::entities::User;

use super::responses::{UserDetailResponse, UserResponse};

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.into_inner(),
            username: user.username.clone(),
            email: user.email.clone(),
            registration_date: user.registration_date,
        }
    }
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.into_inner(),
            username: user.username,
            email: user.email,
            registration_date: user.registration_date,
        }
    }
}

impl UserDetailResponse {
    pub fn new(user: &User, activity_probability_next_month: Option<f64>) -> Self {
        Self {
            user: UserResponse::from(user),
            activity_probability_next_month,
        }
    }
}
