//! User model -> entity mapper

use users_core::entities::User;
use users_core::value_objects::UserId;

use crate::models::UserModel;

impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        User {
            id: UserId::new(model.id),
            username: model.username,
            email: model.email,
            registration_date: model.registration_date,
        }
    }
}
