//! User entity - a registered account

use chrono::{DateTime, Utc};

use crate::value_objects::{Patch, UserId};

/// User entity
///
/// `id` and `registration_date` are assigned by the store on creation and
/// never change afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub registration_date: DateTime<Utc>,
}

impl User {
    /// Username length in characters (not bytes)
    #[inline]
    pub fn name_length(&self) -> usize {
        self.username.chars().count()
    }

    /// Case-sensitive literal check that the email ends with `suffix`
    #[inline]
    pub fn email_ends_with(&self, suffix: &str) -> bool {
        self.email.ends_with(suffix)
    }

    /// Apply a partial update. Returns whether any field was written.
    pub fn apply(&mut self, patch: &UserPatch) -> bool {
        let username = patch.username.apply_to(&mut self.username);
        let email = patch.email.apply_to(&mut self.email);
        username || email
    }
}

/// Fields supplied by the caller when creating a user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub email: String,
}

impl NewUser {
    pub fn new(username: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
        }
    }
}

/// Partial update of a user
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserPatch {
    pub username: Patch<String>,
    pub email: Patch<String>,
}

impl UserPatch {
    /// Check if the patch changes nothing
    pub fn is_empty(&self) -> bool {
        self.username.is_absent() && self.email.is_absent()
    }

    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Patch::Set(username.into());
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Patch::Set(email.into());
        self
    }
}
