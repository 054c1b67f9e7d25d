use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sqlx::FromRow;

use super::{require_all, required_text, PayloadError};

pub const MAX_USERNAME_LEN: usize = 80;
pub const MAX_EMAIL_LEN: usize = 120;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
}

/// Insert payload for the `user` table; the id is generated by the store
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

    /// Build from a `POST /api/users` body
    pub fn from_payload(body: &Map<String, Value>) -> Result<Self, PayloadError> {
        require_all(body, &["username", "email"])?;
        Ok(Self {
            username: required_text(body, "username")?,
            email: required_text(body, "email")?,
        })
    }
}
