//! User model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::error::AppResult;

use super::ensure_present;

/// User account from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct User {
    pub id: String,
    pub name: String,
    /// Login (email-shaped), unique
    pub login: String,
    /// Hashed password (argon2)
    #[serde(skip_serializing)]
    pub password: String,
    /// Deleted users are only deactivated
    #[sqlx(rename = "isactive")]
    pub is_active: bool,
}

/// Body of `POST /users` and `PUT /users/{id}`
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UserRequest {
    pub name: Option<String>,
    #[validate(length(min = 3, message = "Login must be at least 3 characters"))]
    pub login: Option<String>,
    #[validate(length(min = 4, message = "Password must be at least 4 characters"))]
    pub password: Option<String>,
}

/// Complete user fields, password still in clear text
#[derive(Debug, Clone)]
pub struct UserFields {
    pub name: String,
    pub login: String,
    pub password: String,
}

impl UserRequest {
    pub fn into_fields(self) -> AppResult<UserFields> {
        ensure_present(&[
            ("name", self.name.is_some()),
            ("login", self.login.is_some()),
            ("password", self.password.is_some()),
        ])?;
        self.validate()?;

        Ok(UserFields {
            name: self.name.unwrap_or_default(),
            login: self.login.unwrap_or_default(),
            password: self.password.unwrap_or_default(),
        })
    }
}

/// Body of `POST /user-session`
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UserLogin {
    pub login: Option<String>,
    pub password: Option<String>,
}
