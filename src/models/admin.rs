//! Administrator model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::error::AppResult;

use super::ensure_present;

/// Administrator account from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Admin {
    pub id: String,
    pub name: String,
    pub email: String,
    /// Hashed password (argon2)
    #[serde(skip_serializing)]
    pub password: String,
}

/// Body of `POST /admin` and `PUT /admin/{id}`
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct AdminRequest {
    pub name: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    #[validate(length(min = 4, message = "Password must be at least 4 characters"))]
    pub password: Option<String>,
}

/// Complete administrator fields, password still in clear text
#[derive(Debug, Clone)]
pub struct AdminFields {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl AdminRequest {
    pub fn into_fields(self) -> AppResult<AdminFields> {
        ensure_present(&[
            ("name", self.name.is_some()),
            ("password", self.password.is_some()),
            ("email", self.email.is_some()),
        ])?;
        self.validate()?;

        Ok(AdminFields {
            name: self.name.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
            password: self.password.unwrap_or_default(),
        })
    }
}

/// Body of `POST /admin-session`
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct AdminLogin {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    #[test]
    fn test_missing_fields_listed_in_order() {
        let request = AdminRequest {
            name: Some("Root".to_string()),
            ..Default::default()
        };

        match request.into_fields() {
            Err(AppError::Validation(msg)) => assert!(msg.ends_with("password, email")),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_invalid_email_rejected() {
        let request = AdminRequest {
            name: Some("Root".to_string()),
            email: Some("not-an-email".to_string()),
            password: Some("secret".to_string()),
        };

        assert!(matches!(request.into_fields(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_password_never_serialized() {
        let admin = Admin {
            id: "a1b2c3d4".to_string(),
            name: "Root".to_string(),
            email: "root@x.com".to_string(),
            password: "$argon2id$hash".to_string(),
        };

        let json = serde_json::to_value(&admin).unwrap();
        assert!(json.get("password").is_none());
        assert_eq!(json["email"], "root@x.com");
    }
}
