//! Session identity resolution and login
//!
//! A session token is the literal account id returned at login, or the
//! configured super-admin secret. Nothing is issued or stored.

use std::sync::Arc;

use crate::{
    config::AuthConfig,
    error::{AppError, AppResult},
    models::{
        admin::AdminLogin,
        user::UserLogin,
        Admin, Identity, User,
    },
    repository::Repository,
};

use super::passwords;

#[derive(Clone)]
pub struct SessionsService {
    repository: Repository,
    super_admin_secret: Arc<str>,
}

impl SessionsService {
    pub fn new(repository: Repository, config: AuthConfig) -> Self {
        Self {
            repository,
            super_admin_secret: Arc::from(config.super_admin_secret),
        }
    }

    /// Resolve a `session_id` header value to the caller's identity
    pub async fn resolve(&self, token: Option<&str>) -> AppResult<Identity> {
        let token = match token.map(str::trim) {
            Some(token) if !token.is_empty() => token,
            _ => return Ok(Identity::Anonymous),
        };

        if !self.super_admin_secret.is_empty() && token == &*self.super_admin_secret {
            return Ok(Identity::SuperAdmin);
        }

        if let Some(admin) = self.repository.admins.get_by_id(token).await? {
            return Ok(Identity::Admin(admin.id));
        }

        if let Some(user) = self.repository.users.get_by_id(token).await? {
            return Ok(Identity::User(user.id));
        }

        Ok(Identity::Anonymous)
    }

    /// Check administrator credentials. The returned id is the session token.
    pub async fn login_admin(&self, request: AdminLogin) -> AppResult<Admin> {
        let (email, password) = login_fields("email", request.email, request.password)?;

        let admin = self
            .repository
            .admins
            .get_by_email(&email)
            .await?
            .ok_or_else(invalid_credentials)?;

        if !passwords::verify_password(&admin.password, &password)? {
            return Err(invalid_credentials());
        }

        tracing::info!(admin_id = %admin.id, "Admin session opened");
        Ok(admin)
    }

    /// Check user credentials. The returned id is the session token.
    pub async fn login_user(&self, request: UserLogin) -> AppResult<User> {
        let (login, password) = login_fields("login", request.login, request.password)?;

        let user = self
            .repository
            .users
            .get_by_login(&login)
            .await?
            .ok_or_else(invalid_credentials)?;

        if !user.is_active {
            return Err(AppError::Authentication("Account is deactivated".to_string()));
        }

        if !passwords::verify_password(&user.password, &password)? {
            return Err(invalid_credentials());
        }

        tracing::info!(user_id = %user.id, "User session opened");
        Ok(user)
    }
}

fn login_fields(
    key: &'static str,
    identifier: Option<String>,
    password: Option<String>,
) -> AppResult<(String, String)> {
    crate::models::ensure_present(&[(key, identifier.is_some()), ("password", password.is_some())])?;
    Ok((identifier.unwrap_or_default(), password.unwrap_or_default()))
}

fn invalid_credentials() -> AppError {
    AppError::Authentication("Invalid login or password".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{admins::MockAdminStore, loans::MockLoanStore, users::MockUserStore};

    fn admin_record(id: &str, password: &str) -> Admin {
        Admin {
            id: id.to_string(),
            name: "Root".to_string(),
            email: "root@x.com".to_string(),
            password: passwords::hash_password(password).unwrap(),
        }
    }

    fn user_record(id: &str, password: &str, is_active: bool) -> User {
        User {
            id: id.to_string(),
            name: "Ana".to_string(),
            login: "ana@x.com".to_string(),
            password: passwords::hash_password(password).unwrap(),
            is_active,
        }
    }

    fn service(admins: MockAdminStore, users: MockUserStore, secret: &str) -> SessionsService {
        let repository = Repository::from_stores(
            Arc::new(admins),
            Arc::new(users),
            Arc::new(MockLoanStore::new()),
        );
        SessionsService::new(
            repository,
            AuthConfig {
                super_admin_secret: secret.to_string(),
            },
        )
    }

    fn directory() -> (MockAdminStore, MockUserStore) {
        let mut admins = MockAdminStore::new();
        admins.expect_get_by_id().returning(|id| {
            Ok((id == "a1").then(|| Admin {
                id: "a1".to_string(),
                name: "Root".to_string(),
                email: "root@x.com".to_string(),
                password: String::new(),
            }))
        });

        let mut users = MockUserStore::new();
        users.expect_get_by_id().returning(|id| {
            Ok((id == "u1").then(|| User {
                id: "u1".to_string(),
                name: "Ana".to_string(),
                login: "ana@x.com".to_string(),
                password: String::new(),
                is_active: true,
            }))
        });

        (admins, users)
    }

    #[tokio::test]
    async fn test_resolve_precedence() {
        let (admins, users) = directory();
        let sessions = service(admins, users, "top-secret");

        assert_eq!(sessions.resolve(None).await.unwrap(), Identity::Anonymous);
        assert_eq!(sessions.resolve(Some("")).await.unwrap(), Identity::Anonymous);
        assert_eq!(
            sessions.resolve(Some("top-secret")).await.unwrap(),
            Identity::SuperAdmin
        );
        assert_eq!(
            sessions.resolve(Some("a1")).await.unwrap(),
            Identity::Admin("a1".to_string())
        );
        assert_eq!(
            sessions.resolve(Some("u1")).await.unwrap(),
            Identity::User("u1".to_string())
        );
        assert_eq!(sessions.resolve(Some("zzzz")).await.unwrap(), Identity::Anonymous);
    }

    #[tokio::test]
    async fn test_super_admin_secret_checked_before_store() {
        let sessions = service(MockAdminStore::new(), MockUserStore::new(), "top-secret");
        // No store expectations set: a lookup would panic
        assert_eq!(
            sessions.resolve(Some("top-secret")).await.unwrap(),
            Identity::SuperAdmin
        );
    }

    #[tokio::test]
    async fn test_empty_secret_never_matches() {
        let (admins, users) = directory();
        let sessions = service(admins, users, "");
        assert_eq!(sessions.resolve(Some("  ")).await.unwrap(), Identity::Anonymous);
        assert_eq!(sessions.resolve(Some("x")).await.unwrap(), Identity::Anonymous);
    }

    #[tokio::test]
    async fn test_admin_login() {
        let mut admins = MockAdminStore::new();
        let stored = admin_record("a1", "secret");
        admins
            .expect_get_by_email()
            .returning(move |email| Ok((email == "root@x.com").then(|| stored.clone())));
        let sessions = service(admins, MockUserStore::new(), "top-secret");

        let admin = sessions
            .login_admin(AdminLogin {
                email: Some("root@x.com".to_string()),
                password: Some("secret".to_string()),
            })
            .await
            .unwrap();
        assert_eq!(admin.id, "a1");

        let wrong = sessions
            .login_admin(AdminLogin {
                email: Some("root@x.com".to_string()),
                password: Some("nope".to_string()),
            })
            .await;
        assert!(matches!(wrong, Err(AppError::Authentication(_))));

        let unknown = sessions
            .login_admin(AdminLogin {
                email: Some("who@x.com".to_string()),
                password: Some("secret".to_string()),
            })
            .await;
        assert!(matches!(unknown, Err(AppError::Authentication(_))));
    }

    #[tokio::test]
    async fn test_user_login_requires_fields_and_active_account() {
        let mut users = MockUserStore::new();
        let active = user_record("u1", "secret", true);
        let inactive = user_record("u2", "secret", false);
        users.expect_get_by_login().returning(move |login| {
            Ok(match login {
                "ana@x.com" => Some(active.clone()),
                "old@x.com" => Some(inactive.clone()),
                _ => None,
            })
        });
        let sessions = service(MockAdminStore::new(), users, "top-secret");

        let missing = sessions.login_user(UserLogin::default()).await;
        match missing {
            Err(AppError::Validation(msg)) => assert!(msg.ends_with("login, password")),
            other => panic!("unexpected result: {:?}", other.map(|u| u.id)),
        }

        let user = sessions
            .login_user(UserLogin {
                login: Some("ana@x.com".to_string()),
                password: Some("secret".to_string()),
            })
            .await
            .unwrap();
        assert_eq!(user.id, "u1");

        let deactivated = sessions
            .login_user(UserLogin {
                login: Some("old@x.com".to_string()),
                password: Some("secret".to_string()),
            })
            .await;
        assert!(matches!(deactivated, Err(AppError::Authentication(_))));
    }
}
