//! Users repository for database operations

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::{error::AppResult, models::User};

/// Storage operations on user accounts
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Get user by ID, active or not
    async fn get_by_id(&self, id: &str) -> AppResult<Option<User>>;

    async fn get_by_login(&self, login: &str) -> AppResult<Option<User>>;

    /// Check if login is taken, optionally ignoring one user
    async fn login_exists(&self, login: &str, exclude_id: Option<String>) -> AppResult<bool>;

    async fn list(&self) -> AppResult<Vec<User>>;

    async fn create(&self, id: &str, name: &str, login: &str, password_hash: &str) -> AppResult<User>;

    /// Update an active user. Returns `None` when no active user has this id.
    async fn update(
        &self,
        id: &str,
        name: &str,
        login: &str,
        password_hash: &str,
    ) -> AppResult<Option<User>>;

    /// Flip `isactive` off. Returns whether an active user was deactivated.
    async fn deactivate(&self, id: &str) -> AppResult<bool>;
}

#[derive(Clone)]
pub struct UsersRepository {
    pool: Pool<Postgres>,
}

impl UsersRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for UsersRepository {
    async fn get_by_id(&self, id: &str) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn get_by_login(&self, login: &str) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE LOWER(login) = LOWER($1)")
            .bind(login)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn login_exists(&self, login: &str, exclude_id: Option<String>) -> AppResult<bool> {
        let exists: bool = if let Some(id) = exclude_id {
            sqlx::query_scalar(
                "SELECT EXISTS(SELECT 1 FROM users WHERE LOWER(login) = LOWER($1) AND id != $2)",
            )
            .bind(login)
            .bind(id)
            .fetch_one(&self.pool)
            .await?
        } else {
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE LOWER(login) = LOWER($1))")
                .bind(login)
                .fetch_one(&self.pool)
                .await?
        };
        Ok(exists)
    }

    async fn list(&self) -> AppResult<Vec<User>> {
        let users = sqlx::query_as::<_, User>("SELECT * FROM users ORDER BY name")
            .fetch_all(&self.pool)
            .await?;
        Ok(users)
    }

    async fn create(&self, id: &str, name: &str, login: &str, password_hash: &str) -> AppResult<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, name, login, password, isactive)
            VALUES ($1, $2, $3, $4, TRUE)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(login)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await?;
        Ok(user)
    }

    async fn update(
        &self,
        id: &str,
        name: &str,
        login: &str,
        password_hash: &str,
    ) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users SET name = $1, login = $2, password = $3
            WHERE id = $4 AND isactive
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(login)
        .bind(password_hash)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn deactivate(&self, id: &str) -> AppResult<bool> {
        let result = sqlx::query("UPDATE users SET isactive = FALSE WHERE id = $1 AND isactive")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
