//! Administrators repository for database operations

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::{error::AppResult, models::Admin};

/// Storage operations on administrator accounts
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AdminStore: Send + Sync {
    async fn get_by_id(&self, id: &str) -> AppResult<Option<Admin>>;

    async fn get_by_email(&self, email: &str) -> AppResult<Option<Admin>>;

    /// Check if email is taken, optionally ignoring one admin
    async fn email_exists(&self, email: &str, exclude_id: Option<String>) -> AppResult<bool>;

    async fn list(&self) -> AppResult<Vec<Admin>>;

    async fn create(&self, id: &str, name: &str, email: &str, password_hash: &str) -> AppResult<Admin>;

    /// Returns `None` when no admin has this id
    async fn update(
        &self,
        id: &str,
        name: &str,
        email: &str,
        password_hash: &str,
    ) -> AppResult<Option<Admin>>;

    /// Returns whether a row was removed
    async fn delete(&self, id: &str) -> AppResult<bool>;
}

#[derive(Clone)]
pub struct AdminsRepository {
    pool: Pool<Postgres>,
}

impl AdminsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AdminStore for AdminsRepository {
    async fn get_by_id(&self, id: &str) -> AppResult<Option<Admin>> {
        let admin = sqlx::query_as::<_, Admin>("SELECT * FROM admin WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(admin)
    }

    async fn get_by_email(&self, email: &str) -> AppResult<Option<Admin>> {
        let admin = sqlx::query_as::<_, Admin>("SELECT * FROM admin WHERE LOWER(email) = LOWER($1)")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(admin)
    }

    async fn email_exists(&self, email: &str, exclude_id: Option<String>) -> AppResult<bool> {
        let exists: bool = if let Some(id) = exclude_id {
            sqlx::query_scalar(
                "SELECT EXISTS(SELECT 1 FROM admin WHERE LOWER(email) = LOWER($1) AND id != $2)",
            )
            .bind(email)
            .bind(id)
            .fetch_one(&self.pool)
            .await?
        } else {
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM admin WHERE LOWER(email) = LOWER($1))")
                .bind(email)
                .fetch_one(&self.pool)
                .await?
        };
        Ok(exists)
    }

    async fn list(&self) -> AppResult<Vec<Admin>> {
        let admins = sqlx::query_as::<_, Admin>("SELECT * FROM admin ORDER BY name")
            .fetch_all(&self.pool)
            .await?;
        Ok(admins)
    }

    async fn create(&self, id: &str, name: &str, email: &str, password_hash: &str) -> AppResult<Admin> {
        let admin = sqlx::query_as::<_, Admin>(
            r#"
            INSERT INTO admin (id, name, email, password)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(email)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await?;
        Ok(admin)
    }

    async fn update(
        &self,
        id: &str,
        name: &str,
        email: &str,
        password_hash: &str,
    ) -> AppResult<Option<Admin>> {
        let admin = sqlx::query_as::<_, Admin>(
            r#"
            UPDATE admin SET name = $1, email = $2, password = $3
            WHERE id = $4
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(email)
        .bind(password_hash)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(admin)
    }

    async fn delete(&self, id: &str) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM admin WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
