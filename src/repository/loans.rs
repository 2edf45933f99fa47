//! Loans repository for database operations

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::loan::{Loan, LoanFields, LoanRow, LoanStatus},
};

/// Storage operations on loans
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoanStore: Send + Sync {
    async fn get_by_id(&self, id: &str) -> AppResult<Option<Loan>>;

    /// All loans owned by a user, soonest due first
    async fn list_by_owner(&self, owner_id: &str) -> AppResult<Vec<Loan>>;

    async fn create(
        &self,
        id: &str,
        owner_id: &str,
        fields: &LoanFields,
        status: &LoanStatus,
    ) -> AppResult<Loan>;

    /// Returns whether the loan existed
    async fn update_details(&self, id: &str, fields: &LoanFields) -> AppResult<bool>;

    /// Returns whether the loan existed
    async fn update_status(&self, id: &str, status: &LoanStatus) -> AppResult<bool>;

    /// Set `status` only if it still equals `expected`.
    /// Returns `false` when someone changed it in between.
    async fn compare_and_set_status(
        &self,
        id: &str,
        expected: &LoanStatus,
        status: &LoanStatus,
    ) -> AppResult<bool>;

    /// Loans whose due date is before `now` and that are not `late` yet
    async fn list_overdue(&self, now: DateTime<Utc>) -> AppResult<Vec<Loan>>;

    /// Returns whether a row was removed
    async fn delete(&self, id: &str) -> AppResult<bool>;
}

#[derive(Clone)]
pub struct LoansRepository {
    pool: Pool<Postgres>,
}

impl LoansRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LoanStore for LoansRepository {
    async fn get_by_id(&self, id: &str) -> AppResult<Option<Loan>> {
        let row = sqlx::query_as::<_, LoanRow>("SELECT * FROM loans WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Loan::from))
    }

    async fn list_by_owner(&self, owner_id: &str) -> AppResult<Vec<Loan>> {
        let rows = sqlx::query_as::<_, LoanRow>(
            "SELECT * FROM loans WHERE borrowedby = $1 ORDER BY finaldate",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Loan::from).collect())
    }

    async fn create(
        &self,
        id: &str,
        owner_id: &str,
        fields: &LoanFields,
        status: &LoanStatus,
    ) -> AppResult<Loan> {
        let row = sqlx::query_as::<_, LoanRow>(
            r#"
            INSERT INTO loans (id, borrowedby, loanedto, name, category, observations,
                               initialdate, finaldate, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(owner_id)
        .bind(&fields.loaned_to)
        .bind(&fields.name)
        .bind(&fields.category)
        .bind(&fields.observations)
        .bind(fields.initial_date)
        .bind(fields.final_date)
        .bind(status.as_str())
        .fetch_one(&self.pool)
        .await?;
        Ok(row.into())
    }

    async fn update_details(&self, id: &str, fields: &LoanFields) -> AppResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE loans
            SET loanedto = $1, name = $2, category = $3, observations = $4,
                initialdate = COALESCE($5, initialdate), finaldate = $6,
                realfinaldate = COALESCE($7, realfinaldate)
            WHERE id = $8
            "#,
        )
        .bind(&fields.loaned_to)
        .bind(&fields.name)
        .bind(&fields.category)
        .bind(&fields.observations)
        .bind(fields.initial_date)
        .bind(fields.final_date)
        .bind(fields.real_final_date)
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn update_status(&self, id: &str, status: &LoanStatus) -> AppResult<bool> {
        let result = sqlx::query("UPDATE loans SET status = $1 WHERE id = $2")
            .bind(status.as_str())
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn compare_and_set_status(
        &self,
        id: &str,
        expected: &LoanStatus,
        status: &LoanStatus,
    ) -> AppResult<bool> {
        let result = sqlx::query("UPDATE loans SET status = $1 WHERE id = $2 AND status = $3")
            .bind(status.as_str())
            .bind(id)
            .bind(expected.as_str())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_overdue(&self, now: DateTime<Utc>) -> AppResult<Vec<Loan>> {
        let rows = sqlx::query_as::<_, LoanRow>(
            "SELECT * FROM loans WHERE finaldate < $1 AND status != 'late' ORDER BY finaldate",
        )
        .bind(now)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Loan::from).collect())
    }

    async fn delete(&self, id: &str) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM loans WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
