//! Loan model and related types

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::error::{AppError, AppResult};

use super::ensure_present;

/// Loan status.
///
/// Only `inday` and `late` mean something to the server; owners may store any
/// other value (e.g. "finished") and it is kept as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LoanStatus {
    InDay,
    Late,
    Other(String),
}

impl LoanStatus {
    pub fn as_str(&self) -> &str {
        match self {
            LoanStatus::InDay => "inday",
            LoanStatus::Late => "late",
            LoanStatus::Other(s) => s.as_str(),
        }
    }
}

impl std::fmt::Display for LoanStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<String> for LoanStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "inday" => LoanStatus::InDay,
            "late" => LoanStatus::Late,
            _ => LoanStatus::Other(s),
        }
    }
}

impl From<&str> for LoanStatus {
    fn from(s: &str) -> Self {
        LoanStatus::from(s.to_string())
    }
}

impl From<LoanStatus> for String {
    fn from(status: LoanStatus) -> Self {
        match status {
            LoanStatus::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

/// Internal row structure matching the `loans` table
#[derive(Debug, Clone, FromRow)]
pub struct LoanRow {
    id: String,
    borrowedby: String,
    loanedto: String,
    name: String,
    category: String,
    observations: String,
    initialdate: Option<DateTime<Utc>>,
    finaldate: DateTime<Utc>,
    realfinaldate: Option<DateTime<Utc>>,
    status: String,
}

impl From<LoanRow> for Loan {
    fn from(row: LoanRow) -> Self {
        Loan {
            id: row.id,
            borrowed_by: row.borrowedby,
            loaned_to: row.loanedto,
            name: row.name,
            category: row.category,
            observations: row.observations,
            initial_date: row.initialdate,
            final_date: row.finaldate,
            real_final_date: row.realfinaldate,
            status: LoanStatus::from(row.status),
        }
    }
}

/// A borrowed or lent item
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Loan {
    pub id: String,
    /// Owner: id of the user who registered the loan
    pub borrowed_by: String,
    /// Counterparty
    pub loaned_to: String,
    /// Item name
    pub name: String,
    pub category: String,
    pub observations: String,
    pub initial_date: Option<DateTime<Utc>>,
    /// Due date
    pub final_date: DateTime<Utc>,
    /// Actual return date
    pub real_final_date: Option<DateTime<Utc>>,
    #[schema(value_type = String, example = "inday")]
    pub status: LoanStatus,
}

/// Body of `POST /loans` and `PUT /loans/{id}`
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct LoanRequest {
    pub loaned_to: Option<String>,
    pub name: Option<String>,
    pub category: Option<String>,
    pub observations: Option<String>,
    /// RFC 3339 timestamp or `YYYY-MM-DD`
    pub initial_date: Option<String>,
    /// RFC 3339 timestamp or `YYYY-MM-DD`
    pub final_date: Option<String>,
    /// Ignored on creation
    pub real_final_date: Option<String>,
}

/// Loan fields a caller may write
#[derive(Debug, Clone, PartialEq)]
pub struct LoanFields {
    pub loaned_to: String,
    pub name: String,
    pub category: String,
    pub observations: String,
    pub initial_date: Option<DateTime<Utc>>,
    pub final_date: DateTime<Utc>,
    pub real_final_date: Option<DateTime<Utc>>,
}

impl LoanRequest {
    pub fn into_fields(self) -> AppResult<LoanFields> {
        ensure_present(&[
            ("loaned_to", self.loaned_to.is_some()),
            ("name", self.name.is_some()),
            ("category", self.category.is_some()),
            ("observations", self.observations.is_some()),
            ("final_date", self.final_date.is_some()),
        ])?;

        let final_date = parse_timestamp("final_date", self.final_date.as_deref().unwrap_or_default())?;
        let initial_date = self
            .initial_date
            .as_deref()
            .map(|d| parse_timestamp("initial_date", d))
            .transpose()?;
        let real_final_date = self
            .real_final_date
            .as_deref()
            .map(|d| parse_timestamp("real_final_date", d))
            .transpose()?;

        Ok(LoanFields {
            loaned_to: self.loaned_to.unwrap_or_default(),
            name: self.name.unwrap_or_default(),
            category: self.category.unwrap_or_default(),
            observations: self.observations.unwrap_or_default(),
            initial_date,
            final_date,
            real_final_date,
        })
    }
}

/// Body of `PUT /loans/{id}/status`
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct LoanStatusRequest {
    pub status: Option<String>,
}

impl LoanStatusRequest {
    pub fn into_status(self) -> AppResult<LoanStatus> {
        ensure_present(&[("status", self.status.is_some())])?;
        let status = self.status.unwrap_or_default();
        if status.trim().is_empty() {
            return Err(AppError::BadRequest("status must not be empty".to_string()));
        }
        Ok(LoanStatus::from(status))
    }
}

/// Parse a request timestamp: RFC 3339, or a bare date taken as midnight UTC
pub fn parse_timestamp(field: &str, value: &str) -> AppResult<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Ok(ts.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
        .ok_or_else(|| AppError::BadRequest(format!("{} is not a valid date: {}", field, value)))
}
