//! Data models for the loan tracker

pub mod admin;
pub mod identity;
pub mod loan;
pub mod user;

use serde::Serialize;
use utoipa::ToSchema;

use crate::error::{AppError, AppResult};

// Re-export commonly used types
pub use admin::Admin;
pub use identity::Identity;
pub use loan::{Loan, LoanStatus};
pub use user::User;

/// Body returned by updates and deletes
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

/// Fail with the list of absent fields, in the order given
pub(crate) fn ensure_present(fields: &[(&'static str, bool)]) -> AppResult<()> {
    let missing: Vec<&str> = fields
        .iter()
        .filter(|(_, present)| !present)
        .map(|(name, _)| *name)
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(AppError::missing_fields(&missing))
    }
}
