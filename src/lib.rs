//! Loan Tracker
//!
//! REST JSON API where administrators manage user accounts and users keep
//! track of the items they lend and borrow. A daily sweep marks overdue
//! loans as late.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
