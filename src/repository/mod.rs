//! Repository layer for database operations

pub mod admins;
pub mod loans;
pub mod users;

use std::sync::Arc;

use sqlx::{Pool, Postgres};

pub use admins::{AdminStore, AdminsRepository};
pub use loans::{LoanStore, LoansRepository};
pub use users::{UserStore, UsersRepository};

/// Credential store: one handle per table, shared by all services
#[derive(Clone)]
pub struct Repository {
    pub admins: Arc<dyn AdminStore>,
    pub users: Arc<dyn UserStore>,
    pub loans: Arc<dyn LoanStore>,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            admins: Arc::new(AdminsRepository::new(pool.clone())),
            users: Arc::new(UsersRepository::new(pool.clone())),
            loans: Arc::new(LoansRepository::new(pool)),
        }
    }

    /// Build a repository from arbitrary store implementations
    pub fn from_stores(
        admins: Arc<dyn AdminStore>,
        users: Arc<dyn UserStore>,
        loans: Arc<dyn LoanStore>,
    ) -> Self {
        Self { admins, users, loans }
    }
}
