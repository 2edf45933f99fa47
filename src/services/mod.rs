//! Business logic services

pub mod admins;
pub mod lifecycle;
pub mod loans;
pub mod passwords;
pub mod policy;
pub mod sessions;
pub mod users;

use crate::{
    config::{AuthConfig, LifecycleConfig},
    repository::Repository,
};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub sessions: sessions::SessionsService,
    pub admins: admins::AdminsService,
    pub users: users::UsersService,
    pub loans: loans::LoansService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(
        repository: Repository,
        auth_config: AuthConfig,
        lifecycle_config: &LifecycleConfig,
    ) -> Self {
        Self {
            sessions: sessions::SessionsService::new(repository.clone(), auth_config),
            admins: admins::AdminsService::new(repository.clone()),
            users: users::UsersService::new(repository.clone()),
            loans: loans::LoansService::new(repository, lifecycle_config.sweep_rule),
        }
    }
}
