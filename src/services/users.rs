//! User account management service

use crate::{
    error::{AppError, AppResult},
    models::{user::UserRequest, Identity, User},
    repository::Repository,
};

use super::{
    passwords,
    policy::{authorize, Action, Resource},
};

#[derive(Clone)]
pub struct UsersService {
    repository: Repository,
}

impl UsersService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Create a user (administrators only)
    pub async fn create(&self, identity: &Identity, request: UserRequest) -> AppResult<User> {
        authorize(identity, Action::Create, Resource::User(None))?;
        let fields = request.into_fields()?;

        if self.repository.users.login_exists(&fields.login, None).await? {
            return Err(AppError::Conflict("Login already exists".to_string()));
        }

        let id = passwords::generate_id();
        let password = passwords::hash_password(&fields.password)?;
        let user = self
            .repository
            .users
            .create(&id, &fields.name, &fields.login, &password)
            .await?;

        tracing::info!(user_id = %user.id, created_by = %identity.label(), "User created");
        Ok(user)
    }

    /// List every user, deactivated ones included (administrators only)
    pub async fn list(&self, identity: &Identity) -> AppResult<Vec<User>> {
        authorize(identity, Action::List, Resource::User(None))?;
        self.repository.users.list().await
    }

    /// Get an active user by ID
    pub async fn get(&self, identity: &Identity, id: &str) -> AppResult<User> {
        authorize(identity, Action::Read, Resource::User(Some(id)))?;
        self.find_active(id).await
    }

    /// Replace name, login and password of an active user
    pub async fn update(
        &self,
        identity: &Identity,
        id: &str,
        request: UserRequest,
    ) -> AppResult<User> {
        authorize(identity, Action::Update, Resource::User(Some(id)))?;
        self.find_active(id).await?;
        let fields = request.into_fields()?;

        if self
            .repository
            .users
            .login_exists(&fields.login, Some(id.to_string()))
            .await?
        {
            return Err(AppError::Conflict("Login already exists".to_string()));
        }

        let password = passwords::hash_password(&fields.password)?;
        self.repository
            .users
            .update(id, &fields.name, &fields.login, &password)
            .await?
            .ok_or_else(|| not_found(id))
    }

    /// Deactivate a user. Users are never removed from the store.
    pub async fn delete(&self, identity: &Identity, id: &str) -> AppResult<()> {
        authorize(identity, Action::Delete, Resource::User(Some(id)))?;

        if !self.repository.users.deactivate(id).await? {
            return Err(not_found(id));
        }

        tracing::info!(user_id = %id, by = %identity.label(), "User deactivated");
        Ok(())
    }

    /// Deactivated users read as absent
    async fn find_active(&self, id: &str) -> AppResult<User> {
        match self.repository.users.get_by_id(id).await? {
            Some(user) if user.is_active => Ok(user),
            Some(_) => Err(AppError::NotFound(format!("User with id {} has been deactivated", id))),
            None => Err(not_found(id)),
        }
    }
}

fn not_found(id: &str) -> AppError {
    AppError::NotFound(format!("User with id {} not found", id))
}
