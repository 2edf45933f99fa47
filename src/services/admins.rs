//! Administrator account management service

use crate::{
    error::{AppError, AppResult},
    models::{admin::AdminRequest, Admin, Identity},
    repository::Repository,
};

use super::{
    passwords,
    policy::{authorize, Action, Resource},
};

#[derive(Clone)]
pub struct AdminsService {
    repository: Repository,
}

impl AdminsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Create an administrator (super-admin only)
    pub async fn create(&self, identity: &Identity, request: AdminRequest) -> AppResult<Admin> {
        authorize(identity, Action::Create, Resource::Admin(None))?;
        let fields = request.into_fields()?;

        if self.repository.admins.email_exists(&fields.email, None).await? {
            return Err(AppError::Conflict("Administrator already exists".to_string()));
        }

        let id = passwords::generate_id();
        let password = passwords::hash_password(&fields.password)?;
        let admin = self
            .repository
            .admins
            .create(&id, &fields.name, &fields.email, &password)
            .await?;

        tracing::info!(admin_id = %admin.id, "Administrator created");
        Ok(admin)
    }

    /// List all administrators (super-admin only)
    pub async fn list(&self, identity: &Identity) -> AppResult<Vec<Admin>> {
        authorize(identity, Action::List, Resource::Admin(None))?;
        self.repository.admins.list().await
    }

    /// Get an administrator by ID (self or super-admin)
    pub async fn get(&self, identity: &Identity, id: &str) -> AppResult<Admin> {
        authorize(identity, Action::Read, Resource::Admin(Some(id)))?;
        self.find(id).await
    }

    /// Replace name, email and password (self or super-admin)
    pub async fn update(
        &self,
        identity: &Identity,
        id: &str,
        request: AdminRequest,
    ) -> AppResult<Admin> {
        authorize(identity, Action::Update, Resource::Admin(Some(id)))?;
        self.find(id).await?;
        let fields = request.into_fields()?;

        if self
            .repository
            .admins
            .email_exists(&fields.email, Some(id.to_string()))
            .await?
        {
            return Err(AppError::Conflict("Email already in use".to_string()));
        }

        let password = passwords::hash_password(&fields.password)?;
        self.repository
            .admins
            .update(id, &fields.name, &fields.email, &password)
            .await?
            .ok_or_else(|| not_found(id))
    }

    /// Hard delete an administrator (super-admin only)
    pub async fn delete(&self, identity: &Identity, id: &str) -> AppResult<()> {
        authorize(identity, Action::Delete, Resource::Admin(Some(id)))?;

        if !self.repository.admins.delete(id).await? {
            return Err(not_found(id));
        }

        tracing::info!(admin_id = %id, "Administrator deleted");
        Ok(())
    }

    async fn find(&self, id: &str) -> AppResult<Admin> {
        self.repository
            .admins
            .get_by_id(id)
            .await?
            .ok_or_else(|| not_found(id))
    }
}

fn not_found(id: &str) -> AppError {
    AppError::NotFound(format!("Administrator with id {} not found", id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{admins::MockAdminStore, loans::MockLoanStore, users::MockUserStore};
    use std::sync::Arc;

    fn service(admins: MockAdminStore) -> AdminsService {
        AdminsService::new(Repository::from_stores(
            Arc::new(admins),
            Arc::new(MockUserStore::new()),
            Arc::new(MockLoanStore::new()),
        ))
    }

    fn stored(id: &str) -> Admin {
        Admin {
            id: id.to_string(),
            name: "Root".to_string(),
            email: "root@x.com".to_string(),
            password: "$argon2id$stored".to_string(),
        }
    }

    fn complete_request() -> AdminRequest {
        AdminRequest {
            name: Some("Root".to_string()),
            email: Some("root@x.com".to_string()),
            password: Some("secret".to_string()),
        }
    }

    #[tokio::test]
    async fn test_create_hashes_password() {
        let mut admins = MockAdminStore::new();
        admins.expect_email_exists().returning(|_, _| Ok(false));
        admins
            .expect_create()
            .times(1)
            .returning(|id, name, email, hash| {
                assert_eq!(id.len(), 8);
                assert_ne!(hash, "secret");
                assert!(passwords::verify_password(hash, "secret").unwrap());
                Ok(Admin {
                    id: id.to_string(),
                    name: name.to_string(),
                    email: email.to_string(),
                    password: hash.to_string(),
                })
            });

        let admin = service(admins)
            .create(&Identity::SuperAdmin, complete_request())
            .await
            .unwrap();
        assert_eq!(admin.email, "root@x.com");
    }

    #[tokio::test]
    async fn test_create_requires_super_admin_before_fields() {
        let result = service(MockAdminStore::new())
            .create(&Identity::Admin("a1".to_string()), AdminRequest::default())
            .await;
        assert!(matches!(result, Err(AppError::Authorization(_))));

        let result = service(MockAdminStore::new())
            .create(&Identity::Anonymous, AdminRequest::default())
            .await;
        assert!(matches!(result, Err(AppError::Authentication(_))));
    }

    #[tokio::test]
    async fn test_create_duplicate_email() {
        let mut admins = MockAdminStore::new();
        admins.expect_email_exists().returning(|_, _| Ok(true));
        admins.expect_create().never();

        let result = service(admins)
            .create(&Identity::SuperAdmin, complete_request())
            .await;
        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_admin_reads_only_self() {
        let mut admins = MockAdminStore::new();
        admins
            .expect_get_by_id()
            .returning(|id| Ok((id == "a1").then(|| stored("a1"))));
        let service = service(admins);

        let own = service.get(&Identity::Admin("a1".to_string()), "a1").await.unwrap();
        assert_eq!(own.id, "a1");

        let other = service.get(&Identity::Admin("a2".to_string()), "a1").await;
        assert!(matches!(other, Err(AppError::Authorization(_))));

        let missing = service.get(&Identity::SuperAdmin, "ffff").await;
        assert!(matches!(missing, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_update_checks_existence_then_fields() {
        let mut admins = MockAdminStore::new();
        admins
            .expect_get_by_id()
            .returning(|id| Ok((id == "a1").then(|| stored("a1"))));
        admins.expect_email_exists().returning(|_, exclude| {
            assert_eq!(exclude.as_deref(), Some("a1"));
            Ok(false)
        });
        admins
            .expect_update()
            .returning(|id, name, email, hash| {
                Ok(Some(Admin {
                    id: id.to_string(),
                    name: name.to_string(),
                    email: email.to_string(),
                    password: hash.to_string(),
                }))
            });
        let service = service(admins);

        let missing = service
            .update(&Identity::SuperAdmin, "ffff", complete_request())
            .await;
        assert!(matches!(missing, Err(AppError::NotFound(_))));

        let incomplete = service
            .update(&Identity::SuperAdmin, "a1", AdminRequest::default())
            .await;
        assert!(matches!(incomplete, Err(AppError::Validation(_))));

        let updated = service
            .update(&Identity::Admin("a1".to_string()), "a1", complete_request())
            .await
            .unwrap();
        assert_eq!(updated.name, "Root");
    }

    #[tokio::test]
    async fn test_delete_is_super_admin_only() {
        let mut admins = MockAdminStore::new();
        admins.expect_delete().returning(|id| Ok(id == "a1"));
        let service = service(admins);

        let denied = service.delete(&Identity::Admin("a1".to_string()), "a1").await;
        assert!(matches!(denied, Err(AppError::Authorization(_))));

        service.delete(&Identity::SuperAdmin, "a1").await.unwrap();

        let missing = service.delete(&Identity::SuperAdmin, "ffff").await;
        assert!(matches!(missing, Err(AppError::NotFound(_))));
    }
}
