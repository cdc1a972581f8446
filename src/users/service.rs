//! User CRUD with role/ownership checks.
//!
//! Rules (see each operation): create/list/delete are admin-only, read and
//! update are self-or-admin, role changes are admin-only, and the
//! deliveries listing is self-only with no admin override.

use std::sync::Arc;

use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::auth::password;
use crate::error::{DomainError, DomainResult};
use crate::models::{Order, Role, User, UserView};
use crate::policy::{require_admin, require_self_or_admin, resolve_actor};
use crate::store::RecordStore;

/// User creation request.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateUserRequest {
    #[validate(length(min = 1, message = "name must not be empty"))]
    #[schema(example = "Joao")]
    pub name: String,
    /// National id, digits only or punctuated. Unique.
    #[validate(length(min = 11, max = 14, message = "cpf must have 11 to 14 characters"))]
    #[schema(example = "12345678900")]
    pub cpf: String,
    #[validate(email(message = "email must be valid"))]
    #[schema(example = "joao@example.com")]
    pub email: String,
    #[validate(length(min = 6, message = "password must have at least 6 characters"))]
    #[schema(example = "senha123")]
    pub password: String,
    pub role: Role,
}

/// Partial user update. Unset fields keep their prior values.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: Option<String>,
    #[validate(email(message = "email must be valid"))]
    pub email: Option<String>,
    #[validate(length(min = 6, message = "password must have at least 6 characters"))]
    pub password: Option<String>,
    pub role: Option<Role>,
}

pub struct UserService {
    store: Arc<dyn RecordStore>,
}

impl UserService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Admin-only. Hashes the password before storage; duplicate cpf or
    /// email fails with `Conflict`.
    pub async fn create_user(
        &self,
        actor_id: Uuid,
        req: CreateUserRequest,
    ) -> DomainResult<UserView> {
        let actor = resolve_actor(self.store.as_ref(), actor_id).await?;
        require_admin(&actor)?;

        let user = User {
            id: Uuid::new_v4(),
            name: req.name,
            cpf: req.cpf,
            email: req.email,
            password_hash: password::hash(&req.password)?,
            role: req.role,
        };
        let view = UserView::from(&user);
        self.store.insert_user(user).await?;
        tracing::info!(user_id = %view.id, role = ?view.role, "user created");
        Ok(view)
    }

    /// Admin-only.
    pub async fn list_users(&self, actor_id: Uuid) -> DomainResult<Vec<UserView>> {
        let actor = resolve_actor(self.store.as_ref(), actor_id).await?;
        require_admin(&actor)?;
        let users = self.store.list_users().await?;
        Ok(users.iter().map(UserView::from).collect())
    }

    /// Self or admin.
    pub async fn get_user(&self, actor_id: Uuid, target_id: Uuid) -> DomainResult<UserView> {
        let actor = resolve_actor(self.store.as_ref(), actor_id).await?;
        require_self_or_admin(&actor, target_id)?;
        let target = self
            .store
            .get_user(target_id)
            .await?
            .ok_or(DomainError::NotFound("user"))?;
        Ok(UserView::from(target))
    }

    /// Partial update, self or admin. Role changes are admin-only; a
    /// password change is re-hashed. cpf is immutable and not accepted.
    pub async fn update_user(
        &self,
        actor_id: Uuid,
        target_id: Uuid,
        req: UpdateUserRequest,
    ) -> DomainResult<UserView> {
        let actor = resolve_actor(self.store.as_ref(), actor_id).await?;
        require_self_or_admin(&actor, target_id)?;
        if req.role.is_some() {
            require_admin(&actor)?;
        }

        let mut target = self
            .store
            .get_user(target_id)
            .await?
            .ok_or(DomainError::NotFound("user"))?;

        if let Some(name) = req.name {
            target.name = name;
        }
        if let Some(email) = req.email {
            target.email = email;
        }
        if let Some(role) = req.role {
            target.role = role;
        }
        if let Some(pw) = req.password {
            target.password_hash = password::hash(&pw)?;
        }

        let view = UserView::from(&target);
        self.store.update_user(target).await?;
        Ok(view)
    }

    /// Admin-only. A second delete of the same id fails with `NotFound`.
    /// Orders referencing the deleted user keep their dangling ids; there
    /// is no cascade.
    pub async fn delete_user(&self, actor_id: Uuid, target_id: Uuid) -> DomainResult<()> {
        let actor = resolve_actor(self.store.as_ref(), actor_id).await?;
        require_admin(&actor)?;
        if !self.store.delete_user(target_id).await? {
            return Err(DomainError::NotFound("user"));
        }
        tracing::info!(user_id = %target_id, "user deleted");
        Ok(())
    }

    /// Orders assigned to the target deliverer. Self-only: admins get no
    /// override here, unlike the other user operations.
    pub async fn list_deliveries(&self, actor_id: Uuid, target_id: Uuid) -> DomainResult<Vec<Order>> {
        if actor_id != target_id {
            return Err(DomainError::Forbidden);
        }
        resolve_actor(self.store.as_ref(), actor_id).await?;
        Ok(self.store.list_orders_by_deliveryman(target_id).await?)
    }
}
