//! Shared authorization helpers.
//!
//! The acting user's role is resolved fresh from the record store on every
//! call; nothing is cached across requests.

use uuid::Uuid;

use crate::error::{DomainError, DomainResult};
use crate::models::{Role, User};
use crate::store::RecordStore;

/// Resolve the acting user or fail with `NotFound`.
pub async fn resolve_actor(store: &dyn RecordStore, actor_id: Uuid) -> DomainResult<User> {
    store
        .get_user(actor_id)
        .await?
        .ok_or(DomainError::NotFound("acting user"))
}

/// Admin-only gate. Exhaustive on purpose: adding a role forces a decision
/// at every call site of this check.
pub fn require_admin(actor: &User) -> DomainResult<()> {
    match actor.role {
        Role::Admin => Ok(()),
        Role::Deliverer | Role::Customer => Err(DomainError::Forbidden),
    }
}

/// Self-or-admin gate used by user reads and updates.
pub fn require_self_or_admin(actor: &User, target_id: Uuid) -> DomainResult<()> {
    if actor.id == target_id {
        return Ok(());
    }
    require_admin(actor)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_with_role(role: Role) -> User {
        User {
            id: Uuid::new_v4(),
            name: "test".to_string(),
            cpf: "11111111111".to_string(),
            email: "t@example.com".to_string(),
            password_hash: String::new(),
            role,
        }
    }

    #[test]
    fn test_require_admin() {
        assert!(require_admin(&user_with_role(Role::Admin)).is_ok());
        assert_eq!(
            require_admin(&user_with_role(Role::Deliverer)),
            Err(DomainError::Forbidden)
        );
        assert_eq!(
            require_admin(&user_with_role(Role::Customer)),
            Err(DomainError::Forbidden)
        );
    }

    #[test]
    fn test_require_self_or_admin() {
        let customer = user_with_role(Role::Customer);
        assert!(require_self_or_admin(&customer, customer.id).is_ok());
        assert_eq!(
            require_self_or_admin(&customer, Uuid::new_v4()),
            Err(DomainError::Forbidden)
        );

        let admin = user_with_role(Role::Admin);
        assert!(require_self_or_admin(&admin, Uuid::new_v4()).is_ok());
    }
}
