//! Domain entities: users, roles, and delivery orders.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Access role. A closed enum so every authorization check can match
/// exhaustively instead of comparing ad-hoc strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Full access to user and order management.
    Admin,
    /// Restricted to orders assigned to them.
    Deliverer,
    /// Package recipient. No management privileges.
    Customer,
}

impl Role {
    pub fn is_admin(self) -> bool {
        matches!(self, Role::Admin)
    }
}

/// User account as persisted in the record store.
///
/// Carries the password hash, so this type is never serialized to clients.
/// [`UserView`] is the outbound shape.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    /// National id. Unique natural key, immutable after creation.
    pub cpf: String,
    /// Unique, mutable by self or admin.
    pub email: String,
    pub password_hash: String,
    pub role: Role,
}

/// Client-facing user payload. Excludes the password hash.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserView {
    pub id: Uuid,
    pub name: String,
    pub cpf: String,
    pub email: String,
    pub role: Role,
}

impl From<&User> for UserView {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            cpf: user.cpf.clone(),
            email: user.email.clone(),
            role: user.role,
        }
    }
}

impl From<User> for UserView {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            cpf: user.cpf,
            email: user.email,
            role: user.role,
        }
    }
}

/// Delivery order status.
///
/// State machine: `Pending -> Delivered` (requires proof-of-delivery photo)
/// and `Pending -> Returned` (assigned deliverer only). Both `Delivered`
/// and `Returned` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Delivered,
    Returned,
}

impl OrderStatus {
    pub fn is_terminal(self) -> bool {
        match self {
            OrderStatus::Pending => false,
            OrderStatus::Delivered | OrderStatus::Returned => true,
        }
    }
}

/// Delivery order.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Order {
    pub id: Uuid,
    pub address: String,
    pub recipient_id: Uuid,
    pub deliveryman_id: Uuid,
    pub status: OrderStatus,
    /// Proof-of-delivery reference. Must be present before the order can
    /// transition to `Delivered`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_photo: Option<String>,
}

impl Order {
    /// Invariant check: `Delivered` implies a non-empty delivery photo.
    pub fn has_delivery_proof(&self) -> bool {
        self.delivery_photo.as_deref().is_some_and(|p| !p.is_empty())
    }
}
