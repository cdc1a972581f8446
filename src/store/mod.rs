//! Record store boundary.
//!
//! The domain services reach durable storage only through [`RecordStore`]:
//! a keyed create/read/update/delete/query interface over `User` and
//! `Order` records. The store guarantees atomic per-record operations and
//! unique-index enforcement on `cpf` and `email`; it does NOT provide
//! cross-record transactions, so check-then-create sequences (e.g. order
//! creation validating its referenced users) are tolerated races.

pub mod memory;

pub use memory::MemoryStore;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{Order, User};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    /// Unique constraint violation on a natural key.
    #[error("duplicate {field}")]
    Duplicate { field: &'static str },

    #[error("store backend error: {0}")]
    Backend(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Keyed record store for users and orders.
///
/// Absence is expressed as `Option`/`bool`, not an error. `update_*`
/// replaces the record under its id; callers are expected to have resolved
/// the record first.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn insert_user(&self, user: User) -> StoreResult<()>;
    async fn get_user(&self, id: Uuid) -> StoreResult<Option<User>>;
    async fn find_user_by_cpf(&self, cpf: &str) -> StoreResult<Option<User>>;
    async fn list_users(&self) -> StoreResult<Vec<User>>;
    async fn update_user(&self, user: User) -> StoreResult<()>;
    async fn delete_user(&self, id: Uuid) -> StoreResult<bool>;

    async fn insert_order(&self, order: Order) -> StoreResult<()>;
    async fn get_order(&self, id: Uuid) -> StoreResult<Option<Order>>;
    async fn list_orders(&self) -> StoreResult<Vec<Order>>;
    async fn list_orders_by_deliveryman(&self, deliveryman_id: Uuid) -> StoreResult<Vec<Order>>;
    async fn update_order(&self, order: Order) -> StoreResult<()>;
    async fn delete_order(&self, id: Uuid) -> StoreResult<bool>;
}
