//! FastFeet - Delivery Management Backend
//!
//! A small delivery-management backend: authentication, role-based access
//! control over user accounts, and a guarded order lifecycle.
//!
//! # Modules
//!
//! - [`models`] - Domain entities (User, Role, Order, OrderStatus)
//! - [`error`] - Domain error taxonomy
//! - [`policy`] - Shared authorization checks
//! - [`store`] - Record store boundary and the in-memory implementation
//! - [`auth`] - Credential verification, JWT sessions, bearer middleware
//! - [`users`] - User account management (admin/self rules)
//! - [`orders`] - Order lifecycle (ownership rules, status state machine)
//! - [`gateway`] - HTTP transport: router, response envelope, OpenAPI
//! - [`config`] / [`logging`] - Process configuration and tracing setup

pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod policy;
pub mod store;

pub mod auth;
pub mod gateway;
pub mod orders;
pub mod users;

// Convenient re-exports at crate root
pub use auth::{AuthService, Claims};
pub use error::{DomainError, DomainResult};
pub use models::{Order, OrderStatus, Role, User, UserView};
pub use orders::OrderService;
pub use store::{MemoryStore, RecordStore, StoreError};
pub use users::UserService;
