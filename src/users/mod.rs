//! User account management, gated by the access policy.

pub mod handlers;
pub mod service;

pub use service::{CreateUserRequest, UpdateUserRequest, UserService};
