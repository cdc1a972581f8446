//! Identity & access: credential verification and session tokens.

pub mod handlers;
pub mod middleware;
pub mod password;
pub mod service;

pub use service::{AuthResponse, AuthService, Claims, LoginRequest};
