//! Delivery order lifecycle: CRUD plus status transitions.

pub mod handlers;
pub mod service;

pub use service::{CreateOrderRequest, OrderService, UpdateOrderRequest};
