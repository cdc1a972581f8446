//! Order lifecycle handlers. All routes sit behind the JWT middleware.

use std::sync::Arc;

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;
use validator::Validate;

use super::service::{CreateOrderRequest, UpdateOrderRequest};
use crate::auth::Claims;
use crate::gateway::state::AppState;
use crate::gateway::types::{ApiError, ApiResponse, ApiResult};
use crate::models::Order;

/// Create a delivery order (admin only)
///
/// POST /api/v1/orders
#[utoipa::path(
    post,
    path = "/api/v1/orders",
    request_body = CreateOrderRequest,
    responses(
        (status = 201, description = "Order created with pending status", body = Order),
        (status = 403, description = "Acting user is not an admin"),
        (status = 404, description = "Recipient or deliveryman not found")
    ),
    security(("bearer_jwt" = [])),
    tag = "Orders"
)]
pub async fn create_order(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<CreateOrderRequest>,
) -> ApiResult<Order> {
    req.validate()
        .map_err(|e| ApiError::bad_request(e.to_string()))?;
    let order = state.orders.create_order(claims.sub, req).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(order))))
}

/// List orders: all for admins, own assignments for deliverers
///
/// GET /api/v1/orders
#[utoipa::path(
    get,
    path = "/api/v1/orders",
    responses(
        (status = 200, description = "Orders visible to the acting user", body = Vec<Order>),
        (status = 403, description = "Customers have no order listing")
    ),
    security(("bearer_jwt" = [])),
    tag = "Orders"
)]
pub async fn list_orders(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
) -> ApiResult<Vec<Order>> {
    let orders = state.orders.list_orders(claims.sub).await?;
    Ok((StatusCode::OK, Json(ApiResponse::success(orders))))
}

/// Fetch one order (admin or assigned deliveryman)
///
/// GET /api/v1/orders/{id}
#[utoipa::path(
    get,
    path = "/api/v1/orders/{id}",
    params(("id" = Uuid, Path, description = "Order id")),
    responses(
        (status = 200, description = "Order", body = Order),
        (status = 403, description = "Not the assigned deliveryman"),
        (status = 404, description = "Order not found")
    ),
    security(("bearer_jwt" = [])),
    tag = "Orders"
)]
pub async fn get_order(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
) -> ApiResult<Order> {
    let order = state.orders.get_order(claims.sub, id).await?;
    Ok((StatusCode::OK, Json(ApiResponse::success(order))))
}

/// Update an order (admin or assigned deliveryman)
///
/// PUT /api/v1/orders/{id}
///
/// Marking an order delivered requires a delivery photo, either supplied
/// in the same request or already attached.
#[utoipa::path(
    put,
    path = "/api/v1/orders/{id}",
    params(("id" = Uuid, Path, description = "Order id")),
    request_body = UpdateOrderRequest,
    responses(
        (status = 200, description = "Updated order", body = Order),
        (status = 400, description = "Missing proof-of-delivery or invalid transition"),
        (status = 403, description = "Not permitted"),
        (status = 404, description = "Order not found")
    ),
    security(("bearer_jwt" = [])),
    tag = "Orders"
)]
pub async fn update_order(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateOrderRequest>,
) -> ApiResult<Order> {
    let order = state.orders.update_order(claims.sub, id, req).await?;
    Ok((StatusCode::OK, Json(ApiResponse::success(order))))
}

/// Return an order (assigned deliverer only; no admin override)
///
/// POST /api/v1/orders/{id}/return
#[utoipa::path(
    post,
    path = "/api/v1/orders/{id}/return",
    params(("id" = Uuid, Path, description = "Order id")),
    responses(
        (status = 200, description = "Order marked returned", body = Order),
        (status = 400, description = "Order is not pending"),
        (status = 403, description = "Not the assigned deliverer"),
        (status = 404, description = "Order not found")
    ),
    security(("bearer_jwt" = [])),
    tag = "Orders"
)]
pub async fn return_order(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
) -> ApiResult<Order> {
    let order = state.orders.return_order(claims.sub, id).await?;
    Ok((StatusCode::OK, Json(ApiResponse::success(order))))
}

/// Delete an order (admin only)
///
/// DELETE /api/v1/orders/{id}
#[utoipa::path(
    delete,
    path = "/api/v1/orders/{id}",
    params(("id" = Uuid, Path, description = "Order id")),
    responses(
        (status = 200, description = "Order deleted"),
        (status = 403, description = "Acting user is not an admin"),
        (status = 404, description = "Order not found")
    ),
    security(("bearer_jwt" = [])),
    tag = "Orders"
)]
pub async fn delete_order(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
) -> ApiResult<()> {
    state.orders.delete_order(claims.sub, id).await?;
    Ok((StatusCode::OK, Json(ApiResponse::success(()))))
}
