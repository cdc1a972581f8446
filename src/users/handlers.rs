//! User management handlers. All routes here sit behind the JWT
//! middleware; the decoded claims arrive via request extensions.

use std::sync::Arc;

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;
use validator::Validate;

use super::service::{CreateUserRequest, UpdateUserRequest};
use crate::auth::Claims;
use crate::gateway::state::AppState;
use crate::gateway::types::{ApiError, ApiResponse, ApiResult};
use crate::models::{Order, UserView};

/// Create a user account (admin only)
///
/// POST /api/v1/users
#[utoipa::path(
    post,
    path = "/api/v1/users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = UserView),
        (status = 403, description = "Acting user is not an admin"),
        (status = 409, description = "cpf or email already exists")
    ),
    security(("bearer_jwt" = [])),
    tag = "Users"
)]
pub async fn create_user(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<CreateUserRequest>,
) -> ApiResult<UserView> {
    req.validate()
        .map_err(|e| ApiError::bad_request(e.to_string()))?;
    let view = state.users.create_user(claims.sub, req).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(view))))
}

/// List all user accounts (admin only)
///
/// GET /api/v1/users
#[utoipa::path(
    get,
    path = "/api/v1/users",
    responses(
        (status = 200, description = "All users", body = Vec<UserView>),
        (status = 403, description = "Acting user is not an admin")
    ),
    security(("bearer_jwt" = [])),
    tag = "Users"
)]
pub async fn list_users(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
) -> ApiResult<Vec<UserView>> {
    let users = state.users.list_users(claims.sub).await?;
    Ok((StatusCode::OK, Json(ApiResponse::success(users))))
}

/// Fetch a user account (self or admin)
///
/// GET /api/v1/users/{id}
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    params(("id" = Uuid, Path, description = "User id")),
    responses(
        (status = 200, description = "User", body = UserView),
        (status = 403, description = "Not self and not admin"),
        (status = 404, description = "User not found")
    ),
    security(("bearer_jwt" = [])),
    tag = "Users"
)]
pub async fn get_user(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
) -> ApiResult<UserView> {
    let view = state.users.get_user(claims.sub, id).await?;
    Ok((StatusCode::OK, Json(ApiResponse::success(view))))
}

/// Update a user account (self or admin; role changes admin-only)
///
/// PUT /api/v1/users/{id}
#[utoipa::path(
    put,
    path = "/api/v1/users/{id}",
    params(("id" = Uuid, Path, description = "User id")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "Updated user", body = UserView),
        (status = 403, description = "Not permitted"),
        (status = 404, description = "User not found"),
        (status = 409, description = "email already exists")
    ),
    security(("bearer_jwt" = [])),
    tag = "Users"
)]
pub async fn update_user(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateUserRequest>,
) -> ApiResult<UserView> {
    req.validate()
        .map_err(|e| ApiError::bad_request(e.to_string()))?;
    let view = state.users.update_user(claims.sub, id, req).await?;
    Ok((StatusCode::OK, Json(ApiResponse::success(view))))
}

/// Delete a user account (admin only)
///
/// DELETE /api/v1/users/{id}
#[utoipa::path(
    delete,
    path = "/api/v1/users/{id}",
    params(("id" = Uuid, Path, description = "User id")),
    responses(
        (status = 200, description = "User deleted"),
        (status = 403, description = "Acting user is not an admin"),
        (status = 404, description = "User not found")
    ),
    security(("bearer_jwt" = [])),
    tag = "Users"
)]
pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
) -> ApiResult<()> {
    state.users.delete_user(claims.sub, id).await?;
    Ok((StatusCode::OK, Json(ApiResponse::success(()))))
}

/// List the orders assigned to a deliverer (self only, no admin override)
///
/// GET /api/v1/users/{id}/deliveries
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}/deliveries",
    params(("id" = Uuid, Path, description = "Deliverer user id")),
    responses(
        (status = 200, description = "Orders assigned to the deliverer", body = Vec<Order>),
        (status = 403, description = "Not the deliverer themselves")
    ),
    security(("bearer_jwt" = [])),
    tag = "Users"
)]
pub async fn list_deliveries(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
) -> ApiResult<Vec<Order>> {
    let orders = state.users.list_deliveries(claims.sub, id).await?;
    Ok((StatusCode::OK, Json(ApiResponse::success(orders))))
}
