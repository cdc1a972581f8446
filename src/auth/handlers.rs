//! Login handler.

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode};

use super::service::{AuthResponse, LoginRequest};
use crate::gateway::state::AppState;
use crate::gateway::types::{ApiResponse, ApiResult};

/// Authenticate with cpf + password and receive a session token
///
/// POST /api/v1/auth/login
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 401, description = "Invalid credentials"),
        (status = 404, description = "No user with that cpf")
    ),
    tag = "Auth"
)]
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<AuthResponse> {
    let resp = state.auth.authenticate(&req.cpf, &req.password).await?;
    tracing::info!(user_id = %resp.user.id, "login succeeded");
    Ok((StatusCode::OK, Json(ApiResponse::success(resp))))
}
