//! JWT bearer middleware.
//!
//! Extracts and verifies the `Authorization: Bearer` credential before any
//! protected handler runs, then injects the decoded [`Claims`] into request
//! extensions. Handlers never see the raw token.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{Request, header},
    middleware::Next,
    response::Response,
};

use crate::error::DomainError;
use crate::gateway::state::AppState;
use crate::gateway::types::ApiError;

pub async fn jwt_auth_middleware(
    State(state): State<Arc<AppState>>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or(DomainError::Unauthorized)?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or(DomainError::Unauthorized)?;

    let claims = state.auth.verify_token(token)?;
    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}
