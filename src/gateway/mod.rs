//! HTTP gateway: router wiring and server startup.

pub mod openapi;
pub mod state;
pub mod types;

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Context;
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    middleware::from_fn_with_state,
    routing::{get, post},
};
use tokio::net::TcpListener;
use utoipa::{OpenApi, ToSchema};

use crate::auth;
use crate::config::AppConfig;
use crate::orders;
use crate::store::RecordStore;
use crate::users;
use state::AppState;
use types::ApiResponse;

/// Health check response data.
#[derive(serde::Serialize, ToSchema)]
pub struct HealthResponse {
    /// Server timestamp in milliseconds
    #[schema(example = 1703494800000_u64)]
    pub timestamp_ms: u64,
    /// Crate version plus git revision
    #[schema(example = "0.1.0 (abc1234)")]
    pub version: String,
}

/// Health check endpoint
///
/// GET /api/v1/health
///
/// The record store is in-process, so there is no dependency to ping;
/// a response at all means the service is up.
#[utoipa::path(
    get,
    path = "/api/v1/health",
    responses(
        (status = 200, description = "Service healthy", body = HealthResponse)
    ),
    tag = "System"
)]
pub async fn health_check(
    State(_state): State<Arc<AppState>>,
) -> (StatusCode, Json<ApiResponse<HealthResponse>>) {
    let now_ms = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);

    (
        StatusCode::OK,
        Json(ApiResponse::success(HealthResponse {
            timestamp_ms: now_ms,
            version: format!("{} ({})", env!("CARGO_PKG_VERSION"), env!("GIT_HASH")),
        })),
    )
}

/// OpenAPI document endpoint
///
/// GET /api-docs/openapi.json
pub async fn serve_openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(openapi::ApiDoc::openapi())
}

/// Build the complete application router.
///
/// Public surface: login, health, OpenAPI document. Everything else sits
/// behind the JWT middleware, which rejects missing or invalid bearer
/// credentials before any domain operation runs.
pub fn build_router(state: Arc<AppState>) -> Router {
    let protected = Router::new()
        // User management
        .route(
            "/api/v1/users",
            post(users::handlers::create_user).get(users::handlers::list_users),
        )
        .route(
            "/api/v1/users/{id}",
            get(users::handlers::get_user)
                .put(users::handlers::update_user)
                .delete(users::handlers::delete_user),
        )
        .route(
            "/api/v1/users/{id}/deliveries",
            get(users::handlers::list_deliveries),
        )
        // Order lifecycle
        .route(
            "/api/v1/orders",
            post(orders::handlers::create_order).get(orders::handlers::list_orders),
        )
        .route(
            "/api/v1/orders/{id}",
            get(orders::handlers::get_order)
                .put(orders::handlers::update_order)
                .delete(orders::handlers::delete_order),
        )
        .route(
            "/api/v1/orders/{id}/return",
            post(orders::handlers::return_order),
        )
        .layer(from_fn_with_state(
            state.clone(),
            auth::middleware::jwt_auth_middleware,
        ));

    Router::new()
        .route("/api/v1/health", get(health_check))
        .route("/api/v1/auth/login", post(auth::handlers::login))
        .route("/api-docs/openapi.json", get(serve_openapi))
        .merge(protected)
        .with_state(state)
}

/// Start the HTTP server and block until it exits.
pub async fn run_server(
    config: &AppConfig,
    port: u16,
    store: Arc<dyn RecordStore>,
) -> anyhow::Result<()> {
    let state = Arc::new(AppState::new(store, &config.auth));
    let app = build_router(state);

    let addr = format!("{}:{}", config.gateway.host, port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!("🚀 Gateway listening on http://{addr}");
    tracing::info!("📖 OpenAPI document: http://{addr}/api-docs/openapi.json");

    axum::serve(listener, app).await.context("server error")
}
