//! OpenAPI 3.0 documentation, served as JSON at `/api-docs/openapi.json`.

use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::auth::service::{AuthResponse, LoginRequest};
use crate::gateway::HealthResponse;
use crate::models::{Order, OrderStatus, Role, UserView};
use crate::orders::service::{CreateOrderRequest, UpdateOrderRequest};
use crate::users::service::{CreateUserRequest, UpdateUserRequest};

/// Bearer JWT security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_jwt",
                SecurityScheme::Http(
                    Http::builder()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some(
                            "Session token from POST /api/v1/auth/login, \
                             sent as `Authorization: Bearer {token}`",
                        ))
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "FastFeet Delivery API",
        version = "1.0.0",
        description = "Delivery-management backend: JWT authentication, \
                       role-based access control over users and delivery orders.",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:3333", description = "Development"),
    ),
    paths(
        crate::gateway::health_check,
        crate::auth::handlers::login,
        crate::users::handlers::create_user,
        crate::users::handlers::list_users,
        crate::users::handlers::get_user,
        crate::users::handlers::update_user,
        crate::users::handlers::delete_user,
        crate::users::handlers::list_deliveries,
        crate::orders::handlers::create_order,
        crate::orders::handlers::list_orders,
        crate::orders::handlers::get_order,
        crate::orders::handlers::update_order,
        crate::orders::handlers::return_order,
        crate::orders::handlers::delete_order,
    ),
    components(
        schemas(
            HealthResponse,
            LoginRequest,
            AuthResponse,
            Role,
            UserView,
            CreateUserRequest,
            UpdateUserRequest,
            Order,
            OrderStatus,
            CreateOrderRequest,
            UpdateOrderRequest,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "Credential verification and session tokens"),
        (name = "Users", description = "User account management (RBAC gated)"),
        (name = "Orders", description = "Delivery order lifecycle (RBAC gated)"),
        (name = "System", description = "Health checks")
    )
)]
pub struct ApiDoc;
