//! Shared gateway state.

use std::sync::Arc;

use crate::auth::AuthService;
use crate::config::AuthConfig;
use crate::orders::OrderService;
use crate::store::RecordStore;
use crate::users::UserService;

/// Application state shared by every request handler.
///
/// Nothing here is mutable between requests except through the record
/// store; the signing secret lives inside [`AuthService`] and is fixed at
/// process start.
pub struct AppState {
    pub store: Arc<dyn RecordStore>,
    pub auth: AuthService,
    pub users: UserService,
    pub orders: OrderService,
}

impl AppState {
    pub fn new(store: Arc<dyn RecordStore>, auth_config: &AuthConfig) -> Self {
        Self {
            auth: AuthService::new(
                store.clone(),
                auth_config.jwt_secret.clone(),
                auth_config.token_ttl_secs,
            ),
            users: UserService::new(store.clone()),
            orders: OrderService::new(store.clone()),
            store,
        }
    }
}
