//! Authentication service: credential checks and stateless JWT sessions.

use std::sync::Arc;

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::password;
use crate::error::{DomainError, DomainResult};
use crate::models::{Role, UserView};
use crate::store::RecordStore;

/// JWT claims: identity and role, verified statelessly against the shared
/// signing secret. No server-side session store exists, so revocation
/// waits out the expiry window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// User id.
    pub sub: Uuid,
    /// National id of the user at issue time.
    pub cpf: String,
    pub role: Role,
    /// Issued at (UTC timestamp).
    pub iat: usize,
    /// Expiration (UTC timestamp).
    pub exp: usize,
}

/// Login request body.
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    #[schema(example = "12345678900")]
    pub cpf: String,
    #[schema(example = "senha123")]
    pub password: String,
}

/// Successful login payload.
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserView,
}

pub struct AuthService {
    store: Arc<dyn RecordStore>,
    jwt_secret: String,
    token_ttl_secs: i64,
}

impl AuthService {
    pub fn new(store: Arc<dyn RecordStore>, jwt_secret: String, token_ttl_secs: i64) -> Self {
        Self {
            store,
            jwt_secret,
            token_ttl_secs,
        }
    }

    /// Look up the user by cpf, verify the password, and issue a signed
    /// session token. Stateless: the only side effect is token issuance.
    pub async fn authenticate(&self, cpf: &str, password_plain: &str) -> DomainResult<AuthResponse> {
        let user = self
            .store
            .find_user_by_cpf(cpf)
            .await?
            .ok_or(DomainError::NotFound("user"))?;

        if !password::verify(password_plain, &user.password_hash)? {
            return Err(DomainError::InvalidCredentials);
        }

        let now = Utc::now();
        let claims = Claims {
            sub: user.id,
            cpf: user.cpf.clone(),
            role: user.role,
            iat: now.timestamp() as usize,
            exp: (now + Duration::seconds(self.token_ttl_secs)).timestamp() as usize,
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )
        .map_err(|e| DomainError::Internal(format!("token signing failed: {e}")))?;

        Ok(AuthResponse {
            token,
            user: UserView::from(user),
        })
    }

    /// Verify a bearer token. Pure function of the token and the signing
    /// secret; never touches the record store.
    pub fn verify_token(&self, token: &str) -> DomainResult<Claims> {
        let key = DecodingKey::from_secret(self.jwt_secret.as_bytes());
        let validation = Validation::new(Algorithm::HS256);
        decode::<Claims>(token, &key, &validation)
            .map(|data| data.claims)
            .map_err(|_| DomainError::Unauthorized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::User;
    use crate::store::MemoryStore;

    async fn service_with_user(cpf: &str, pw: &str, ttl: i64) -> (AuthService, Uuid) {
        let store = Arc::new(MemoryStore::new());
        let user = User {
            id: Uuid::new_v4(),
            name: "Joao".to_string(),
            cpf: cpf.to_string(),
            email: "j@x.com".to_string(),
            password_hash: password::hash(pw).unwrap(),
            role: Role::Deliverer,
        };
        let user_id = user.id;
        store.insert_user(user).await.unwrap();
        (
            AuthService::new(store, "test-secret".to_string(), ttl),
            user_id,
        )
    }

    #[tokio::test]
    async fn test_authenticate_issues_verifiable_token() {
        let (auth, user_id) = service_with_user("111", "senha123", 3600).await;

        let resp = auth.authenticate("111", "senha123").await.unwrap();
        assert_eq!(resp.user.id, user_id);

        let claims = auth.verify_token(&resp.token).unwrap();
        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.cpf, "111");
        assert_eq!(claims.role, Role::Deliverer);
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[tokio::test]
    async fn test_authenticate_unknown_cpf_is_not_found() {
        let (auth, _) = service_with_user("111", "senha123", 3600).await;
        let err = auth.authenticate("999", "senha123").await.unwrap_err();
        assert_eq!(err, DomainError::NotFound("user"));
    }

    #[tokio::test]
    async fn test_authenticate_wrong_password() {
        let (auth, _) = service_with_user("111", "senha123", 3600).await;
        let err = auth.authenticate("111", "wrong").await.unwrap_err();
        assert_eq!(err, DomainError::InvalidCredentials);
    }

    #[tokio::test]
    async fn test_expired_token_is_unauthorized() {
        // jsonwebtoken applies 60s of leeway by default, so expire well past it.
        let (auth, _) = service_with_user("111", "senha123", -120).await;
        let resp = auth.authenticate("111", "senha123").await.unwrap();
        assert_eq!(auth.verify_token(&resp.token), Err(DomainError::Unauthorized));
    }

    #[tokio::test]
    async fn test_token_signed_with_other_secret_rejected() {
        let (auth, _) = service_with_user("111", "senha123", 3600).await;
        let resp = auth.authenticate("111", "senha123").await.unwrap();

        let other = AuthService::new(
            Arc::new(MemoryStore::new()),
            "different-secret".to_string(),
            3600,
        );
        assert_eq!(other.verify_token(&resp.token), Err(DomainError::Unauthorized));
        assert_eq!(other.verify_token("garbage"), Err(DomainError::Unauthorized));
    }
}
