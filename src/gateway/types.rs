//! API response envelope and the domain-error-to-status translation.
//!
//! - `ApiResponse<T>`: unified response wrapper
//! - `error_codes`: stable numeric error code constants
//! - `ApiError`: the single point where `DomainError` kinds become HTTP
//!   status codes; nothing downstream of the services invents status logic.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::DomainError;

/// Unified API response wrapper.
///
/// - code: 0 = success, non-zero = error code
/// - msg: short message description
/// - data: actual data (success) or absent (error)
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Response code: 0 for success, non-zero for errors
    #[schema(example = 0)]
    pub code: i32,
    /// Response message
    #[schema(example = "ok")]
    pub msg: String,
    /// Response data (only present when code == 0)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            code: error_codes::SUCCESS,
            msg: "ok".to_string(),
            data: Some(data),
        }
    }

    pub fn error(code: i32, msg: impl Into<String>) -> ApiResponse<()> {
        ApiResponse {
            code,
            msg: msg.into(),
            data: None,
        }
    }
}

/// Stable API error codes, independent of HTTP status.
pub mod error_codes {
    pub const SUCCESS: i32 = 0;

    // Client errors (1xxx)
    pub const INVALID_PARAMETER: i32 = 1001;

    // Auth errors (2xxx)
    pub const AUTH_FAILED: i32 = 2002;
    pub const FORBIDDEN: i32 = 2003;

    // Resource errors (4xxx)
    pub const NOT_FOUND: i32 = 4004;
    pub const CONFLICT: i32 = 4009;

    // Server errors (5xxx)
    pub const INTERNAL_ERROR: i32 = 5000;
}

/// Handler result: success tuple or a translated error.
pub type ApiResult<T> = Result<(StatusCode, Json<ApiResponse<T>>), ApiError>;

/// Transport-side error carrying the HTTP status and envelope fields.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    code: i32,
    msg: String,
}

impl ApiError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            code: error_codes::INVALID_PARAMETER,
            msg: msg.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn code(&self) -> i32 {
        self.code
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Unauthorized => Self {
                status: StatusCode::UNAUTHORIZED,
                code: error_codes::AUTH_FAILED,
                msg: "missing or invalid credential".to_string(),
            },
            DomainError::InvalidCredentials => Self {
                status: StatusCode::UNAUTHORIZED,
                code: error_codes::AUTH_FAILED,
                msg: "invalid cpf or password".to_string(),
            },
            DomainError::Forbidden => Self {
                status: StatusCode::FORBIDDEN,
                code: error_codes::FORBIDDEN,
                msg: "insufficient privilege for this operation".to_string(),
            },
            DomainError::NotFound(what) => Self {
                status: StatusCode::NOT_FOUND,
                code: error_codes::NOT_FOUND,
                msg: format!("{what} not found"),
            },
            DomainError::Conflict(field) => Self {
                status: StatusCode::CONFLICT,
                code: error_codes::CONFLICT,
                msg: format!("{field} already exists"),
            },
            DomainError::BadRequest(msg) => Self {
                status: StatusCode::BAD_REQUEST,
                code: error_codes::INVALID_PARAMETER,
                msg,
            },
            DomainError::Internal(detail) => {
                // Log the detail, surface an opaque failure.
                tracing::error!("internal error: {detail}");
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    code: error_codes::INTERNAL_ERROR,
                    msg: "internal error".to_string(),
                }
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ApiResponse::<()>::error(self.code, self.msg)),
        )
            .into_response()
    }
}
