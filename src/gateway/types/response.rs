//! API response types and error codes
//!
//! - `ApiResponse<T>`: wrapper used for gateway-generated bodies (health,
//!   errors). Partner read-throughs are returned unwrapped.
//! - `ApiError`: handler error, rendered as `ApiResponse` with an HTTP status
//! - `error_codes`: standard error code constants

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::partner::{PartnerError, PartnerId};

// ============================================================================
// Unified API Response Format
// ============================================================================

/// Unified API response wrapper
///
/// - code: 0 = success, non-zero = error code
/// - msg: short message description
/// - data: actual data (success) or absent (error)
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiResponse<T> {
    #[schema(example = 0)]
    pub code: i32,
    #[schema(example = "ok")]
    pub msg: String,
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

// ============================================================================
// Response DTOs
// ============================================================================

pub const ORDER_ACCEPTED_MESSAGE: &str =
    "The order was received and forwarded for further processing";

/// `POST /order` response body
#[derive(Debug, Serialize, ToSchema)]
pub struct OrderAccepted {
    #[schema(example = "The order was received and forwarded for further processing")]
    pub message: String,
    /// Partner task id
    pub order_id: PartnerId,
    /// Partner customer id
    pub customer_id: PartnerId,
}

impl OrderAccepted {
    pub fn new(order_id: PartnerId, customer_id: PartnerId) -> Self {
        Self {
            message: ORDER_ACCEPTED_MESSAGE.to_string(),
            order_id,
            customer_id,
        }
    }
}

// ============================================================================
// ApiError
// ============================================================================

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: i32,
    pub msg: String,
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn new(status: StatusCode, code: i32, msg: impl Into<String>) -> Self {
        Self {
            status,
            code,
            msg: msg.into(),
        }
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, error_codes::INVALID_PARAMETER, msg)
    }
}

impl From<PartnerError> for ApiError {
    fn from(err: PartnerError) -> Self {
        match &err {
            PartnerError::Upstream { message } => Self::new(
                StatusCode::BAD_GATEWAY,
                error_codes::UPSTREAM_REJECTED,
                message.clone(),
            ),
            PartnerError::PageLimitExceeded(_) => Self::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                error_codes::INTERNAL_ERROR,
                err.to_string(),
            ),
            PartnerError::Transport(_)
            | PartnerError::Status { .. }
            | PartnerError::Decode(_)
            | PartnerError::UnexpectedShape(_) => Self::new(
                StatusCode::BAD_GATEWAY,
                error_codes::UPSTREAM_UNAVAILABLE,
                err.to_string(),
            ),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ApiResponse::<()>::error(self.code, self.msg))).into_response()
    }
}

// ============================================================================
// Error Codes
// ============================================================================

/// Standard API error codes
pub mod error_codes {
    // Success
    pub const SUCCESS: i32 = 0;

    // Client errors (1xxx)
    pub const INVALID_PARAMETER: i32 = 1001;

    // Server errors (5xxx)
    pub const INTERNAL_ERROR: i32 = 5000;
    /// Partner answered with `success: false`
    pub const UPSTREAM_REJECTED: i32 = 5002;
    /// Partner unreachable or answered with something unusable
    pub const UPSTREAM_UNAVAILABLE: i32 = 5003;
}
