//! Gateway types module
//!
//! ## Input Types
//! - [`OrderRequest`]: `POST /order` body
//! - [`ValidatedOrder`]: Axum extractor with `ApiError` rejections
//!
//! ## Output Types
//! - [`ApiResponse<T>`]: unified wrapper for gateway-generated bodies
//! - [`OrderAccepted`]: `POST /order` response
//! - [`ApiError`]: handler error type

pub mod order;
pub mod response;

pub use order::{OrderRequest, ValidatedOrder};
pub use response::{ApiError, ApiResponse, ApiResult, OrderAccepted, error_codes};
