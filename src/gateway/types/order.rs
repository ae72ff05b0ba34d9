//! Inbound order types
//!
//! - `OrderRequest`: `POST /order` body
//! - `ValidatedOrder`: Axum extractor that turns body errors into a 400

use axum::{
    Json,
    extract::{FromRequest, Request},
};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::partner::{NewCustomer, NewTask, PartnerId};

use super::response::ApiError;

/// Order submission. All four fields are required strings; content is
/// validated by the partner, not here.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct OrderRequest {
    #[schema(example = "Ann Smith")]
    pub name: String,
    #[schema(example = "+972501234567")]
    pub phone: String,
    #[schema(example = "1 Main St, Springfield")]
    pub address: String,
    /// Becomes the partner task title
    #[schema(example = "2 boxes, fragile")]
    pub details: String,
}

impl OrderRequest {
    pub fn customer(&self) -> NewCustomer {
        NewCustomer {
            name: self.name.clone(),
            phone: self.phone.clone(),
            address: self.address.clone(),
        }
    }

    pub fn task(&self, customer_id: PartnerId) -> NewTask {
        NewTask {
            customer_id,
            address: self.address.clone(),
            title: self.details.clone(),
        }
    }
}

/// `Json<OrderRequest>` with rejections rendered as `ApiError`.
#[derive(Debug)]
pub struct ValidatedOrder(pub OrderRequest);

impl<S> FromRequest<S> for ValidatedOrder
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(order) = Json::<OrderRequest>::from_request(req, state)
            .await
            .map_err(|e| ApiError::bad_request(e.body_text()))?;
        Ok(Self(order))
    }
}
