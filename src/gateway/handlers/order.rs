//! Order submission handler

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode};

use super::super::state::AppState;
use super::super::types::{ApiResult, OrderAccepted, ValidatedOrder};

/// Create order endpoint
///
/// POST /order
///
/// Creates the customer first, then the task for that customer. The calls
/// are sequential because the task needs the new customer id; either
/// failure ends the request.
#[utoipa::path(
    post,
    path = "/order",
    request_body = crate::gateway::types::OrderRequest,
    responses(
        (status = 202, description = "Order forwarded to the partner", body = OrderAccepted),
        (status = 400, description = "Missing or malformed field"),
        (status = 502, description = "Partner rejected the request or is unreachable")
    ),
    tag = "Orders"
)]
pub async fn create_order(
    State(state): State<Arc<AppState>>,
    ValidatedOrder(req): ValidatedOrder,
) -> ApiResult<(StatusCode, Json<OrderAccepted>)> {
    let customer = state.partner.create_customer(&req.customer()).await?;
    tracing::debug!(customer_id = %customer.id, "Partner customer created");

    let task = state.partner.create_order(&req.task(customer.id.clone())).await?;
    tracing::info!(
        order_id = %task.id,
        customer_id = %customer.id,
        "Order forwarded to partner"
    );

    Ok((
        StatusCode::ACCEPTED,
        Json(OrderAccepted::new(task.id, customer.id)),
    ))
}
