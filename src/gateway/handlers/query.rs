//! Read-through handlers (customer, tasks)

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State, rejection::QueryRejection},
};
use serde::Deserialize;
use serde_json::Value;

use crate::partner::{minus_days, now_ms, task_customer_phone, tasks_since};

use super::super::state::AppState;
use super::super::types::{ApiError, ApiResult};

#[derive(Debug, Deserialize)]
pub struct TasksQuery {
    pub page: Option<u32>,
}

/// Get customer endpoint
///
/// GET /customer/{customer_id}
#[utoipa::path(
    get,
    path = "/customer/{customer_id}",
    params(
        ("customer_id" = String, Path, description = "Partner customer ID")
    ),
    responses(
        (status = 200, description = "Customer as returned by the partner", content_type = "application/json"),
        (status = 502, description = "Partner rejected the request or is unreachable")
    ),
    tag = "Customers"
)]
pub async fn get_customer(
    State(state): State<Arc<AppState>>,
    Path(customer_id): Path<String>,
) -> ApiResult<Json<Value>> {
    let customer = state.partner.get_customer(&customer_id).await?;
    Ok(Json(customer))
}

/// List tasks endpoint
///
/// GET /tasks?page=N
#[utoipa::path(
    get,
    path = "/tasks",
    params(
        ("page" = Option<u32>, Query, description = "1-based page number (default: 1)")
    ),
    responses(
        (status = 200, description = "One page of partner tasks", content_type = "application/json"),
        (status = 400, description = "Invalid page number"),
        (status = 502, description = "Partner rejected the request or is unreachable")
    ),
    tag = "Tasks"
)]
pub async fn get_tasks(
    State(state): State<Arc<AppState>>,
    query: Result<Query<TasksQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<Value>>> {
    let Query(query) = query.map_err(|e| ApiError::bad_request(e.body_text()))?;
    let tasks = state
        .partner
        .get_tasks_page(query.page.unwrap_or(1))
        .await?;
    Ok(Json(tasks))
}

/// Recent tasks for a phone number
///
/// GET /tasks/{phone}
///
/// Scans task pages for tasks created within the configured window
/// (`tasks.recent_days`) whose customer phone equals `phone` exactly. A
/// numeric phone on the partner side is compared by its digits.
#[utoipa::path(
    get,
    path = "/tasks/{phone}",
    params(
        ("phone" = String, Path, description = "Customer phone number, exact match")
    ),
    responses(
        (status = 200, description = "Matching tasks, newest pages first", content_type = "application/json"),
        (status = 500, description = "Scan exceeded the configured page limit"),
        (status = 502, description = "Partner rejected the request or is unreachable")
    ),
    tag = "Tasks"
)]
pub async fn get_tasks_by_phone(
    State(state): State<Arc<AppState>>,
    Path(phone): Path<String>,
) -> ApiResult<Json<Vec<Value>>> {
    let cutoff_ms = minus_days(now_ms(), state.tasks.recent_days);
    let tasks = tasks_since(
        state.partner.as_ref(),
        cutoff_ms,
        |task: &Value| task_customer_phone(task).as_deref() == Some(phone.as_str()),
        state.tasks.scan_options(),
    )
    .await?;

    tracing::debug!(matched = tasks.len(), "Recent tasks lookup finished");
    Ok(Json(tasks))
}
