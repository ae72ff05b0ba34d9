//! OpenAPI / Swagger UI Documentation
//!
//! - Swagger UI: `http://localhost:3000/docs`
//! - OpenAPI JSON: `http://localhost:3000/api-docs/openapi.json`

use utoipa::OpenApi;

use crate::gateway::handlers::HealthResponse;
use crate::gateway::types::{OrderAccepted, OrderRequest};
use crate::partner::PartnerId;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Partner Gateway API",
        version = "1.0.0",
        description = "Accepts orders and forwards them, signed, to the logistics partner API. Customer and task reads pass through to the partner.",
        license(
            name = "MIT"
        )
    ),
    servers(
        (url = "http://localhost:3000", description = "Development"),
    ),
    paths(
        crate::gateway::handlers::health::health_check,
        crate::gateway::handlers::order::create_order,
        crate::gateway::handlers::query::get_customer,
        crate::gateway::handlers::query::get_tasks,
        crate::gateway::handlers::query::get_tasks_by_phone,
    ),
    components(
        schemas(
            HealthResponse,
            OrderRequest,
            OrderAccepted,
            PartnerId,
        )
    ),
    tags(
        (name = "Orders", description = "Order submission"),
        (name = "Customers", description = "Partner customer lookups"),
        (name = "Tasks", description = "Partner task lookups"),
        (name = "System", description = "Health checks")
    )
)]
pub struct ApiDoc;
