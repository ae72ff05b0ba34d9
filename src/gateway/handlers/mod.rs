//! HTTP handlers
//!
//! - [`order`]: `POST /order`
//! - [`query`]: customer and task read-throughs
//! - [`health`]: liveness

pub mod health;
pub mod order;
pub mod query;

pub use health::{HealthResponse, health_check};
pub use order::create_order;
pub use query::{TasksQuery, get_customer, get_tasks, get_tasks_by_phone};
