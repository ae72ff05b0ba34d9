//! Partner Gateway - order intake facade for a logistics partner API
//!
//! Accepts order submissions over HTTP and forwards them, HMAC-signed, to
//! the partner. Customer and task lookups pass through to the partner.
//!
//! # Modules
//!
//! - [`partner`] - Signed client, response envelopes, task history scan
//! - [`gateway`] - Axum router, handlers, API types
//! - [`config`] - YAML configuration
//! - [`logging`] - Tracing subscriber setup

pub mod config;
pub mod gateway;
pub mod logging;
pub mod partner;

// Convenient re-exports at crate root
pub use config::{AppConfig, PartnerConfig, TaskQueryConfig};
pub use partner::{
    Credentials, PartnerClient, PartnerError, PartnerId, ScanOptions, StopRule, Task,
    minus_days, sign, tasks_since,
};
