//! Partner (logistics provider) API integration
//!
//! - [`signing`]: credentials and HMAC-SHA1 request envelopes
//! - [`envelope`]: response classification (`require_success`)
//! - [`client`]: signed HTTP client and domain operations
//! - [`history`]: paginated, time-windowed task scan
//! - [`models`]: customer / task records and listed-task accessors

pub mod client;
pub mod envelope;
pub mod error;
pub mod history;
pub mod models;
pub mod signing;

pub use client::PartnerClient;
pub use envelope::{UpstreamResponse, require_success};
pub use error::PartnerError;
pub use history::{DAY_IN_MS, ScanOptions, StopRule, TaskPages, minus_days, tasks_since};
pub use models::{
    Customer, NewCustomer, NewTask, PartnerId, Task, task_created_after, task_customer_phone,
};
pub use signing::{Credentials, SignedEnvelope, canonical_string, now_ms, sign};
