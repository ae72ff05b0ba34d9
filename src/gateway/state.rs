use std::sync::Arc;

use crate::config::TaskQueryConfig;
use crate::partner::PartnerClient;

/// Gateway application state (shared, read-only)
#[derive(Clone)]
pub struct AppState {
    /// Signed client for the partner API
    pub partner: Arc<PartnerClient>,
    /// Recent-tasks lookup settings
    pub tasks: TaskQueryConfig,
}

impl AppState {
    pub fn new(partner: Arc<PartnerClient>, tasks: TaskQueryConfig) -> Self {
        Self { partner, tasks }
    }
}
