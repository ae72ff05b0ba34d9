use thiserror::Error;

#[derive(Debug, Error)]
pub enum PartnerError {
    #[error("Partner API request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Partner API returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Malformed partner API response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Unexpected partner API response: {0}")]
    UnexpectedShape(String),

    #[error("Partner API rejected the request: {message}")]
    Upstream { message: String },

    #[error("Task history scan gave up after {0} pages")]
    PageLimitExceeded(u32),
}

impl PartnerError {
    /// Business failure reported by the partner in a response envelope.
    pub fn upstream(message: impl Into<String>) -> Self {
        Self::Upstream {
            message: message.into(),
        }
    }
}
