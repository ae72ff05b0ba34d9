//! Signed HTTP client for the partner API and the operations built on it.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Method;
use reqwest::header::ACCEPT;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use super::envelope::{UpstreamResponse, require_success};
use super::error::PartnerError;
use super::history::TaskPages;
use super::models::{Customer, NewCustomer, NewTask, Task};
use super::signing::{Credentials, now_ms, sign};

const APPLICATION_JSON: &str = "application/json";

/// Client for the partner API. Cheap to share behind an `Arc`.
pub struct PartnerClient {
    http: reqwest::Client,
    base_url: String,
    credentials: Credentials,
}

impl PartnerClient {
    /// `timeout` of `None` leaves outbound calls unbounded.
    pub fn new(
        base_url: &str,
        credentials: Credentials,
        timeout: Option<Duration>,
    ) -> Result<Self, PartnerError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
            credentials,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// Sign `fields`, send them as the JSON body and validate the response
    /// envelope.
    pub async fn send(
        &self,
        method: Method,
        url: &str,
        fields: &Map<String, Value>,
    ) -> Result<UpstreamResponse, PartnerError> {
        let envelope = sign(fields, &self.credentials, now_ms());
        debug!(%method, url, "Calling partner API");

        let response = self
            .http
            .request(method.clone(), url)
            .header(ACCEPT, APPLICATION_JSON)
            .json(&envelope)
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;
        if !status.is_success() {
            warn!(%method, url, status = status.as_u16(), "Partner API returned error status");
            return Err(PartnerError::Status {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        let parsed: Value = serde_json::from_slice(&body)?;
        require_success(parsed).inspect_err(|e| {
            warn!(%method, url, error = %e, "Partner API rejected request");
        })
    }

    // ========================================================================
    // Domain operations
    // ========================================================================

    /// POST /customers
    pub async fn create_customer(&self, customer: &NewCustomer) -> Result<Customer, PartnerError> {
        self.send(Method::POST, &self.endpoint("customers"), &fields_of(customer)?)
            .await?
            .into_record("customer")
    }

    /// POST /tasks
    pub async fn create_order(&self, task: &NewTask) -> Result<Task, PartnerError> {
        self.send(Method::POST, &self.endpoint("tasks"), &fields_of(task)?)
            .await?
            .into_record("task")
    }

    /// GET /customers/{id}, returned as the partner sent it. The id is
    /// forwarded as given.
    pub async fn get_customer(&self, id: &str) -> Result<Value, PartnerError> {
        let url = self.endpoint(&format!("customers/{}", urlencoding::encode(id)));
        Ok(self.send(Method::GET, &url, &Map::new()).await?.into_value())
    }

    /// GET /tasks?page={page}. Pages are 1-based; page size is the
    /// partner's choice. Tasks come back exactly as listed.
    pub async fn get_tasks_page(&self, page: u32) -> Result<Vec<Value>, PartnerError> {
        let url = format!("{}?page={}", self.endpoint("tasks"), page);
        let mut fields = Map::new();
        fields.insert("page".to_string(), Value::from(page));

        self.send(Method::GET, &url, &fields).await?.into_records()
    }
}

#[async_trait]
impl TaskPages for PartnerClient {
    async fn tasks_page(&self, page: u32) -> Result<Vec<Value>, PartnerError> {
        self.get_tasks_page(page).await
    }
}

fn fields_of<T: Serialize>(value: &T) -> Result<Map<String, Value>, PartnerError> {
    match serde_json::to_value(value)? {
        Value::Object(map) => Ok(map),
        other => Err(PartnerError::UnexpectedShape(format!(
            "request payload must be an object, got {}",
            other
        ))),
    }
}
