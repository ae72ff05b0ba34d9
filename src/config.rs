use std::fmt;
use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::partner::{Credentials, PartnerId, ScanOptions, StopRule};

pub const DEFAULT_PARTNER_BASE_URL: &str = "http://developer-api.bringg.com/partner_api";

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub log_dir: String,
    pub log_file: String,
    pub use_json: bool,
    pub rotation: String,
    pub gateway: GatewayConfig,
    pub partner: PartnerConfig,
    #[serde(default)]
    pub tasks: TaskQueryConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GatewayConfig {
    pub host: String,
    pub port: u16,
}

/// Partner API endpoint and account. Loaded once; never refreshed.
#[derive(Serialize, Deserialize, Clone)]
pub struct PartnerConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    pub company_id: PartnerId,
    pub access_token: String,
    pub secret_key: String,
    /// Outbound request timeout. Unset means no timeout.
    #[serde(default)]
    pub request_timeout_ms: Option<u64>,
}

fn default_base_url() -> String {
    DEFAULT_PARTNER_BASE_URL.to_string()
}

impl PartnerConfig {
    pub fn credentials(&self) -> Credentials {
        Credentials::new(
            self.company_id.clone(),
            self.access_token.clone(),
            self.secret_key.clone(),
        )
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_ms.map(Duration::from_millis)
    }
}

impl fmt::Debug for PartnerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PartnerConfig")
            .field("base_url", &self.base_url)
            .field("company_id", &self.company_id)
            .field("access_token", &"<redacted>")
            .field("secret_key", &"<redacted>")
            .field("request_timeout_ms", &self.request_timeout_ms)
            .finish()
    }
}

/// Recent-tasks lookup (`GET /tasks/{phone}`)
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TaskQueryConfig {
    pub recent_days: u32,
    #[serde(default)]
    pub max_pages: Option<u32>,
    #[serde(default)]
    pub stop_rule: StopRule,
}

impl Default for TaskQueryConfig {
    fn default() -> Self {
        Self {
            recent_days: 7,
            max_pages: None,
            stop_rule: StopRule::EmptyPage,
        }
    }
}

impl TaskQueryConfig {
    pub fn scan_options(&self) -> ScanOptions {
        ScanOptions {
            stop_rule: self.stop_rule,
            max_pages: self.max_pages,
        }
    }
}

impl AppConfig {
    /// Load `config/{env}.yaml`
    pub fn load(env: &str) -> anyhow::Result<Self> {
        Self::from_file(format!("config/{}.yaml", env))
    }

    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_yaml(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_yaml(content: &str) -> anyhow::Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL: &str = r#"
log_level: debug
log_dir: ./logs
log_file: gateway.log
use_json: true
rotation: hourly
gateway:
  host: 127.0.0.1
  port: 3000
partner:
  base_url: http://partner.test/api
  company_id: 42
  access_token: tok
  secret_key: key
  request_timeout_ms: 1500
tasks:
  recent_days: 3
  max_pages: 50
  stop_rule: no_recent_tasks
"#;

    const MINIMAL: &str = r#"
log_level: info
log_dir: ./logs
log_file: gateway.log
use_json: false
rotation: never
gateway:
  host: 0.0.0.0
  port: 3000
partner:
  company_id: "acme"
  access_token: tok
  secret_key: key
"#;

    #[test]
    fn test_full_config_deserialize() {
        let config = AppConfig::from_yaml(FULL).unwrap();
        assert_eq!(config.gateway.port, 3000);
        assert_eq!(config.partner.base_url, "http://partner.test/api");
        assert_eq!(config.partner.company_id, PartnerId::Number(42));
        assert_eq!(config.partner.request_timeout(), Some(Duration::from_millis(1500)));
        assert_eq!(config.tasks.recent_days, 3);
        assert_eq!(
            config.tasks.scan_options(),
            ScanOptions {
                stop_rule: StopRule::NoRecentTasks,
                max_pages: Some(50),
            }
        );
    }

    #[test]
    fn test_minimal_config_defaults() {
        let config = AppConfig::from_yaml(MINIMAL).unwrap();
        assert_eq!(config.partner.base_url, DEFAULT_PARTNER_BASE_URL);
        assert_eq!(config.partner.company_id, PartnerId::Text("acme".to_string()));
        assert_eq!(config.partner.request_timeout(), None);
        assert_eq!(config.tasks, TaskQueryConfig::default());
        assert_eq!(config.tasks.recent_days, 7);
        assert_eq!(config.tasks.scan_options(), ScanOptions::default());
    }

    #[test]
    fn test_missing_credentials_rejected() {
        let yaml = MINIMAL.replace("  secret_key: key\n", "");
        assert!(AppConfig::from_yaml(&yaml).is_err());
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = AppConfig::from_file("config/does-not-exist.yaml").unwrap_err();
        assert!(format!("{:#}", err).contains("does-not-exist.yaml"));
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = AppConfig::from_yaml(FULL).unwrap();
        let shown = format!("{:?}", config);
        assert!(!shown.contains("tok\""));
        assert!(shown.contains("<redacted>"));
    }
}
