//! Partner Gateway entry point
//!
//! ```text
//! ┌──────────┐    ┌──────────┐    ┌──────────────┐    ┌──────────┐
//! │  Client  │───▶│ Gateway  │───▶│ PartnerClient│───▶│ Partner  │
//! │  (HTTP)  │    │  (axum)  │    │ (HMAC-SHA1)  │    │   API    │
//! └──────────┘    └──────────┘    └──────────────┘    └──────────┘
//! ```
//!
//! Flags:
//! - `--env <name>` / `-e <name>`: load `config/<name>.yaml` (default `dev`)
//! - `--config <path>`: load an explicit config file instead
//! - `--port <port>`: override `gateway.port`

use std::process::ExitCode;
use std::sync::Arc;

use partner_gateway::config::AppConfig;
use partner_gateway::gateway::{self, state::AppState};
use partner_gateway::logging::init_logging;
use partner_gateway::partner::PartnerClient;

fn arg_value(args: &[String], names: &[&str]) -> Option<String> {
    args.iter()
        .position(|a| names.contains(&a.as_str()))
        .and_then(|i| args.get(i + 1))
        .cloned()
}

fn load_config(args: &[String]) -> anyhow::Result<AppConfig> {
    match arg_value(args, &["--config"]) {
        Some(path) => AppConfig::from_file(path),
        None => {
            let env = arg_value(args, &["--env", "-e"]).unwrap_or_else(|| "dev".to_string());
            AppConfig::load(&env)
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();

    // Logging needs the config, so config errors go to stderr.
    let app_config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("FATAL: {:#}", e);
            return ExitCode::FAILURE;
        }
    };
    let _log_guard = init_logging(&app_config);

    match run(app_config, &args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("FATAL: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(app_config: AppConfig, args: &[String]) -> anyhow::Result<()> {
    let port = match arg_value(args, &["--port"]) {
        Some(raw) => raw.parse()?,
        None => app_config.gateway.port,
    };

    tracing::info!(
        company_id = %app_config.partner.company_id,
        recent_days = app_config.tasks.recent_days,
        "Starting partner gateway"
    );

    let partner = PartnerClient::new(
        &app_config.partner.base_url,
        app_config.partner.credentials(),
        app_config.partner.request_timeout(),
    )?;
    let state = Arc::new(AppState::new(Arc::new(partner), app_config.tasks.clone()));

    gateway::run_server(&app_config.gateway.host, port, state).await
}
