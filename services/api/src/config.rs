//! services/api/src/config.rs
//!
//! Defines the application's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development.

use std::net::SocketAddr;
use tracing::Level;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing the environment variable {0}")]
    MissingVar(String),
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Where the service-account key comes from.
#[derive(Clone, Debug)]
pub enum ServiceAccountSource {
    /// The key JSON itself, from `GOOGLE_SERVICE_ACCOUNT_JSON`.
    Inline(String),
    /// A path to the key file, from `GOOGLE_SERVICE_ACCOUNT_KEY`.
    File(String),
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub bind_address: SocketAddr,
    pub log_level: Level,
    pub service_account: ServiceAccountSource,
    pub sheet_id: String,
    pub ai_gateway_url: String,
    pub ai_api_key: String,
    pub report_model: String,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for development,
    /// but this is skipped in test environments to ensure tests are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Only load from .env in non-test mode to avoid contamination.
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }

        // --- Load Server Settings ---
        let bind_address_str =
            std::env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let bind_address = bind_address_str
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidValue("BIND_ADDRESS".to_string(), e.to_string()))?;

        let log_level_str = std::env::var("RUST_LOG").unwrap_or_else(|_| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        // --- Load Sheet Store Settings ---
        let service_account = if let Ok(json) = std::env::var("GOOGLE_SERVICE_ACCOUNT_JSON") {
            ServiceAccountSource::Inline(json)
        } else if let Ok(path) = std::env::var("GOOGLE_SERVICE_ACCOUNT_KEY") {
            ServiceAccountSource::File(path)
        } else {
            return Err(ConfigError::MissingVar(
                "GOOGLE_SERVICE_ACCOUNT_JSON or GOOGLE_SERVICE_ACCOUNT_KEY".to_string(),
            ));
        };

        let sheet_id = std::env::var("GOOGLE_SHEET_ID")
            .map_err(|_| ConfigError::MissingVar("GOOGLE_SHEET_ID".to_string()))?;

        // --- Load AI Gateway Settings ---
        let ai_gateway_url = std::env::var("AI_GATEWAY_URL")
            .unwrap_or_else(|_| "https://ai.gateway.lovable.dev/v1/chat/completions".to_string());
        let ai_api_key = std::env::var("AI_API_KEY")
            .map_err(|_| ConfigError::MissingVar("AI_API_KEY".to_string()))?;
        let report_model = std::env::var("REPORT_MODEL")
            .unwrap_or_else(|_| "google/gemini-3-flash-preview".to_string());

        Ok(Self {
            bind_address,
            log_level,
            service_account,
            sheet_id,
            ai_gateway_url,
            ai_api_key,
            report_model,
        })
    }
}
