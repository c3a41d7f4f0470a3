//! Runtime configuration, read from the environment (and `.env` via dotenvy).

use std::time::Duration;

use crate::error::AdminError;
use crate::logging::config::LogLevel;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3000";
pub const DEFAULT_REDIRECT_DELAY_MS: u64 = 1500;

#[derive(Debug, Clone)]
pub struct AdminConfig {
    pub api_base_url: String,
    pub admin_token: Option<String>,
    /// Unset means requests never time out.
    pub http_timeout: Option<Duration>,
    /// Pause between a successful save and navigating back to the list.
    pub redirect_delay: Duration,
    pub log_level: LogLevel,
    pub environment: String,
}

impl Default for AdminConfig {
    fn default() -> Self {
        let environment =
            std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());
        let default_level = if environment == "production" {
            LogLevel::Info
        } else {
            LogLevel::Debug
        };

        Self {
            api_base_url: std::env::var("API_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string()),
            admin_token: std::env::var("ADMIN_TOKEN")
                .ok()
                .filter(|t| !t.trim().is_empty()),
            http_timeout: std::env::var("HTTP_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .filter(|secs: &u64| *secs > 0)
                .map(Duration::from_secs),
            redirect_delay: Duration::from_millis(
                std::env::var("REDIRECT_DELAY_MS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(DEFAULT_REDIRECT_DELAY_MS),
            ),
            log_level: std::env::var("LOG_LEVEL")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(default_level),
            environment,
        }
    }
}

impl AdminConfig {
    /// Config pointing at `base_url` with no token, no timeout and no redirect pause.
    pub fn for_base_url(base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: base_url.into(),
            admin_token: None,
            http_timeout: None,
            redirect_delay: Duration::ZERO,
            log_level: LogLevel::Info,
            environment: "development".to_string(),
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn validate(&self) -> Result<(), AdminError> {
        let url = self.api_base_url.trim();
        if url.is_empty() {
            return Err(AdminError::Config("API_BASE_URL must not be empty".to_string()));
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(AdminError::Config(format!(
                "API_BASE_URL must start with http:// or https:// (got {})",
                url
            )));
        }
        Ok(())
    }
}
