//! Server configuration
//!
//! All settings come from environment variables with defaults:
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | HTTP_PORT | 3000 | HTTP service port |
//! | ENVIRONMENT | development | development \| staging \| production |
//! | LOG_DIR | (unset) | daily rolling log file directory |
//! | MAILER_MODE | log | log \| http |
//! | MAILER_ENDPOINT | (unset) | mail provider API URL (http mode) |
//! | MAILER_API_KEY | (unset) | mail provider credential (http mode) |
//! | MAILER_TEMPLATE | order-confirmation | template name for checkout emails |

use shared::error::{AppError, AppResult};

#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP API service port
    pub http_port: u16,
    /// Runtime environment: development | staging | production
    pub environment: String,
    /// Optional directory for daily rolling log files
    pub log_dir: Option<String>,
    /// Mailer backend: "log" (development) or "http" (provider API)
    pub mailer_mode: String,
    pub mailer_endpoint: Option<String>,
    pub mailer_api_key: Option<String>,
    pub mailer_template: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Missing credentials for a selected backend are a configuration
    /// error: fatal at startup, never discovered per-request.
    pub fn from_env() -> AppResult<Self> {
        let config = Self {
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            log_dir: std::env::var("LOG_DIR").ok(),
            mailer_mode: std::env::var("MAILER_MODE").unwrap_or_else(|_| "log".into()),
            mailer_endpoint: std::env::var("MAILER_ENDPOINT").ok(),
            mailer_api_key: std::env::var("MAILER_API_KEY").ok(),
            mailer_template: std::env::var("MAILER_TEMPLATE")
                .unwrap_or_else(|_| "order-confirmation".into()),
        };

        if config.mailer_mode == "http" {
            if config.mailer_endpoint.is_none() {
                return Err(AppError::configuration(
                    "MAILER_ENDPOINT is required when MAILER_MODE=http",
                ));
            }
            if config.mailer_api_key.is_none() {
                return Err(AppError::configuration(
                    "MAILER_API_KEY is required when MAILER_MODE=http",
                ));
            }
        }

        Ok(config)
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}
