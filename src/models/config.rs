//! Configuration module for Account Sentry
//!
//! Everything is optional: with no environment set the tool talks to the
//! public endpoint and the API binds to 0.0.0.0:8080.

use tracing::info;

use super::errors::{AppError, AppResult};
use crate::utils::constants::USERS_BY_NAME_URL;

/// Default API port
pub const DEFAULT_PORT: u16 = 8080;

/// Runtime configuration shared by both binaries
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Users-by-name endpoint the lookup client POSTs to
    pub lookup_url: String,

    /// API bind host
    pub host: String,

    /// API bind port
    pub port: u16,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            lookup_url: USERS_BY_NAME_URL.to_string(),
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl AppConfig {
    /// Load from process environment
    pub fn from_env() -> AppResult<Self> {
        Self::from_source(|key| std::env::var(key).ok())
    }

    /// Load from any key/value source (environment in production, maps in tests)
    pub fn from_source<F>(get: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = get("ACCOUNT_SENTRY_LOOKUP_URL").filter(|v| !v.trim().is_empty()) {
            info!(url = %url, "Using custom lookup endpoint");
            config.lookup_url = url;
        }

        if let Some(host) = get("ACCOUNT_SENTRY_HOST").filter(|v| !v.trim().is_empty()) {
            config.host = host;
        }

        // Hosting platforms set PORT; ACCOUNT_SENTRY_PORT is for local runs
        let port = ["PORT", "ACCOUNT_SENTRY_PORT"]
            .into_iter()
            .find_map(|key| get(key).map(|value| (key, value)));
        if let Some((key, port)) = port {
            config.port = port
                .trim()
                .parse()
                .map_err(|_| AppError::invalid_config(key, &port))?;
        }

        Ok(config)
    }

    /// Address string for the API listener
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
