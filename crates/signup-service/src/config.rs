//! Signup service configuration.
//!
//! Loaded once from environment variables at startup and shared read-only.
//! The three upstream settings are optional at load time: a deployment
//! without them still starts (health checks pass) but answers every signup
//! with 500 "Server not configured". Secrets are redacted in Debug output.

use common::secret::SecretString;
use std::collections::HashMap;
use std::env;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Default port when neither `BIND_ADDRESS` nor `PORT` is set.
pub const DEFAULT_PORT: u16 = 8080;

/// Default upstream request timeout in seconds.
pub const DEFAULT_UPSTREAM_TIMEOUT_SECONDS: u64 = 5;

/// Upper bound for `GHOST_TIMEOUT_SECONDS`.
pub const MAX_UPSTREAM_TIMEOUT_SECONDS: u64 = 60;

/// Upstream statuses meaning "member already exists" / "already processed".
pub const DEFAULT_ACCEPTED_STATUSES: [u16; 2] = [409, 422];

#[derive(Clone)]
pub struct Config {
    /// Server bind address (default: "0.0.0.0:8080").
    pub bind_address: String,

    /// Expected bearer secret for inbound webhooks.
    pub shared_secret: Option<SecretString>,

    /// Admin API key material, `<id>:<hex-secret>`. Parsed at issuance time;
    /// a malformed key fails each signup with 500.
    pub admin_key: Option<SecretString>,

    /// Upstream base URL with trailing slashes removed.
    pub upstream_url: Option<String>,

    /// Timeout for the single upstream write.
    pub upstream_timeout: Duration,

    /// Non-2xx upstream statuses treated as success.
    pub accepted_statuses: Vec<u16>,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("bind_address", &self.bind_address)
            .field(
                "shared_secret",
                &self.shared_secret.as_ref().map(|_| "[REDACTED]"),
            )
            .field("admin_key", &self.admin_key.as_ref().map(|_| "[REDACTED]"))
            .field("upstream_url", &self.upstream_url)
            .field("upstream_timeout", &self.upstream_timeout)
            .field("accepted_statuses", &self.accepted_statuses)
            .finish()
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid port: {0}")]
    InvalidPort(String),

    #[error("Invalid upstream timeout: {0}")]
    InvalidTimeout(String),

    #[error("Invalid accepted status list: {0}")]
    InvalidAcceptedStatuses(String),
}

/// Returns the value for `key` unless it is missing or empty.
fn non_empty(vars: &HashMap<String, String>, key: &str) -> Option<String> {
    vars.get(key).filter(|v| !v.is_empty()).cloned()
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(&env::vars().collect())
    }

    /// Load configuration from a HashMap (for testing).
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let bind_address = match non_empty(vars, "BIND_ADDRESS") {
            Some(address) => address,
            None => {
                let port = match non_empty(vars, "PORT") {
                    Some(value) => value.parse::<u16>().map_err(|e| {
                        ConfigError::InvalidPort(format!(
                            "PORT must be a valid port number, got '{}': {}",
                            value, e
                        ))
                    })?,
                    None => DEFAULT_PORT,
                };
                format!("0.0.0.0:{port}")
            }
        };

        let shared_secret = non_empty(vars, "SHARED_SECRET").map(SecretString::from);
        let admin_key = non_empty(vars, "GHOST_ADMIN_KEY").map(SecretString::from);
        let upstream_url = non_empty(vars, "GHOST_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty());

        let upstream_timeout = if let Some(value_str) = non_empty(vars, "GHOST_TIMEOUT_SECONDS") {
            let value: u64 = value_str.parse().map_err(|e| {
                ConfigError::InvalidTimeout(format!(
                    "GHOST_TIMEOUT_SECONDS must be a valid positive integer, got '{}': {}",
                    value_str, e
                ))
            })?;

            if value == 0 || value > MAX_UPSTREAM_TIMEOUT_SECONDS {
                return Err(ConfigError::InvalidTimeout(format!(
                    "GHOST_TIMEOUT_SECONDS must be between 1 and {}, got {}",
                    MAX_UPSTREAM_TIMEOUT_SECONDS, value
                )));
            }

            Duration::from_secs(value)
        } else {
            Duration::from_secs(DEFAULT_UPSTREAM_TIMEOUT_SECONDS)
        };

        let accepted_statuses = match non_empty(vars, "GHOST_ACCEPTED_STATUSES") {
            Some(list) => parse_accepted_statuses(&list)?,
            None => DEFAULT_ACCEPTED_STATUSES.to_vec(),
        };

        Ok(Config {
            bind_address,
            shared_secret,
            admin_key,
            upstream_url,
            upstream_timeout,
            accepted_statuses,
        })
    }

    /// True when every setting a signup needs is present.
    pub fn is_complete(&self) -> bool {
        self.shared_secret.is_some() && self.admin_key.is_some() && self.upstream_url.is_some()
    }
}

fn parse_accepted_statuses(list: &str) -> Result<Vec<u16>, ConfigError> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            let status: u16 = s.parse().map_err(|e| {
                ConfigError::InvalidAcceptedStatuses(format!(
                    "GHOST_ACCEPTED_STATUSES entries must be integers, got '{}': {}",
                    s, e
                ))
            })?;

            // Only client errors may be promoted to success.
            if !(400..500).contains(&status) {
                return Err(ConfigError::InvalidAcceptedStatuses(format!(
                    "GHOST_ACCEPTED_STATUSES entries must be 4xx, got {}",
                    status
                )));
            }

            Ok(status)
        })
        .collect()
}
