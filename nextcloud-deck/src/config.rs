//! Connector configuration: server location, credentials, HTTP tuning.

use std::time::Duration;

use crate::error::{DeckError, Result};

/// Environment variable holding the Nextcloud base URL.
pub const ENV_SERVER_URL: &str = "NEXTCLOUD_SERVER_URL";
/// Environment variable holding the login name.
pub const ENV_USERNAME: &str = "NEXTCLOUD_USERNAME";
/// Environment variable holding the password or app password.
pub const ENV_PASSWORD: &str = "NEXTCLOUD_PASSWORD";

/// Server location and credentials for one Nextcloud instance.
///
/// The connector itself holds no other state - every call re-reads the
/// remote as the source of truth.
#[derive(Debug, Clone)]
pub struct DeckConfig {
    /// Base URL without a trailing slash, e.g. `https://cloud.example.com`
    pub server_url: String,
    pub username: String,
    pub password: String,
}

impl DeckConfig {
    /// Create a config, stripping any trailing slash from the server URL
    pub fn new(
        server_url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        let mut server_url = server_url.into();
        while server_url.ends_with('/') {
            server_url.pop();
        }
        Self {
            server_url,
            username: username.into(),
            password: password.into(),
        }
    }

    /// Read credentials from `NEXTCLOUD_SERVER_URL`, `NEXTCLOUD_USERNAME`
    /// and `NEXTCLOUD_PASSWORD`.
    pub fn from_env() -> Result<Self> {
        let read = |name: &str| {
            std::env::var(name)
                .ok()
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| DeckError::config(format!("{name} is not set")))
        };
        Ok(Self::new(
            read(ENV_SERVER_URL)?,
            read(ENV_USERNAME)?,
            read(ENV_PASSWORD)?,
        ))
    }
}

/// HTTP client tuning, separate from credentials.
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Per-request timeout. There is no retry on top of this - a hung
    /// remote call is bounded only here; retries belong to the host.
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            user_agent: concat!("nextcloud-deck/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}
