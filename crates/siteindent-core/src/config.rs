//! Client configuration.

use crate::auth::{LANDING_ROUTE, LOGIN_ROUTE};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable overriding [`ClientConfig::api_url`].
pub const ENV_API_URL: &str = "SITEINDENT_API_URL";

/// Environment variable overriding [`ClientConfig::request_timeout_secs`].
pub const ENV_TIMEOUT_SECS: &str = "SITEINDENT_TIMEOUT_SECS";

/// Shortest quiet period accepted for search debouncing.
pub const MIN_SEARCH_DEBOUNCE_MS: u64 = 300;

pub const DEFAULT_API_URL: &str = "http://localhost:3001/api";

/// Root configuration of the client, stored as `config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL of the REST service, without a trailing slash.
    pub api_url: String,
    pub request_timeout_secs: u64,
    pub search_debounce_ms: u64,
    /// Queries shorter than this are not sent.
    pub min_search_chars: usize,
    pub login_route: String,
    pub landing_route: String,
    /// Overrides the default location of the persisted session.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_file: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            request_timeout_secs: 30,
            search_debounce_ms: MIN_SEARCH_DEBOUNCE_MS,
            min_search_chars: 2,
            login_route: LOGIN_ROUTE.to_string(),
            landing_route: LANDING_ROUTE.to_string(),
            storage_file: None,
        }
    }
}

impl ClientConfig {
    /// Applies overrides read through `lookup`, usually `std::env::var`.
    ///
    /// Unparseable or empty values are ignored.
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_API_URL).filter(|v| !v.trim().is_empty()) {
            self.api_url = url.trim().to_string();
        }
        if let Some(secs) = lookup(ENV_TIMEOUT_SECS).and_then(|v| v.trim().parse().ok()) {
            self.request_timeout_secs = secs;
        }
        self
    }

    /// Applies overrides from the process environment.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Brings out-of-range values back into range.
    pub fn normalized(mut self) -> Self {
        self.api_url = self.api_url.trim_end_matches('/').to_string();
        self.search_debounce_ms = self.search_debounce_ms.max(MIN_SEARCH_DEBOUNCE_MS);
        self.min_search_chars = self.min_search_chars.max(1);
        if self.request_timeout_secs == 0 {
            self.request_timeout_secs = Self::default().request_timeout_secs;
        }
        self
    }
}
