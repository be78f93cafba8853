//! Client configuration.
//!
//! Resolved once at startup, in increasing priority:
//! 1. Built-in defaults (`http://localhost` + `/api`)
//! 2. `config.toml` in the application home
//! 3. `SMM_ORIGIN` / `SMM_BACKEND_URL` environment variables
//! 4. Explicit overrides from the command line
//!
//! A backend URL that is a bare path (e.g. `/api`) is joined to the origin,
//! the same way a browser resolves a relative API prefix.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::dirs::AppDirs;

/// Default origin used when the backend URL is relative.
pub const DEFAULT_ORIGIN: &str = "http://localhost";

/// Default API path prefix.
pub const DEFAULT_API_PATH: &str = "/api";

/// Environment variable for the backend URL (absolute or a path).
pub const BACKEND_URL_ENV: &str = "SMM_BACKEND_URL";

/// Environment variable for the origin relative backend URLs resolve against.
pub const ORIGIN_ENV: &str = "SMM_ORIGIN";

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

/// On-disk configuration (`config.toml`).
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct ConfigToml {
    /// Backend URL or API path prefix.
    #[serde(default)]
    pub backend_url: Option<String>,
    /// Origin relative backend URLs are joined to.
    #[serde(default)]
    pub origin: Option<String>,
    /// Request timeout in seconds. Unset means no timeout.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl ConfigToml {
    /// Load the config file; a missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;

        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }
}

/// Resolved client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Origin used for relative backend URLs.
    pub origin: String,
    /// Absolute API base URL, without trailing slash.
    pub base_url: String,
    /// Request timeout. `None` leaves the HTTP client's defaults in place.
    pub timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            origin: DEFAULT_ORIGIN.to_string(),
            base_url: join_base(DEFAULT_ORIGIN, DEFAULT_API_PATH),
            timeout: None,
        }
    }
}

impl ClientConfig {
    /// Load from the application home and the process environment.
    pub fn load(dirs: &AppDirs) -> Result<Self, ConfigError> {
        let file = ConfigToml::load(&dirs.config_file())?;
        let origin = std::env::var(ORIGIN_ENV).ok().filter(|v| !v.is_empty());
        let backend_url = std::env::var(BACKEND_URL_ENV).ok().filter(|v| !v.is_empty());
        Ok(Self::resolve(file, origin, backend_url))
    }

    /// Merge file values with environment overrides.
    pub fn resolve(
        file: ConfigToml,
        env_origin: Option<String>,
        env_backend_url: Option<String>,
    ) -> Self {
        let origin = env_origin
            .or(file.origin)
            .unwrap_or_else(|| DEFAULT_ORIGIN.to_string());
        let backend_url = env_backend_url
            .or(file.backend_url)
            .unwrap_or_else(|| DEFAULT_API_PATH.to_string());

        let config = Self {
            base_url: join_base(&origin, &backend_url),
            origin,
            timeout: file.timeout_secs.map(Duration::from_secs),
        };
        debug!(base_url = %config.base_url, "Resolved client configuration");
        config
    }

    /// Override the backend URL (absolute, or a path joined to the origin).
    pub fn with_backend_url(mut self, backend_url: &str) -> Self {
        self.base_url = join_base(&self.origin, backend_url);
        self
    }

    /// Override the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Full URL for an endpoint path such as `/auth/sign-in`.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

fn join_base(origin: &str, backend_url: &str) -> String {
    let backend_url = backend_url.trim();
    if backend_url.starts_with("http://") || backend_url.starts_with("https://") {
        return backend_url.trim_end_matches('/').to_string();
    }

    let path = backend_url.trim_matches('/');
    let origin = origin.trim_end_matches('/');
    if path.is_empty() {
        origin.to_string()
    } else {
        format!("{origin}/{path}")
    }
}
