//! Connection settings read from the environment.

use std::time::Duration;

use crate::ApiError;

/// Environment variable holding the API base URL.
pub const API_URL_VAR: &str = "API_URL";

/// Environment variable holding the API credential.
pub const API_KEY_VAR: &str = "API_KEY";

/// Per-request timeout applied when none is configured.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Everything needed to reach the remote API.
#[derive(Clone)]
pub struct ApiConfig {
    /// Base URL without a trailing slash.
    pub api_url: String,
    /// Value of the `apikey` header.
    pub api_key: String,
    /// Timeout for every individual request.
    pub request_timeout: Duration,
}

impl std::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiConfig")
            .field("api_url", &self.api_url)
            .field("api_key", &"<redacted>")
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

impl ApiConfig {
    /// Creates a config from explicit values.
    #[must_use]
    pub fn new(api_url: &str, api_key: &str) -> Self {
        Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Overrides the per-request timeout.
    #[must_use]
    pub const fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Reads `API_URL` and `API_KEY`, loading a `.env` file from the
    /// working directory first if one exists. Variables already set in the
    /// process environment win over the file.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::MissingEnv`] if either variable is unset or
    /// empty.
    pub fn from_env() -> Result<Self, ApiError> {
        match dotenvy::dotenv() {
            Ok(path) => log::debug!("Loaded environment from {}", path.display()),
            Err(e) if e.not_found() => {}
            Err(e) => log::warn!("Ignoring unreadable .env file: {e}"),
        }

        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds a config from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::MissingEnv`] if either variable is missing or
    /// empty.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ApiError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |name: &str| {
            lookup(name)
                .filter(|value| !value.is_empty())
                .ok_or_else(|| ApiError::MissingEnv {
                    name: name.to_string(),
                })
        };

        let api_url = require(API_URL_VAR)?;
        let api_key = require(API_KEY_VAR)?;

        Ok(Self::new(&api_url, &api_key))
    }
}
