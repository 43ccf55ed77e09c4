use crate::{auth::Auth, errors::Result, telemetry::TelemetryConfig, Error};
use std::time::Duration;

/// Environment variable holding the access token
pub const ENV_TOKEN: &str = "DOPPLER_TOKEN";

/// Environment variable overriding the API base URL
pub const ENV_API_HOST: &str = "DOPPLER_API_HOST";

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the Doppler API
    pub base_url: String,
    /// Authentication configuration
    pub auth: Auth,
    /// Request timeout
    pub timeout: Duration,
    /// User agent suffix
    pub user_agent_suffix: Option<String>,
    /// Telemetry configuration
    pub telemetry_config: TelemetryConfig,
    /// Allow plain HTTP base URLs
    pub allow_insecure_http: bool,
}

/// Builder for creating a configured Client
#[derive(Debug)]
pub struct ClientBuilder {
    base_url: String,
    auth: Option<Auth>,
    timeout_ms: u64,
    user_agent_suffix: Option<String>,
    telemetry_config: TelemetryConfig,
    allow_insecure_http: bool,
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ClientBuilder {
    /// Create a new client builder targeting the public Doppler API
    pub fn new() -> Self {
        Self {
            base_url: crate::DEFAULT_BASE_URL.to_string(),
            auth: None,
            timeout_ms: crate::DEFAULT_TIMEOUT_MS,
            user_agent_suffix: None,
            telemetry_config: TelemetryConfig::default(),
            allow_insecure_http: false,
        }
    }

    /// Create a builder from `DOPPLER_TOKEN` and, if set, `DOPPLER_API_HOST`
    ///
    /// A missing token is not an error here; [`ClientBuilder::build`] reports
    /// it when no other auth was configured.
    pub fn from_env() -> Self {
        let mut builder = Self::new();
        if let Ok(token) = std::env::var(ENV_TOKEN) {
            if !token.is_empty() {
                builder = builder.auth(Auth::bearer(token));
            }
        }
        if let Ok(host) = std::env::var(ENV_API_HOST) {
            if !host.is_empty() {
                builder = builder.base_url(host);
            }
        }
        builder
    }

    /// Set the API base URL (e.g., `"https://api.doppler.com"`)
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the authentication method
    pub fn auth(mut self, auth: Auth) -> Self {
        self.auth = Some(auth);
        self
    }

    /// Set the request timeout in milliseconds
    pub fn timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Add a custom user agent suffix
    pub fn user_agent_extra(mut self, suffix: impl Into<String>) -> Self {
        self.user_agent_suffix = Some(suffix.into());
        self
    }

    /// Configure telemetry/metrics
    #[cfg(feature = "metrics")]
    pub fn with_telemetry(mut self, config: TelemetryConfig) -> Self {
        self.telemetry_config = config;
        self
    }

    /// Enable telemetry with default settings
    #[cfg(feature = "metrics")]
    pub fn enable_telemetry(mut self) -> Self {
        self.telemetry_config.enabled = true;
        self
    }

    /// Allow plain HTTP base URLs (local proxies and test servers)
    pub fn allow_insecure_http(mut self) -> Self {
        self.allow_insecure_http = true;
        self
    }

    /// Validate the options and produce a [`ClientConfig`]
    pub fn build_config(self) -> Result<ClientConfig> {
        let url = self.base_url.trim_end_matches('/');

        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(Error::Config("Base URL must start with http:// or https://".to_string()));
        }

        if url.starts_with("http://") && !self.allow_insecure_http {
            return Err(Error::Config(
                "HTTP URLs are not allowed by default. Use .allow_insecure_http() to enable (dangerous!)".to_string(),
            ));
        }

        let auth = self.auth.ok_or_else(|| {
            Error::Config(format!(
                "Authentication is required. Use .auth() or set {}",
                ENV_TOKEN
            ))
        })?;

        Ok(ClientConfig {
            base_url: url.to_string(),
            auth,
            timeout: Duration::from_millis(self.timeout_ms),
            user_agent_suffix: self.user_agent_suffix,
            telemetry_config: self.telemetry_config,
            allow_insecure_http: self.allow_insecure_http,
        })
    }

    /// Build the client with the configured options
    pub fn build(self) -> Result<crate::Client> {
        crate::Client::new(self.build_config()?)
    }
}
