//! Request execution
//!
//! Operations describe their HTTP call as an [`ApiRequest`] and hand it to a
//! [`RequestExecutor`]. The executor owns everything below that line: base URL
//! resolution, authentication, sending, and translating error statuses.
//! [`HttpExecutor`] is the production implementation; tests can plug in their
//! own executor and never touch the network.

use crate::{
    config::ClientConfig,
    endpoints::route_template,
    errors::{Error, Result},
    util::{generate_request_id, header_str},
};

#[cfg(feature = "metrics")]
use crate::telemetry;
use async_trait::async_trait;
use http::Method;
use reqwest::Client as HttpClient;
use tracing::{debug, trace, warn};

const USER_AGENT_PREFIX: &str = "doppler-sdk-rust";

/// A prepared API request, relative to the configured base URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    /// HTTP method
    pub method: Method,
    /// Path starting with `/`
    pub path: String,
    /// Query parameters, in order
    pub query: Vec<(String, String)>,
    /// JSON body, if any
    pub body: Option<Vec<u8>>,
}

impl ApiRequest {
    /// Create a request without query or body
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    /// Attach query parameters
    pub fn with_query(mut self, query: Vec<(String, String)>) -> Self {
        self.query = query;
        self
    }

    /// Serialize `body` as the JSON payload
    pub fn with_json<T: serde::Serialize + ?Sized>(mut self, body: &T) -> Result<Self> {
        let payload = serde_json::to_vec(body)
            .map_err(|e| Error::Request(format!("Failed to encode request body: {}", e)))?;
        self.body = Some(payload);
        Ok(self)
    }
}

/// Transport used by [`crate::Client`] to execute requests
///
/// Implementations return the raw response body on success. Any failure,
/// including a non-success HTTP status, is returned as an [`Error`].
#[async_trait]
pub trait RequestExecutor: Send + Sync {
    /// Execute a request and return the response body
    async fn execute(&self, request: ApiRequest) -> Result<Vec<u8>>;
}

/// `reqwest`-backed executor talking to the Doppler API
#[derive(Clone)]
pub struct HttpExecutor {
    config: ClientConfig,
    http: HttpClient,
    #[cfg(feature = "metrics")]
    metrics: Option<std::sync::Arc<telemetry::Metrics>>,
}

impl std::fmt::Debug for HttpExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpExecutor")
            .field("base_url", &self.config.base_url)
            .field("timeout", &self.config.timeout)
            .field("auth", &self.config.auth)
            .finish()
    }
}

impl HttpExecutor {
    /// Create a new executor with the given configuration
    pub fn new(config: ClientConfig) -> Result<Self> {
        let user_agent = if let Some(suffix) = &config.user_agent_suffix {
            format!("{}/{} {}", USER_AGENT_PREFIX, crate::VERSION, suffix)
        } else {
            format!("{}/{}", USER_AGENT_PREFIX, crate::VERSION)
        };

        let mut default_headers = reqwest::header::HeaderMap::new();
        let _ = default_headers.insert(
            reqwest::header::ACCEPT,
            reqwest::header::HeaderValue::from_static("application/json"),
        );

        let http = HttpClient::builder()
            .user_agent(user_agent)
            .default_headers(default_headers)
            .timeout(config.timeout)
            .https_only(!config.allow_insecure_http)
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {}", e)))?;

        #[cfg(feature = "metrics")]
        let metrics = config
            .telemetry_config
            .enabled
            .then(|| telemetry::init_telemetry(config.telemetry_config.clone()));

        Ok(Self {
            config,
            http,
            #[cfg(feature = "metrics")]
            metrics,
        })
    }

    /// Base URL requests are resolved against
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    fn build_request(&self, request: ApiRequest) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.config.base_url, request.path);
        let request_id = generate_request_id();
        trace!(%url, %request_id, "building request");

        let mut builder = self
            .http
            .request(request.method, url)
            .header("X-Request-ID", request_id);

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = request.body {
            builder = builder
                .header(reqwest::header::CONTENT_TYPE, "application/json")
                .body(body);
        }

        builder
    }
}

#[async_trait]
impl RequestExecutor for HttpExecutor {
    async fn execute(&self, request: ApiRequest) -> Result<Vec<u8>> {
        let method = request.method.clone();
        let route = route_template(&request.path).to_string();
        #[cfg(feature = "metrics")]
        let start_time = std::time::Instant::now();

        let (auth_header, auth_value) = self
            .config
            .auth
            .get_header()
            .await
            .map_err(|e| Error::Config(format!("Failed to get auth header: {}", e)))?;

        let req = self
            .build_request(request)
            .header(auth_header, auth_value)
            .build()
            .map_err(|e| Error::Request(format!("Failed to build request: {}", e)))?;

        debug!(%method, %route, "sending request");

        let response = self.http.execute(req).await.map_err(|e| {
            warn!("request failed: {}", e);
            Error::from(e)
        })?;

        let status = response.status();
        let request_id = header_str(response.headers(), "x-request-id");
        let body = response.bytes().await.map_err(Error::from)?;

        #[cfg(feature = "metrics")]
        if let Some(metrics) = &self.metrics {
            metrics.record_request(
                method.as_str(),
                &route,
                status.as_u16(),
                start_time.elapsed().as_secs_f64(),
            );
        }

        if !status.is_success() {
            let error = Error::from_response(status.as_u16(), &body, request_id);
            debug!("API returned error: {}", error);
            return Err(error);
        }

        trace!(status = status.as_u16(), bytes = body.len(), "response received");
        Ok(body.to_vec())
    }
}
