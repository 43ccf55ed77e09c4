//! Error types and handling for the Doppler SDK
//!
//! Every operation returns [`Result`]. Errors are reported exactly once to the
//! caller; the SDK never retries or swallows a failure.
//!
//! # Error Categories
//!
//! - **Validation**: request parameters rejected before any network I/O
//! - **Request**: the request could not be constructed (URL, body encoding)
//! - **HTTP Errors**: the API answered with a non-success status
//! - **Network / Timeout**: the request never got a response
//! - **Deserialization**: the response body did not match the expected shape
//! - **Configuration**: invalid client configuration
//!
//! # Example
//!
//! ```no_run
//! # use doppler_sdk::{Client, Error};
//! # async fn example(client: &Client) -> Result<(), Box<dyn std::error::Error>> {
//! match client.retrieve_service_account("ci-deployer").await {
//!     Ok(model) => println!("Found {}", model.service_account.name),
//!     Err(Error::Http { status: 404, .. }) => println!("No such service account"),
//!     Err(Error::Timeout) => println!("Request timed out"),
//!     Err(e) => return Err(e.into()),
//! }
//! # Ok(())
//! # }
//! ```

use thiserror::Error;

/// Result type alias for the SDK
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the SDK
#[derive(Error, Debug)]
pub enum Error {
    /// Request parameters failed a client-side precondition
    #[error("validation: {0}")]
    Validation(String),

    /// The request could not be built
    #[error("request: {0}")]
    Request(String),

    /// HTTP error from the API
    #[error("http {status}: {message} (req={request_id:?})")]
    Http {
        /// HTTP status code
        status: u16,
        /// Error message(s) reported by the server
        message: String,
        /// Request ID from x-request-id header
        request_id: Option<String>,
    },

    /// Deserialization error
    #[error("deserialize: {0}")]
    Deserialize(String),

    /// Network error
    #[error("network: {0}")]
    Network(String),

    /// Request timeout
    #[error("timeout")]
    Timeout,

    /// Configuration error
    #[error("config: {0}")]
    Config(String),

    /// Other errors
    #[error("other: {0}")]
    Other(String),
}

impl Error {
    /// Get the HTTP status code if this is an HTTP error
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Error::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Get the request ID if available
    pub fn request_id(&self) -> Option<&str> {
        match self {
            Error::Http { request_id, .. } => request_id.as_deref(),
            _ => None,
        }
    }

    /// True when the API reported the resource as missing (404)
    pub fn is_not_found(&self) -> bool {
        self.status_code() == Some(404)
    }

    /// True for errors raised locally before any request was sent
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation(_))
    }

    /// Build an HTTP error from a status code and the raw response body
    pub(crate) fn from_response(status: u16, body: &[u8], request_id: Option<String>) -> Self {
        let message = serde_json::from_slice::<ErrorResponse>(body)
            .ok()
            .filter(|resp| !resp.messages.is_empty())
            .map(|resp| resp.messages.join("; "))
            .unwrap_or_else(|| format!("HTTP error {}", status));

        Error::Http {
            status,
            message,
            request_id,
        }
    }
}

/// Doppler error body: `{"messages": ["..."], "success": false}`
#[derive(Debug, serde::Deserialize)]
pub(crate) struct ErrorResponse {
    #[serde(default)]
    pub messages: Vec<String>,
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Error::Timeout
        } else if err.is_connect() || err.is_request() {
            Error::Network(err.to_string())
        } else if err.is_builder() {
            Error::Request(err.to_string())
        } else if err.is_decode() {
            Error::Deserialize(err.to_string())
        } else {
            Error::Other(err.to_string())
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Deserialize(err.to_string())
    }
}
