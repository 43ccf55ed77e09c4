//! Doppler SDK for Rust
//!
//! A typed client for the Doppler workplace service accounts API: list,
//! retrieve, create, update and delete the non-human identities of a
//! workplace.
//!
//! # Features
//!
//! - Async/await support with tokio runtime
//! - Bearer, basic and dynamic token authentication
//! - Pluggable transport through [`RequestExecutor`]
//! - Typed roles: a role is granted by identifier *or* by permissions, never both
//! - Optional OpenTelemetry request metrics (`metrics` feature)
//!
//! # Example
//!
//! ```no_run
//! use doppler_sdk::{Auth, ClientBuilder};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ClientBuilder::new()
//!         .auth(Auth::bearer("dp.pt.your-token"))
//!         .build()?;
//!
//!     let accounts = client.list_service_accounts(None, None).await?;
//!     println!("{} service accounts", accounts.service_accounts.len());
//!
//!     Ok(())
//! }
//! ```

#![deny(
    missing_docs,
    missing_debug_implementations,
    unsafe_code,
    unused_results
)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod auth;
mod client;
mod config;
mod endpoints;
mod errors;
mod models;
/// Telemetry and observability support
#[cfg(feature = "metrics")]
pub mod telemetry;

#[cfg(not(feature = "metrics"))]
mod telemetry;
mod transport;
mod util;

pub use auth::{Auth, TokenProvider};
pub use client::Client;
pub use config::{ClientBuilder, ClientConfig, ENV_API_HOST, ENV_TOKEN};
pub use endpoints::SERVICE_ACCOUNTS_BASE;
pub use errors::{Error, Result};
pub use models::*;
pub use telemetry::TelemetryConfig;
pub use transport::{ApiRequest, HttpExecutor, RequestExecutor};

// Re-export commonly used types
pub use secrecy::SecretString;

/// SDK version, matches Cargo.toml version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Public Doppler API base URL
pub const DEFAULT_BASE_URL: &str = "https://api.doppler.com";

/// Default timeout in milliseconds
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;
