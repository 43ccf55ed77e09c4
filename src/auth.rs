//! Authentication support for the Doppler SDK
//!
//! Doppler accepts its access tokens (personal, service, or service account
//! tokens) in two forms:
//!
//! 1. **Bearer Token** - `Authorization: Bearer <token>`
//! 2. **Basic** - the token as the basic-auth username with an empty password
//! 3. **Token Provider** - dynamically sourced tokens, sent as bearer
//!
//! # Examples
//!
//! ```
//! use doppler_sdk::Auth;
//!
//! let auth = Auth::bearer("dp.sa.your-token");
//! let auth = Auth::basic("dp.sa.your-token");
//! ```
//!
//! ## Dynamic Token Provider
//!
//! ```
//! use doppler_sdk::{Auth, TokenProvider, SecretString};
//! use async_trait::async_trait;
//! use std::sync::{Arc, Mutex};
//!
//! #[derive(Clone)]
//! struct VaultBackedToken {
//!     current_token: Arc<Mutex<String>>,
//! }
//!
//! #[async_trait]
//! impl TokenProvider for VaultBackedToken {
//!     async fn get_token(&self) -> Result<SecretString, Box<dyn std::error::Error + Send + Sync>> {
//!         let token = self.current_token.lock().unwrap().clone();
//!         Ok(SecretString::new(token))
//!     }
//!
//!     fn clone_box(&self) -> Box<dyn TokenProvider> {
//!         Box::new(self.clone())
//!     }
//! }
//!
//! let provider = VaultBackedToken {
//!     current_token: Arc::new(Mutex::new("dp.sa.initial".to_string())),
//! };
//! let auth = Auth::token_provider(provider);
//! ```

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use secrecy::{ExposeSecret, SecretString};
use std::fmt;

/// Authentication method for the Doppler API
///
/// All credentials are stored using [`SecretString`] so they never show up in
/// logs or debug output.
#[derive(Clone)]
pub enum Auth {
    /// Bearer token authentication
    ///
    /// Sent as `Authorization: Bearer <token>`
    Bearer(SecretString),
    /// HTTP basic authentication with the token as username
    ///
    /// Sent as `Authorization: Basic base64(<token>:)`
    Basic(SecretString),
    /// Dynamic token provider, sent as a bearer token
    TokenProvider(Box<dyn TokenProvider>),
}

impl Auth {
    /// Create a bearer token authentication
    pub fn bearer(token: impl Into<String>) -> Self {
        Auth::Bearer(SecretString::new(token.into()))
    }

    /// Create a basic authentication using the token as username
    pub fn basic(token: impl Into<String>) -> Self {
        Auth::Basic(SecretString::new(token.into()))
    }

    /// Create a dynamic token provider authentication
    pub fn token_provider(provider: impl TokenProvider + 'static) -> Self {
        Auth::TokenProvider(Box::new(provider))
    }

    /// Get the authorization header name and value
    pub(crate) async fn get_header(
        &self,
    ) -> Result<(&'static str, String), Box<dyn std::error::Error + Send + Sync>> {
        match self {
            Auth::Bearer(token) => Ok(("Authorization", format!("Bearer {}", token.expose_secret()))),
            Auth::Basic(token) => {
                let credentials = STANDARD.encode(format!("{}:", token.expose_secret()));
                Ok(("Authorization", format!("Basic {}", credentials)))
            }
            Auth::TokenProvider(provider) => {
                let token = provider.get_token().await?;
                Ok(("Authorization", format!("Bearer {}", token.expose_secret())))
            }
        }
    }
}

impl fmt::Debug for Auth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Auth::Bearer(_) => write!(f, "Auth::Bearer(****)"),
            Auth::Basic(_) => write!(f, "Auth::Basic(****)"),
            Auth::TokenProvider(_) => write!(f, "Auth::TokenProvider(****)"),
        }
    }
}

/// Trait for providing tokens resolved at request time
///
/// `get_token` is called once per request, so implementations should return a
/// cached value and refresh it out of band.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// Get the current token
    async fn get_token(&self) -> Result<SecretString, Box<dyn std::error::Error + Send + Sync>>;

    /// Clone the provider
    ///
    /// Typically implemented as `Box::new(self.clone())`.
    fn clone_box(&self) -> Box<dyn TokenProvider>;
}

impl Clone for Box<dyn TokenProvider> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}
