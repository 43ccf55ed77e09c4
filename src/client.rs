//! Doppler service accounts client
//!
//! This module contains the [`Client`] that exposes the workplace service
//! account endpoints as typed async operations.
//!
//! Every operation follows the same linear flow: build an [`ApiRequest`],
//! hand it to the configured [`RequestExecutor`], decode the body. Nothing is
//! cached and nothing is retried; every error goes straight back to the
//! caller.
//!
//! # Examples
//!
//! ```no_run
//! use doppler_sdk::{Auth, ClientBuilder, ServiceAccountBodyParams};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = ClientBuilder::new()
//!     .auth(Auth::bearer("dp.pt.your-token"))
//!     .build()?;
//!
//! let page = client.list_service_accounts(None, Some(50)).await?;
//! for account in &page.service_accounts {
//!     println!("{} ({})", account.name, account.slug);
//! }
//!
//! let params = ServiceAccountBodyParams::new("ci-deployer").with_role_identifier("collaborator");
//! let created = client.create_service_account(&params).await?;
//! println!("created {}", created.service_account.slug);
//! # Ok(())
//! # }
//! ```

use crate::{
    config::ClientConfig,
    endpoints::Endpoints,
    errors::{Error, Result},
    models::*,
    transport::{ApiRequest, HttpExecutor, RequestExecutor},
};

use http::Method;
use std::sync::Arc;
use tracing::debug;

/// Doppler service accounts client
///
/// Cheap to clone; clones share the underlying executor.
#[derive(Clone)]
pub struct Client {
    executor: Arc<dyn RequestExecutor>,
    endpoints: Endpoints,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("endpoints", &self.endpoints)
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Create a new client backed by [`HttpExecutor`]
    pub(crate) fn new(config: ClientConfig) -> Result<Self> {
        let executor = HttpExecutor::new(config)?;
        Ok(Self::with_executor(Arc::new(executor)))
    }

    /// Create a client that sends requests through a custom executor
    pub fn with_executor(executor: Arc<dyn RequestExecutor>) -> Self {
        Self {
            executor,
            endpoints: Endpoints,
        }
    }

    /// List the workplace's service accounts
    ///
    /// Absent or non-positive `page` defaults to 1, absent or non-positive
    /// `limit` defaults to 20.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use doppler_sdk::Client;
    /// # async fn example(client: &Client) -> Result<(), Box<dyn std::error::Error>> {
    /// let first = client.list_service_accounts(None, None).await?;
    /// let third = client.list_service_accounts(Some(3), Some(100)).await?;
    /// println!("{} + {}", first.service_accounts.len(), third.service_accounts.len());
    /// # Ok(())
    /// # }
    /// ```
    pub async fn list_service_accounts(
        &self,
        page: Option<i64>,
        limit: Option<i64>,
    ) -> Result<ServiceAccounts> {
        let paging = PageParams::resolve(page, limit);
        debug!(page = paging.page, per_page = paging.per_page, "listing service accounts");

        let request = ApiRequest::new(Method::GET, self.endpoints.service_accounts())
            .with_query(paging.to_query());
        let body = self.executor.execute(request).await?;

        decode(&body)
    }

    /// Retrieve a service account by slug
    ///
    /// The slug is not validated locally beyond rejecting the dot-segments
    /// `.` and `..` with [`Error::Request`]; unknown slugs surface as the
    /// server's error, typically [`Error::Http`] with status 404.
    pub async fn retrieve_service_account(&self, slug: &str) -> Result<ServiceAccountModel> {
        debug!(slug, "retrieving service account");

        let request = ApiRequest::new(Method::GET, self.endpoints.service_account(slug)?);
        let body = self.executor.execute(request).await?;

        decode(&body)
    }

    /// Create a service account
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use doppler_sdk::{Client, ServiceAccountBodyParams};
    /// # async fn example(client: &Client) -> Result<(), Box<dyn std::error::Error>> {
    /// let params = ServiceAccountBodyParams::new("metrics-exporter")
    ///     .with_permissions(vec!["enclave_project_read".to_string()]);
    /// let created = client.create_service_account(&params).await?;
    /// assert!(created.success);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn create_service_account(
        &self,
        params: &ServiceAccountBodyParams,
    ) -> Result<ServiceAccountModel> {
        debug!(name = ?params.name, "creating service account");

        let request =
            ApiRequest::new(Method::POST, self.endpoints.service_accounts()).with_json(params)?;
        let body = self.executor.execute(request).await?;

        decode(&body)
    }

    /// Update a service account's name and/or role
    ///
    /// Fields left unset in `params` are not sent and stay unchanged.
    pub async fn update_service_account(
        &self,
        slug: &str,
        params: &ServiceAccountBodyParams,
    ) -> Result<ServiceAccountModel> {
        debug!(slug, "updating service account");

        let request = ApiRequest::new(Method::PATCH, self.endpoints.service_account(slug)?)
            .with_json(params)?;
        let body = self.executor.execute(request).await?;

        decode(&body)
    }

    /// Delete a service account
    ///
    /// Returns the raw response body. The API sends no structured payload on
    /// delete, so the body is never parsed.
    pub async fn delete_service_account(&self, slug: &str) -> Result<String> {
        debug!(slug, "deleting service account");

        let request = ApiRequest::new(Method::DELETE, self.endpoints.service_account(slug)?);
        let body = self.executor.execute(request).await?;

        Ok(String::from_utf8_lossy(&body).into_owned())
    }
}

fn decode<T: serde::de::DeserializeOwned>(body: &[u8]) -> Result<T> {
    serde_json::from_slice(body).map_err(Error::from)
}
