//! API endpoint path construction

use crate::{
    errors::{Error, Result},
    util::encode_path,
};

/// Service accounts collection path
pub const SERVICE_ACCOUNTS_BASE: &str = "/v3/workplace/service_accounts";

/// Item route with the slug left as a placeholder
pub const SERVICE_ACCOUNT_ROUTE: &str = "/v3/workplace/service_accounts/service_account/{slug}";

const SERVICE_ACCOUNT_PREFIX: &str = "/v3/workplace/service_accounts/service_account/";

/// Endpoint paths, relative to the configured API base URL
#[derive(Debug, Clone, Copy, Default)]
pub struct Endpoints;

impl Endpoints {
    /// Collection path, used by list and create
    pub fn service_accounts(&self) -> String {
        SERVICE_ACCOUNTS_BASE.to_string()
    }

    /// Item path keyed by slug, used by retrieve, update and delete
    ///
    /// `.` and `..` are rejected: URL normalization would resolve them as
    /// dot-segments and send the request to a different route.
    pub fn service_account(&self, slug: &str) -> Result<String> {
        if slug == "." || slug == ".." {
            return Err(Error::Request(format!(
                "slug {:?} is not a valid path segment",
                slug
            )));
        }
        Ok(format!("{}{}", SERVICE_ACCOUNT_PREFIX, encode_path(slug)))
    }
}

/// Route template for a request path, with item slugs replaced by `{slug}`
pub fn route_template(path: &str) -> &str {
    if path.starts_with(SERVICE_ACCOUNT_PREFIX) {
        SERVICE_ACCOUNT_ROUTE
    } else {
        path
    }
}
