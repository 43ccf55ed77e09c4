//! Data models for the Doppler SDK
//!
//! Response types mirror the server representation and tolerate missing
//! fields. Request types omit unset and empty fields from the JSON body.
//!
//! # Key Types
//!
//! * [`ServiceAccount`] - a workplace service account as returned by the API
//! * [`ServiceAccounts`], [`ServiceAccountModel`] - response envelopes
//! * [`ServiceAccountBodyParams`], [`WorkplaceRoleObject`] - create/update bodies
//! * [`PageParams`] - resolved paging for list requests

use crate::errors::{Error, Result};
use serde::{Deserialize, Serialize};

/// Default page number for list requests
pub const DEFAULT_PAGE: i64 = 1;

/// Default page size for list requests
pub const DEFAULT_PER_PAGE: i64 = 20;

const ROLE_CONFLICT: &str = "you may provide an identifier OR permissions, but not both";

/// A workplace service account
///
/// # Example
///
/// ```no_run
/// # use doppler_sdk::Client;
/// # async fn example(client: &Client) -> Result<(), Box<dyn std::error::Error>> {
/// let model = client.retrieve_service_account("ci-deployer").await?;
/// let account = &model.service_account;
/// println!("{} ({}) has role {}", account.name, account.slug, account.workplace_role.name);
/// println!("created {}", account.created_at_time()?);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ServiceAccount {
    /// Display name
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    /// Unique identifier within the workplace
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub slug: String,
    /// Creation time, ISO-8601 as sent by the server
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub created_at: String,
    /// Role granted to the account
    #[serde(default)]
    pub workplace_role: WorkplaceRole,
}

impl ServiceAccount {
    /// Parse `created_at` as an RFC 3339 timestamp
    pub fn created_at_time(&self) -> Result<time::OffsetDateTime> {
        time::OffsetDateTime::parse(
            &self.created_at,
            &time::format_description::well_known::Rfc3339,
        )
        .map_err(|e| Error::Deserialize(format!("Invalid created_at timestamp: {}", e)))
    }
}

/// Workplace role attached to a service account
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct WorkplaceRole {
    /// Role name
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    /// Role identifier (e.g. `owner`, `collaborator`, or a custom role id)
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub identifier: String,
    /// Permissions granted by the role
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub permissions: Vec<String>,
    /// Creation time of the role
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub created_at: String,
    /// Whether the role was defined by the workplace
    #[serde(default)]
    pub is_custom_role: bool,
    /// Whether the role was created inline for a single account
    #[serde(default)]
    pub is_inline_role: bool,
}

/// Role to grant in a create or update request
///
/// Either an existing role referenced by identifier, or a list of permissions
/// granted directly. The API rejects requests that carry both.
///
/// ```
/// use doppler_sdk::WorkplaceRoleObject;
///
/// let role = WorkplaceRoleObject::Identifier("collaborator".to_string());
/// assert_eq!(serde_json::to_string(&role).unwrap(), r#"{"identifier":"collaborator"}"#);
///
/// let conflict = WorkplaceRoleObject::from_parts(
///     Some("collaborator".to_string()),
///     Some(vec!["enclave_project_read".to_string()]),
/// );
/// assert!(conflict.is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "RawWorkplaceRoleObject")]
pub enum WorkplaceRoleObject {
    /// Identifier of an existing workplace role
    Identifier(String),
    /// Workplace permissions to grant
    Permissions(Vec<String>),
}

impl WorkplaceRoleObject {
    /// Build a role from two optional fields
    ///
    /// An empty identifier counts as unset. Returns `Ok(None)` when neither
    /// field is set and [`Error::Validation`] when both are.
    pub fn from_parts(
        identifier: Option<String>,
        permissions: Option<Vec<String>>,
    ) -> Result<Option<Self>> {
        let identifier = identifier.filter(|id| !id.is_empty());
        match (identifier, permissions) {
            (Some(_), Some(_)) => Err(Error::Validation(ROLE_CONFLICT.to_string())),
            (Some(id), None) => Ok(Some(WorkplaceRoleObject::Identifier(id))),
            (None, Some(perms)) => Ok(Some(WorkplaceRoleObject::Permissions(perms))),
            (None, None) => Ok(None),
        }
    }

    /// True when the role carries nothing to send: an empty identifier or
    /// an empty permission list
    pub fn is_empty(&self) -> bool {
        match self {
            WorkplaceRoleObject::Identifier(id) => id.is_empty(),
            WorkplaceRoleObject::Permissions(perms) => perms.is_empty(),
        }
    }
}

#[derive(Deserialize)]
struct RawWorkplaceRoleObject {
    #[serde(default)]
    identifier: Option<String>,
    #[serde(default)]
    permissions: Option<Vec<String>>,
}

impl TryFrom<RawWorkplaceRoleObject> for WorkplaceRoleObject {
    type Error = Error;

    fn try_from(raw: RawWorkplaceRoleObject) -> Result<Self> {
        WorkplaceRoleObject::from_parts(raw.identifier, raw.permissions)?.ok_or_else(|| {
            Error::Validation("workplace_role needs an identifier or permissions".to_string())
        })
    }
}

/// Body of create and update requests
///
/// Empty values are left out of the JSON body, so an update never renames an
/// account to `""` or sends an empty role.
///
/// ```
/// use doppler_sdk::ServiceAccountBodyParams;
///
/// let params = ServiceAccountBodyParams::new("ci-deployer")
///     .with_permissions(vec!["enclave_project_read".to_string()]);
/// assert_eq!(
///     serde_json::to_string(&params).unwrap(),
///     r#"{"name":"ci-deployer","workplace_role":{"permissions":["enclave_project_read"]}}"#
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceAccountBodyParams {
    /// Display name
    #[serde(default, skip_serializing_if = "name_is_blank")]
    pub name: Option<String>,
    /// Role to grant
    #[serde(default, skip_serializing_if = "role_is_blank")]
    pub workplace_role: Option<WorkplaceRoleObject>,
}

fn name_is_blank(name: &Option<String>) -> bool {
    name.as_deref().map_or(true, str::is_empty)
}

fn role_is_blank(role: &Option<WorkplaceRoleObject>) -> bool {
    role.as_ref().map_or(true, WorkplaceRoleObject::is_empty)
}

impl ServiceAccountBodyParams {
    /// Start a body with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            workplace_role: None,
        }
    }

    /// Grant an existing role by identifier
    pub fn with_role_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.workplace_role = Some(WorkplaceRoleObject::Identifier(identifier.into()));
        self
    }

    /// Grant permissions directly
    pub fn with_permissions(mut self, permissions: Vec<String>) -> Self {
        self.workplace_role = Some(WorkplaceRoleObject::Permissions(permissions));
        self
    }

    /// Set the role
    pub fn with_workplace_role(mut self, role: WorkplaceRoleObject) -> Self {
        self.workplace_role = Some(role);
        self
    }
}

/// List envelope
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ServiceAccounts {
    /// Service accounts on the requested page, in server order
    #[serde(default)]
    pub service_accounts: Vec<ServiceAccount>,
    /// Whether the API reported success
    #[serde(default)]
    pub success: bool,
}

/// Single-account envelope
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ServiceAccountModel {
    /// The service account
    #[serde(default)]
    pub service_account: ServiceAccount,
    /// Whether the API reported success
    #[serde(default)]
    pub success: bool,
}

/// Resolved paging for list requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageParams {
    /// Page number, starting at 1
    pub page: i64,
    /// Results per page
    pub per_page: i64,
}

impl PageParams {
    /// Apply the defaulting policy: absent or non-positive values fall back
    /// to [`DEFAULT_PAGE`] and [`DEFAULT_PER_PAGE`]
    pub fn resolve(page: Option<i64>, limit: Option<i64>) -> Self {
        Self {
            page: page.filter(|p| *p > 0).unwrap_or(DEFAULT_PAGE),
            per_page: limit.filter(|l| *l > 0).unwrap_or(DEFAULT_PER_PAGE),
        }
    }

    /// Query parameters as sent on the wire
    pub fn to_query(self) -> Vec<(String, String)> {
        vec![
            ("page".to_string(), self.page.to_string()),
            ("per_page".to_string(), self.per_page.to_string()),
        ]
    }
}

impl Default for PageParams {
    fn default() -> Self {
        Self::resolve(None, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn test_decode_list_envelope() {
        let body = r#"{"service_accounts":[{"name":"a","slug":"s1"}],"success":true}"#;
        let list: ServiceAccounts = serde_json::from_str(body).unwrap();

        assert!(list.success);
        assert_eq!(list.service_accounts.len(), 1);
        assert_eq!(list.service_accounts[0].name, "a");
        assert_eq!(list.service_accounts[0].slug, "s1");
        assert_eq!(list.service_accounts[0].workplace_role, WorkplaceRole::default());
    }

    #[test]
    fn test_decode_full_account() {
        let body = json!({
            "service_account": {
                "name": "CI deployer",
                "slug": "ci-deployer",
                "created_at": "2024-03-01T12:30:00.000Z",
                "workplace_role": {
                    "name": "Collaborator",
                    "identifier": "collaborator",
                    "permissions": ["enclave_project_read"],
                    "is_custom_role": false,
                    "is_inline_role": false
                }
            },
            "success": true
        });
        let model: ServiceAccountModel = serde_json::from_value(body).unwrap();

        assert!(model.success);
        assert_eq!(model.service_account.workplace_role.identifier, "collaborator");
        assert_eq!(
            model.service_account.workplace_role.permissions,
            vec!["enclave_project_read".to_string()]
        );

        let created = model.service_account.created_at_time().unwrap();
        assert_eq!(created.year(), 2024);
        assert_eq!(created.hour(), 12);
    }

    #[test]
    fn test_created_at_invalid() {
        let account = ServiceAccount {
            created_at: "yesterday".to_string(),
            ..Default::default()
        };
        assert!(matches!(account.created_at_time(), Err(Error::Deserialize(_))));
    }

    #[test]
    fn test_body_omits_unset_fields() {
        let params = ServiceAccountBodyParams::new("ci").with_permissions(vec!["a".to_string()]);
        let value = serde_json::to_value(&params).unwrap();
        assert_eq!(value, json!({"name": "ci", "workplace_role": {"permissions": ["a"]}}));
        assert!(value["workplace_role"].get("identifier").is_none());

        let params = ServiceAccountBodyParams::new("ci").with_role_identifier("owner");
        let value = serde_json::to_value(&params).unwrap();
        assert_eq!(value, json!({"name": "ci", "workplace_role": {"identifier": "owner"}}));
        assert!(value["workplace_role"].get("permissions").is_none());

        let value = serde_json::to_value(ServiceAccountBodyParams::default()).unwrap();
        assert_eq!(value, json!({}));
    }

    #[test]
    fn test_body_omits_empty_name() {
        let params = ServiceAccountBodyParams::new("");
        assert_eq!(serde_json::to_string(&params).unwrap(), "{}");

        let params = ServiceAccountBodyParams::new("").with_role_identifier("viewer");
        assert_eq!(
            serde_json::to_value(&params).unwrap(),
            json!({"workplace_role": {"identifier": "viewer"}})
        );
    }

    #[test]
    fn test_body_omits_empty_identifier() {
        let params = ServiceAccountBodyParams::new("ci").with_role_identifier("");
        assert_eq!(serde_json::to_string(&params).unwrap(), r#"{"name":"ci"}"#);
        assert!(WorkplaceRoleObject::Identifier(String::new()).is_empty());
    }

    #[test]
    fn test_body_omits_empty_permissions() {
        let params = ServiceAccountBodyParams::new("ci")
            .with_workplace_role(WorkplaceRoleObject::Permissions(vec![]));
        assert_eq!(serde_json::to_string(&params).unwrap(), r#"{"name":"ci"}"#);

        let params = ServiceAccountBodyParams {
            name: Some(String::new()),
            workplace_role: Some(WorkplaceRoleObject::Permissions(vec![])),
        };
        assert_eq!(serde_json::to_string(&params).unwrap(), "{}");
    }

    #[test]
    fn test_role_from_parts() {
        assert_eq!(
            WorkplaceRoleObject::from_parts(Some("owner".to_string()), None).unwrap(),
            Some(WorkplaceRoleObject::Identifier("owner".to_string()))
        );
        assert_eq!(
            WorkplaceRoleObject::from_parts(Some(String::new()), Some(vec![])).unwrap(),
            Some(WorkplaceRoleObject::Permissions(vec![]))
        );
        assert_eq!(WorkplaceRoleObject::from_parts(None, None).unwrap(), None);

        let err = WorkplaceRoleObject::from_parts(
            Some("owner".to_string()),
            Some(vec!["a".to_string()]),
        )
        .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(err.to_string(), format!("validation: {}", ROLE_CONFLICT));
    }

    #[test]
    fn test_role_deserialize_rejects_both() {
        let body = json!({
            "name": "ci",
            "workplace_role": {"identifier": "owner", "permissions": ["a"]}
        });
        let err = serde_json::from_value::<ServiceAccountBodyParams>(body).unwrap_err();
        assert!(err.to_string().contains(ROLE_CONFLICT));

        let body = json!({"workplace_role": {"identifier": "owner"}});
        let params: ServiceAccountBodyParams = serde_json::from_value(body).unwrap();
        assert_eq!(params.workplace_role, Some(WorkplaceRoleObject::Identifier("owner".to_string())));
    }

    #[test]
    fn test_page_params_defaults() {
        assert_eq!(PageParams::default(), PageParams { page: 1, per_page: 20 });
        assert_eq!(PageParams::resolve(Some(0), Some(-5)), PageParams { page: 1, per_page: 20 });
        assert_eq!(PageParams::resolve(Some(3), Some(50)), PageParams { page: 3, per_page: 50 });
        assert_eq!(
            PageParams::resolve(Some(2), Some(10)).to_query(),
            vec![
                ("page".to_string(), "2".to_string()),
                ("per_page".to_string(), "10".to_string()),
            ]
        );
    }

    proptest! {
        #[test]
        fn prop_non_positive_paging_defaults(page in i64::MIN..=0, limit in i64::MIN..=0) {
            let resolved = PageParams::resolve(Some(page), Some(limit));
            prop_assert_eq!(resolved.page, DEFAULT_PAGE);
            prop_assert_eq!(resolved.per_page, DEFAULT_PER_PAGE);
        }

        #[test]
        fn prop_positive_paging_passes_through(page in 1i64.., limit in 1i64..) {
            let resolved = PageParams::resolve(Some(page), Some(limit));
            prop_assert_eq!(resolved.page, page);
            prop_assert_eq!(resolved.per_page, limit);
        }
    }
}
