//! User directory models
//!
//! The user directory is loosely typed: scalar fields of the wrong JSON type
//! are read as absent rather than failing the whole inventory.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::lenient;

/// A user as returned by `GET /v1/users`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Explicit user identifier, string or number
    #[serde(default, deserialize_with = "lenient::string_or_number")]
    pub id: Option<String>,

    /// User email address
    #[serde(default, deserialize_with = "lenient::string")]
    pub email: Option<String>,

    /// Raw account status (e.g. "Active", "Disabled")
    #[serde(default, deserialize_with = "lenient::string")]
    pub status: Option<String>,

    /// Organization memberships with per-org login times
    #[serde(default, deserialize_with = "lenient_memberships")]
    pub org_members: Vec<OrgMembership>,
}

/// Link between a user and an organization
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrgMembership {
    /// Organization ID
    #[serde(default, deserialize_with = "lenient::string")]
    pub org_id: Option<String>,

    /// Last login in this organization, as sent by the API
    #[serde(default, deserialize_with = "lenient::string")]
    pub last_login_at: Option<String>,
}

/// Account status
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserStatus {
    Active,
    Disabled,
    /// Any other value, including a missing status
    Other(String),
}

impl UserStatus {
    /// Interpret a raw status string, ignoring case
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some(s) if s.eq_ignore_ascii_case("active") => UserStatus::Active,
            Some(s) if s.eq_ignore_ascii_case("disabled") => UserStatus::Disabled,
            Some(s) => UserStatus::Other(s.to_string()),
            None => UserStatus::Other(String::new()),
        }
    }
}

impl User {
    /// Identifier used for the `_user` entity: `id`, else `email`.
    pub fn identifier(&self) -> Option<&str> {
        non_empty(self.id.as_deref()).or_else(|| non_empty(self.email.as_deref()))
    }

    /// Parsed account status
    pub fn status(&self) -> UserStatus {
        UserStatus::parse(self.status.as_deref())
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

fn lenient_memberships<'de, D>(deserializer: D) -> Result<Vec<OrgMembership>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    })
}
