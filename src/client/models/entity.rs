//! Blueprint entity models

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Blueprint holding the platform's user entities
pub const USER_BLUEPRINT: &str = "_user";

/// Status value written to disabled user entities
pub const DISABLED_STATUS: &str = "Disabled";

/// One item of a bulk upsert request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntityUpsert {
    pub identifier: String,
    pub title: String,
    pub properties: Map<String, Value>,
    pub upsert: bool,
}

impl EntityUpsert {
    /// Upsert that marks a user entity as disabled.
    ///
    /// The title is the email when known, else the identifier.
    pub fn disable_user(identifier: &str, email: Option<&str>) -> Self {
        let mut properties = Map::new();
        properties.insert(
            "status".to_string(),
            Value::String(DISABLED_STATUS.to_string()),
        );

        Self {
            identifier: identifier.to_string(),
            title: email
                .filter(|e| !e.is_empty())
                .unwrap_or(identifier)
                .to_string(),
            properties,
            upsert: true,
        }
    }
}

/// Body of `POST /v1/blueprints/{blueprint}/entities/bulk`
#[derive(Debug, Serialize)]
pub struct BulkUpsertRequest<'a> {
    pub entities: &'a [EntityUpsert],
}

/// Accepted result of a bulk upsert
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BulkOutcome {
    /// Every entity was written (200)
    Applied,
    /// Some entities were rejected (207); holds the response body
    Partial { detail: String },
}

/// An entity of any blueprint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Entity {
    pub identifier: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default)]
    pub properties: Map<String, Value>,

    #[serde(default)]
    pub relations: Map<String, Value>,
}

impl Entity {
    /// String property by name, if present and non-empty
    pub fn string_property(&self, name: &str) -> Option<&str> {
        self.properties
            .get(name)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }

    /// Whether the named relation already points somewhere
    pub fn has_relation(&self, name: &str) -> bool {
        match self.relations.get(name) {
            None | Some(Value::Null) => false,
            Some(Value::String(s)) => !s.is_empty(),
            Some(Value::Array(items)) => !items.is_empty(),
            Some(_) => true,
        }
    }
}

/// One page of `GET /v1/blueprints/{blueprint}/entities`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityPage {
    #[serde(default)]
    pub entities: Vec<Entity>,

    #[serde(default)]
    pub next_page_url: Option<String>,
}

/// Body of `PATCH /v1/blueprints/{blueprint}/entities/{identifier}`
#[derive(Debug, Serialize)]
pub struct EntityPatch {
    pub properties: Map<String, Value>,
    pub relations: Map<String, Value>,
}
