//! Integration models

use serde::{Deserialize, Serialize};

use super::lenient;

/// An installed integration as returned by `GET /v1/integration`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Integration {
    #[serde(
        default,
        deserialize_with = "lenient::string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub installation_id: Option<String>,

    #[serde(
        default,
        deserialize_with = "lenient::string",
        skip_serializing_if = "Option::is_none"
    )]
    pub identifier: Option<String>,

    #[serde(
        default,
        deserialize_with = "lenient::string",
        skip_serializing_if = "Option::is_none"
    )]
    pub title: Option<String>,

    #[serde(
        default,
        deserialize_with = "lenient::string",
        skip_serializing_if = "Option::is_none"
    )]
    pub integration_type: Option<String>,

    #[serde(
        default,
        deserialize_with = "lenient::string",
        skip_serializing_if = "Option::is_none"
    )]
    pub installation_app_type: Option<String>,

    #[serde(
        default,
        deserialize_with = "lenient::string",
        skip_serializing_if = "Option::is_none"
    )]
    pub installation_type: Option<String>,
}

impl Integration {
    /// Title, falling back to the identifier
    pub fn display_title(&self) -> Option<&str> {
        self.title.as_deref().or(self.identifier.as_deref())
    }

    /// Integration type, falling back to the installation app type
    pub fn kind(&self) -> Option<&str> {
        self.integration_type
            .as_deref()
            .or(self.installation_app_type.as_deref())
    }
}
