//! Integration display model

use serde::Serialize;
use tabled::Tabled;

use super::common::or_placeholder;
use crate::client::models::Integration;

/// Integration row for table/JSON output.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct IntegrationDisplay {
    #[tabled(rename = "INSTALLATION ID")]
    pub installation_id: String,

    /// Title, else identifier
    #[tabled(rename = "TITLE")]
    pub title: String,

    /// Integration type, else installation app type
    #[tabled(rename = "TYPE")]
    pub kind: String,

    #[tabled(rename = "INSTALLATION")]
    pub installation_type: String,
}

impl From<&Integration> for IntegrationDisplay {
    fn from(integration: &Integration) -> Self {
        Self {
            installation_id: or_placeholder(integration.installation_id.as_deref()),
            title: or_placeholder(integration.display_title()),
            kind: or_placeholder(integration.kind()),
            installation_type: or_placeholder(integration.installation_type.as_deref()),
        }
    }
}
