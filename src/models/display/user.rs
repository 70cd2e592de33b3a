//! Inactive user display model

use serde::Serialize;
use tabled::Tabled;

use super::common::{format_last_login, or_placeholder};
use crate::sweep::InactivityRecord;

/// Inactive user row for table/JSON output.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct InactiveUserDisplay {
    /// User identifier (id, else email)
    #[tabled(rename = "USER ID")]
    pub id: String,

    #[tabled(rename = "EMAIL")]
    pub email: String,

    /// Last login as ISO timestamp, or "none"
    #[tabled(rename = "LAST LOGIN")]
    pub last_login: String,
}

impl From<&InactivityRecord> for InactiveUserDisplay {
    fn from(record: &InactivityRecord) -> Self {
        Self {
            id: record.id.clone(),
            email: or_placeholder(record.email.as_deref()),
            last_login: format_last_login(record.last_login.as_ref()),
        }
    }
}
