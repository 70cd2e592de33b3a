//! GitHub user mapping display model

use serde::Serialize;
use tabled::Tabled;

use crate::mapping::{PlannedLink, Unmatched};

/// One mapping decision for table/JSON output.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct MappingDisplay {
    #[tabled(rename = "GITHUB USER")]
    pub github_user: String,

    #[tabled(rename = "EMAIL")]
    pub email: String,

    #[tabled(rename = "PORT USER")]
    pub port_user: String,
}

impl From<&PlannedLink> for MappingDisplay {
    fn from(link: &PlannedLink) -> Self {
        Self {
            github_user: link.github_user.clone(),
            email: link.email.clone(),
            port_user: link.port_user.clone(),
        }
    }
}

impl From<&Unmatched> for MappingDisplay {
    fn from(unmatched: &Unmatched) -> Self {
        match unmatched {
            Unmatched::NoEmail { github_user } => Self {
                github_user: github_user.clone(),
                email: "--".to_string(),
                port_user: "(no email)".to_string(),
            },
            Unmatched::NoUser { github_user, email } => Self {
                github_user: github_user.clone(),
                email: email.clone(),
                port_user: "(no match)".to_string(),
            },
        }
    }
}
