//! Common display utilities and helpers

use chrono::{DateTime, SecondsFormat, Utc};

/// Placeholder for missing values in tables
pub const PLACEHOLDER: &str = "--";

/// Format a last-login time as an ISO timestamp, or `none` when absent
pub fn format_last_login(last_login: Option<&DateTime<Utc>>) -> String {
    match last_login {
        Some(dt) => dt.to_rfc3339_opts(SecondsFormat::AutoSi, false),
        None => "none".to_string(),
    }
}

/// The value itself, or the placeholder when missing or empty
pub fn or_placeholder(value: Option<&str>) -> String {
    value
        .filter(|v| !v.is_empty())
        .unwrap_or(PLACEHOLDER)
        .to_string()
}
