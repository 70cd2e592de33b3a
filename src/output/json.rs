//! JSON documents
//!
//! A JSON-mode command prints exactly one document: its result under `data`
//! and, under `meta`, when and by which portsweep version it was produced.

use chrono::{SecondsFormat, Utc};
use serde::Serialize;

#[derive(Serialize)]
struct Document<'a, T: ?Sized> {
    data: &'a T,
    meta: Meta,
}

#[derive(Serialize)]
struct Meta {
    timestamp: String,
    version: &'static str,
}

impl Meta {
    fn now() -> Self {
        Self {
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            version: env!("CARGO_PKG_VERSION"),
        }
    }
}

/// Render `data` as a pretty-printed `{data, meta}` document
pub fn format_json<T: Serialize + ?Sized>(data: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&Document {
        data,
        meta: Meta::now(),
    })
}
