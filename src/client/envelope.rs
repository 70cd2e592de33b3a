//! Decoding of list payloads that arrive in more than one envelope shape
//!
//! Some endpoints return `{"users": [...]}`, some `{"data": [...]}` and some
//! a bare array. Each endpoint declares an ordered list of [`ListShape`]s; the
//! first shape that recognizes the payload wins.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::PayloadError;

/// One accepted shape of a list payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListShape {
    /// An object whose named key holds an array
    Key(&'static str),
    /// The payload itself is an array
    Bare,
}

impl ListShape {
    fn take(self, payload: &mut Value) -> Option<Vec<Value>> {
        match self {
            ListShape::Key(key) => match payload.get_mut(key) {
                Some(Value::Array(items)) => Some(std::mem::take(items)),
                _ => None,
            },
            ListShape::Bare => match payload {
                Value::Array(items) => Some(std::mem::take(items)),
                _ => None,
            },
        }
    }
}

/// Shapes of `GET /v1/users`, in precedence order
pub const USER_SHAPES: &[ListShape] = &[
    ListShape::Key("users"),
    ListShape::Key("data"),
    ListShape::Bare,
];

/// Shapes of `GET /v1/integration`, in precedence order
pub const INTEGRATION_SHAPES: &[ListShape] = &[ListShape::Key("integrations"), ListShape::Bare];

/// Extract the raw list items using the first matching shape.
pub fn extract_list(
    mut payload: Value,
    shapes: &[ListShape],
    resource: &'static str,
) -> Result<Vec<Value>, PayloadError> {
    for shape in shapes {
        if let Some(items) = shape.take(&mut payload) {
            log::debug!("Decoded {} payload as {:?}", resource, shape);
            return Ok(items);
        }
    }

    Err(PayloadError::UnrecognizedShape {
        resource,
        found: json_kind(&payload),
    })
}

/// Extract and deserialize list items using the first matching shape.
pub fn decode_list<T: DeserializeOwned>(
    payload: Value,
    shapes: &[ListShape],
    resource: &'static str,
) -> Result<Vec<T>, PayloadError> {
    extract_list(payload, shapes, resource)?
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            serde_json::from_value(item).map_err(|e| PayloadError::InvalidItem {
                resource,
                index,
                reason: e.to_string(),
            })
        })
        .collect()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
