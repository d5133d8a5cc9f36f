//! Push event classification.
//!
//! Turns any [`PushEvent`] shape into a [`ClassifiedPush`], rejecting shapes
//! the client cannot interpret. Classification is pure.

use serde_json::Value as JsonValue;

use super::{ClassifiedPush, PushEvent, PushKind, PushValue};
use crate::error::PushError;

/// Classify a decoded push event.
///
/// # Errors
///
/// - [`PushError::InvalidPushShape`] for an empty or unrecognized container.
/// - [`PushError::MissingKind`] when no kind marker can be found.
/// - [`PushError::MissingValues`] when a payload kind has no value list.
///
/// Kinds without a payload (disconnection, subscription acks) classify with
/// an empty value list when none is present.
pub fn classify(event: PushEvent) -> Result<ClassifiedPush, PushError> {
    match event {
        PushEvent::Typed { kind, values } => Ok(ClassifiedPush { kind, values }),
        PushEvent::Fields(fields) => classify_fields(&fields),
        PushEvent::Array(items) => classify_array(items),
    }
}

fn classify_fields(value: &JsonValue) -> Result<ClassifiedPush, PushError> {
    let fields = match value {
        JsonValue::Object(fields) if !fields.is_empty() => fields,
        JsonValue::Object(_) => return Err(PushError::InvalidPushShape("empty map".into())),
        other => {
            return Err(PushError::InvalidPushShape(format!(
                "expected a map, got {}",
                json_type_name(other)
            )))
        }
    };

    let kind = match fields.get("kind") {
        Some(JsonValue::String(name)) => PushKind::from_name(name),
        Some(JsonValue::Number(code)) => match code.as_i64() {
            Some(code) => PushKind::from_code(code),
            // Codes that went through a float conversion on the way in.
            None => match code.as_f64() {
                Some(x) if x.fract() == 0.0 => PushKind::from_code(x as i64),
                _ => PushKind::Other,
            },
        },
        _ => return Err(PushError::MissingKind),
    };

    let values = match fields.get("values") {
        Some(JsonValue::Array(items)) => Some(items),
        Some(JsonValue::Object(nested)) => match nested.get("array_value") {
            Some(JsonValue::Array(items)) => Some(items),
            _ => None,
        },
        _ => None,
    };

    match values {
        Some(items) => Ok(ClassifiedPush {
            kind,
            values: items.iter().map(PushValue::from_json).collect(),
        }),
        None if kind.carries_payload() => Err(PushError::MissingValues(kind)),
        None => Ok(ClassifiedPush {
            kind,
            values: Vec::new(),
        }),
    }
}

fn classify_array(items: Vec<PushValue>) -> Result<ClassifiedPush, PushError> {
    let mut items = items.into_iter();
    let marker = items
        .next()
        .ok_or_else(|| PushError::InvalidPushShape("empty array".into()))?;

    let kind = match &marker {
        PushValue::Text(_) | PushValue::Bytes(_) => {
            PushKind::from_name(&marker.as_name().unwrap_or_default())
        }
        PushValue::Int(code) => PushKind::from_code(*code),
        PushValue::Float(x) if x.fract() == 0.0 => PushKind::from_code(*x as i64),
        PushValue::Float(_) => PushKind::Other,
        _ => return Err(PushError::MissingKind),
    };

    Ok(ClassifiedPush {
        kind,
        values: items.collect(),
    })
}

fn json_type_name(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "bool",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "map",
    }
}
