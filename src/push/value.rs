//! Positional values carried by a push notification.

use std::fmt;

use base64::Engine;
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value as JsonValue};

/// One positional value of a push notification.
///
/// The transport may hand values over as raw bytes, text or small scalars;
/// [`PushValue::render`] turns any of them into text without failing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PushValue {
    Nil,
    Bytes(Vec<u8>),
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Array(Vec<PushValue>),
}

impl PushValue {
    /// Render the value as text.
    ///
    /// Bytes are decoded as UTF-8 (invalid sequences replaced), integers are
    /// base 10 and floats use the shortest representation that round-trips.
    pub fn render(&self) -> String {
        match self {
            PushValue::Nil => String::new(),
            PushValue::Bytes(bytes) => String::from_utf8_lossy(bytes).into_owned(),
            PushValue::Text(text) => text.clone(),
            PushValue::Int(n) => n.to_string(),
            PushValue::Float(x) => x.to_string(),
            PushValue::Bool(b) => b.to_string(),
            PushValue::Array(items) => {
                let rendered: Vec<String> = items.iter().map(PushValue::render).collect();
                format!("[{}]", rendered.join(", "))
            }
        }
    }

    /// Consume the value and render it, reusing the buffer where possible.
    pub fn into_text(self) -> String {
        match self {
            PushValue::Text(text) => text,
            PushValue::Bytes(bytes) => match String::from_utf8(bytes) {
                Ok(text) => text,
                Err(err) => String::from_utf8_lossy(err.as_bytes()).into_owned(),
            },
            other => other.render(),
        }
    }

    /// Text view of a name-like value (text or bytes).
    pub fn as_name(&self) -> Option<String> {
        match self {
            PushValue::Text(text) => Some(text.clone()),
            PushValue::Bytes(bytes) => Some(String::from_utf8_lossy(bytes).into_owned()),
            _ => None,
        }
    }

    /// Decode a value from the JSON conversion path.
    ///
    /// Besides plain JSON scalars and arrays this understands the response
    /// wrapper objects (`string_value`, `int_value`, `float_value`,
    /// `bytes_value` in base64, `array_value`). Unknown objects are kept as
    /// their JSON text.
    pub fn from_json(value: &JsonValue) -> Self {
        match value {
            JsonValue::Null => PushValue::Nil,
            JsonValue::Bool(b) => PushValue::Bool(*b),
            JsonValue::Number(n) => from_json_number(n),
            JsonValue::String(s) => PushValue::Text(s.clone()),
            JsonValue::Array(items) => {
                PushValue::Array(items.iter().map(PushValue::from_json).collect())
            }
            JsonValue::Object(fields) => {
                if let Some(JsonValue::String(s)) = fields.get("string_value") {
                    return PushValue::Text(s.clone());
                }
                if let Some(JsonValue::Number(n)) = fields.get("int_value") {
                    return match from_json_number(n) {
                        // Integers that went through a float conversion on the way in.
                        PushValue::Float(x)
                            if x.fract() == 0.0
                                && x >= i64::MIN as f64
                                && x < i64::MAX as f64 =>
                        {
                            PushValue::Int(x as i64)
                        }
                        other => other,
                    };
                }
                if let Some(x) = fields.get("float_value").and_then(JsonValue::as_f64) {
                    return PushValue::Float(x);
                }
                if let Some(JsonValue::String(encoded)) = fields.get("bytes_value") {
                    return match base64::engine::general_purpose::STANDARD.decode(encoded) {
                        Ok(bytes) => PushValue::Bytes(bytes),
                        Err(_) => PushValue::Text(encoded.clone()),
                    };
                }
                if let Some(JsonValue::Array(items)) = fields.get("array_value") {
                    return PushValue::Array(items.iter().map(PushValue::from_json).collect());
                }
                PushValue::Text(value.to_string())
            }
        }
    }
}

/// Integers stay exact: `i64` when they fit, base-10 text above `i64::MAX`.
fn from_json_number(n: &Number) -> PushValue {
    if let Some(i) = n.as_i64() {
        PushValue::Int(i)
    } else if n.is_u64() {
        PushValue::Text(n.to_string())
    } else {
        PushValue::Float(n.as_f64().unwrap_or(f64::NAN))
    }
}

impl fmt::Display for PushValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl From<&str> for PushValue {
    fn from(value: &str) -> Self {
        PushValue::Text(value.to_string())
    }
}

impl From<String> for PushValue {
    fn from(value: String) -> Self {
        PushValue::Text(value)
    }
}

impl From<Vec<u8>> for PushValue {
    fn from(value: Vec<u8>) -> Self {
        PushValue::Bytes(value)
    }
}

impl From<&[u8]> for PushValue {
    fn from(value: &[u8]) -> Self {
        PushValue::Bytes(value.to_vec())
    }
}

impl From<i64> for PushValue {
    fn from(value: i64) -> Self {
        PushValue::Int(value)
    }
}

impl From<f64> for PushValue {
    fn from(value: f64) -> Self {
        PushValue::Float(value)
    }
}

impl From<bool> for PushValue {
    fn from(value: bool) -> Self {
        PushValue::Bool(value)
    }
}
