//! Push event shapes accepted from the transport.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use super::{PushKind, PushValue};

/// A decoded push notification, in whichever shape the transport produced.
///
/// The classifier normalizes every shape to a [`ClassifiedPush`].
#[derive(Debug, Clone, PartialEq)]
pub enum PushEvent {
    /// Direct structure from the native callback path.
    Typed {
        kind: PushKind,
        values: Vec<PushValue>,
    },
    /// Map of fields from the JSON conversion path:
    /// `{"kind": <name or code>, "values": [...]}`.
    Fields(JsonValue),
    /// Nested array whose first element names the kind,
    /// e.g. `["message", channel, payload]`.
    Array(Vec<PushValue>),
}

impl PushEvent {
    pub fn typed(kind: PushKind, values: impl IntoIterator<Item = impl Into<PushValue>>) -> Self {
        PushEvent::Typed {
            kind,
            values: values.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<NativePush> for PushEvent {
    fn from(push: NativePush) -> Self {
        PushEvent::Typed {
            kind: push.kind,
            values: push.values,
        }
    }
}

impl From<JsonValue> for PushEvent {
    fn from(value: JsonValue) -> Self {
        PushEvent::Fields(value)
    }
}

/// Push as encoded by the native bridge into a byte buffer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NativePush {
    pub kind: PushKind,
    pub values: Vec<PushValue>,
}

impl NativePush {
    pub fn new(kind: PushKind, values: Vec<PushValue>) -> Self {
        Self { kind, values }
    }

    /// Encode with bitcode, the bridge's wire format.
    pub fn encode(&self) -> Result<Vec<u8>, bitcode::Error> {
        bitcode::serialize(self)
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, bitcode::Error> {
        bitcode::deserialize(bytes)
    }
}

/// A validated push: its kind and ordered values.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedPush {
    pub kind: PushKind,
    pub values: Vec<PushValue>,
}
