//! Delivered pub/sub messages and the factory that builds them.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::PushError;
use crate::push::{PushKind, PushValue};

/// A message received on a subscribed channel.
///
/// `pattern` is present only for pattern-matched deliveries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PubSubMessage {
    pub payload: String,
    pub channel: String,
    pub pattern: Option<String>,
}

impl PubSubMessage {
    pub fn new(payload: impl Into<String>, channel: impl Into<String>) -> Self {
        Self {
            payload: payload.into(),
            channel: channel.into(),
            pattern: None,
        }
    }

    pub fn with_pattern(
        payload: impl Into<String>,
        channel: impl Into<String>,
        pattern: impl Into<String>,
    ) -> Self {
        Self {
            payload: payload.into(),
            channel: channel.into(),
            pattern: Some(pattern.into()),
        }
    }

    pub fn payload(&self) -> &str {
        &self.payload
    }

    pub fn channel(&self) -> &str {
        &self.channel
    }

    pub fn pattern(&self) -> Option<&str> {
        self.pattern.as_deref()
    }

    /// JSON rendering, used for logs and diagnostics.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

impl fmt::Display for PubSubMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.pattern {
            Some(pattern) => write!(f, "{} ({}): {}", self.channel, pattern, self.payload),
            None => write!(f, "{}: {}", self.channel, self.payload),
        }
    }
}

/// Build the delivered message for a payload-carrying push.
///
/// `Message` and `SMessage` take `[channel, payload]`, `PMessage` takes
/// `[pattern, channel, payload]`. Extra trailing values are ignored.
pub fn build_message(kind: PushKind, values: &[PushValue]) -> Result<PubSubMessage, PushError> {
    let expected = kind.required_values();
    if !kind.carries_payload() || values.len() < expected {
        return Err(PushError::MalformedNotification {
            kind,
            expected,
            actual: values.len(),
        });
    }

    match kind {
        PushKind::PMessage => Ok(PubSubMessage::with_pattern(
            values[2].render(),
            values[1].render(),
            values[0].render(),
        )),
        _ => Ok(PubSubMessage::new(values[1].render(), values[0].render())),
    }
}
