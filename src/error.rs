use std::fmt;

use crate::push::PushKind;

/// Error returned when a push notification cannot be turned into a message.
///
/// Every variant is permanent: a malformed push is never retried, it is
/// handed back to the transport which decides whether the connection
/// survives.
#[derive(Debug, Clone, PartialEq)]
pub enum PushError {
    /// The event container is empty or not a recognized shape.
    InvalidPushShape(String),
    /// No kind marker could be found in the event.
    MissingKind,
    /// The kind carries a payload but the event has no value list.
    MissingValues(PushKind),
    /// The kind was recognized but the value list is too short for it.
    MalformedNotification {
        kind: PushKind,
        expected: usize,
        actual: usize,
    },
    /// The transport resolver could not produce an event from the raw input.
    ResolveFailed(String),
}

impl PushError {
    /// Malformed pushes never become well-formed on redelivery.
    pub fn is_permanent(&self) -> bool {
        true
    }
}

impl fmt::Display for PushError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PushError::InvalidPushShape(reason) => write!(
                f,
                "received invalid push: empty or in incorrect format ({})",
                reason
            ),
            PushError::MissingKind => write!(f, "received invalid push: missing kind field"),
            PushError::MissingValues(kind) => write!(
                f,
                "received invalid push: missing values field for {}",
                kind
            ),
            PushError::MalformedNotification {
                kind,
                expected,
                actual,
            } => write!(
                f,
                "invalid {} notification: expected {} values, got {}",
                kind, expected, actual
            ),
            PushError::ResolveFailed(msg) => write!(f, "failed to resolve push: {}", msg),
        }
    }
}

impl std::error::Error for PushError {}

impl From<serde_json::Error> for PushError {
    fn from(err: serde_json::Error) -> Self {
        PushError::ResolveFailed(err.to_string())
    }
}

impl From<bitcode::Error> for PushError {
    fn from(err: bitcode::Error) -> Self {
        PushError::ResolveFailed(err.to_string())
    }
}
