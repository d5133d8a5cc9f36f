//! Push kind discriminator.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Semantic type of a push notification.
///
/// Integer codes follow the numbering used by the native transport bridge.
/// Codes and names the client does not know map to [`PushKind::Other`], so a
/// newer server never breaks an older client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PushKind {
    Disconnection,
    Other,
    Invalidate,
    Message,
    PMessage,
    SMessage,
    Unsubscribe,
    PUnsubscribe,
    SUnsubscribe,
    Subscribe,
    PSubscribe,
    SSubscribe,
}

impl PushKind {
    const ALL: [PushKind; 12] = [
        PushKind::Disconnection,
        PushKind::Other,
        PushKind::Invalidate,
        PushKind::Message,
        PushKind::PMessage,
        PushKind::SMessage,
        PushKind::Unsubscribe,
        PushKind::PUnsubscribe,
        PushKind::SUnsubscribe,
        PushKind::Subscribe,
        PushKind::PSubscribe,
        PushKind::SSubscribe,
    ];

    /// Map a numeric kind code to a kind.
    pub fn from_code(code: i64) -> Self {
        usize::try_from(code)
            .ok()
            .and_then(|idx| Self::ALL.get(idx).copied())
            .unwrap_or(PushKind::Other)
    }

    /// Map a kind name to a kind. Matching ignores ASCII case.
    pub fn from_name(name: &str) -> Self {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.name().eq_ignore_ascii_case(name.trim()))
            .unwrap_or(PushKind::Other)
    }

    pub fn code(self) -> i64 {
        self as i64
    }

    /// Wire name of the kind, as the server spells it.
    pub fn name(self) -> &'static str {
        match self {
            PushKind::Disconnection => "disconnection",
            PushKind::Other => "other",
            PushKind::Invalidate => "invalidate",
            PushKind::Message => "message",
            PushKind::PMessage => "pmessage",
            PushKind::SMessage => "smessage",
            PushKind::Unsubscribe => "unsubscribe",
            PushKind::PUnsubscribe => "punsubscribe",
            PushKind::SUnsubscribe => "sunsubscribe",
            PushKind::Subscribe => "subscribe",
            PushKind::PSubscribe => "psubscribe",
            PushKind::SSubscribe => "ssubscribe",
        }
    }

    /// Kinds that carry a deliverable channel message.
    pub fn carries_payload(self) -> bool {
        matches!(
            self,
            PushKind::Message | PushKind::PMessage | PushKind::SMessage
        )
    }

    /// Number of positional values a payload kind needs.
    pub fn required_values(self) -> usize {
        match self {
            PushKind::Message | PushKind::SMessage => 2,
            PushKind::PMessage => 3,
            _ => 0,
        }
    }

    pub fn is_subscription_ack(self) -> bool {
        matches!(
            self,
            PushKind::Subscribe
                | PushKind::PSubscribe
                | PushKind::SSubscribe
                | PushKind::Unsubscribe
                | PushKind::PUnsubscribe
                | PushKind::SUnsubscribe
        )
    }
}

impl fmt::Display for PushKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
