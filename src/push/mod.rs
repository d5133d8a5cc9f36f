//! Push events - decoding and classification of server push notifications.
//!
//! The transport hands over one decoded event per notification. Its shape
//! depends on the path it took (typed struct from the native bridge, a map
//! of fields from the JSON conversion, or a RESP2-style nested array);
//! [`classify`] normalizes all of them to a [`ClassifiedPush`].
//!
//! ```
//! use pubsub_delivery::push::{classify, PushEvent, PushKind};
//!
//! let push = classify(PushEvent::Fields(serde_json::json!({
//!     "kind": "message",
//!     "values": ["chan1", "hello"],
//! })))
//! .unwrap();
//!
//! assert_eq!(push.kind, PushKind::Message);
//! assert_eq!(push.values.len(), 2);
//! ```

mod classifier;
mod event;
mod kind;
mod value;

pub use classifier::classify;
pub use event::{ClassifiedPush, NativePush, PushEvent};
pub use kind::PushKind;
pub use value::PushValue;
