//! Push-notification delivery for a key-value store client.
//!
//! The transport hands every server push (channel message, pattern
//! message, subscribe/unsubscribe acknowledgement, disconnection notice) to
//! a [`MessageHandler`]. Messages are delivered to a registered callback,
//! or queued on a [`PubSubMessageQueue`] for pull consumers.
//!
//! ```
//! use pubsub_delivery::push::{PushEvent, PushKind};
//! use pubsub_delivery::{ChannelMode, SubscriptionConfig};
//!
//! let handler = SubscriptionConfig::standalone()
//!     .with_subscription(ChannelMode::Pattern, "news.*")
//!     .into_event_handler()
//!     .unwrap();
//!
//! handler
//!     .handle(PushEvent::typed(PushKind::PMessage, ["news.*", "news.tech", "update"]))
//!     .unwrap();
//!
//! let msg = handler.queue().pop().unwrap();
//! assert_eq!(msg.pattern(), Some("news.*"));
//! ```

mod config;
#[cfg(feature = "emitter")]
mod emitter;
mod error;
mod handler;
mod message;
pub mod push;
mod queue;

pub use config::{
    ChannelMode, SubscriptionConfig, SubscriptionConfigError, SubscriptionRequest, Topology,
};
#[cfg(feature = "emitter")]
pub use emitter::ChannelEmitter;
pub use error::PushError;
pub use handler::{
    bitcode_resolver, identity_resolver, json_resolver, message_callback, CallbackContext,
    Delivery, DeliveryTarget, MessageCallback, MessageCallbackError, MessageHandler, PushResolver,
};
pub use message::{build_message, PubSubMessage};
pub use queue::{MessageReceiver, PubSubMessageQueue, SignalSender};

// Re-export the EventEmitter from the event_emitter_rs crate
#[cfg(feature = "emitter")]
pub use event_emitter_rs::EventEmitter;
