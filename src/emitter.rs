//! Per-channel fan-out of delivered messages through an `EventEmitter`.
//!
//! [`ChannelEmitter`] turns into a [`MessageCallback`], so a handler can hand
//! every message to listeners registered for the channel (or pattern) it was
//! subscribed by. Listeners run on emitter threads, not on the transport's.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use event_emitter_rs::EventEmitter;

use crate::handler::{message_callback, MessageCallback};
use crate::message::PubSubMessage;

/// Routes messages to listeners keyed by subscription name.
///
/// Pattern deliveries are emitted under the pattern, everything else under
/// the channel name.
///
/// ## Example
///
/// ```
/// use std::sync::{mpsc, Mutex};
/// use std::time::Duration;
///
/// use pubsub_delivery::push::{PushEvent, PushKind};
/// use pubsub_delivery::{ChannelEmitter, MessageHandler, PubSubMessage};
///
/// let emitter = ChannelEmitter::new();
/// let (tx, rx) = mpsc::channel();
/// let tx = Mutex::new(tx);
/// emitter.on("orders", move |msg: PubSubMessage| {
///     let _ = tx.lock().unwrap().send(msg.payload);
/// });
///
/// let handler = MessageHandler::with_callback(emitter.callback(), None);
/// handler
///     .handle(PushEvent::typed(PushKind::Message, ["orders", "created"]))
///     .unwrap();
///
/// assert_eq!(rx.recv_timeout(Duration::from_secs(2)).unwrap(), "created");
/// ```
#[derive(Clone)]
pub struct ChannelEmitter {
    emitter: Arc<Mutex<EventEmitter>>,
}

impl Default for ChannelEmitter {
    fn default() -> Self {
        Self::new()
    }
}

impl ChannelEmitter {
    pub fn new() -> Self {
        Self::from_emitter(EventEmitter::new())
    }

    pub fn from_emitter(emitter: EventEmitter) -> Self {
        Self {
            emitter: Arc::new(Mutex::new(emitter)),
        }
    }

    fn emitter(&self) -> MutexGuard<'_, EventEmitter> {
        self.emitter.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register a listener for a channel or pattern. Returns the listener id.
    pub fn on<F>(&self, subscription: &str, listener: F) -> String
    where
        F: Fn(PubSubMessage) + Send + Sync + 'static,
    {
        self.emitter().on(subscription, listener)
    }

    /// Remove a listener by id. Returns `false` if it was not registered.
    pub fn remove_listener(&self, id: &str) -> bool {
        self.emitter().remove_listener(id).is_some()
    }

    /// Emit a message to the listeners of its subscription.
    pub fn emit(&self, message: PubSubMessage) {
        let key = message
            .pattern
            .clone()
            .unwrap_or_else(|| message.channel.clone());
        self.emitter().emit(&key, message);
    }

    /// Callback feeding this emitter, for use with a `MessageHandler`.
    pub fn callback(&self) -> MessageCallback {
        let emitter = self.clone();
        message_callback(move |message, _| emitter.emit(message))
    }
}
