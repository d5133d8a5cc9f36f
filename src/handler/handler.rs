//! Message handler - routes classified pushes to a callback or the queue.

use std::fmt;
use std::sync::Arc;

use super::callback::{invoke_isolated, CallbackContext, MessageCallback};
use super::resolver::{identity_resolver, PushResolver};
use crate::error::PushError;
use crate::message::{build_message, PubSubMessage};
use crate::push::{classify, PushEvent, PushKind, PushValue};
use crate::queue::PubSubMessageQueue;

/// Where a delivered message went.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryTarget {
    /// Handed to the registered callback (attempted exactly once).
    Callback,
    /// Pushed onto the pull queue.
    Queue,
}

/// Outcome of handling one push notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    Delivered(DeliveryTarget),
    /// A valid push that carries no message (disconnection, subscription
    /// acknowledgement, unknown kind).
    Suppressed(PushKind),
}

/// Entry point for push notifications coming from the transport.
///
/// Each call to [`handle`](Self::handle) resolves the raw value, classifies
/// it and, for message kinds, delivers the message either to the callback
/// or to the queue. `handle` may be called concurrently; callbacks are not
/// serialized by the handler.
///
/// ## Example
///
/// ```
/// use pubsub_delivery::push::{PushEvent, PushKind};
/// use pubsub_delivery::{Delivery, DeliveryTarget, MessageHandler};
///
/// let handler = MessageHandler::with_queue();
///
/// let outcome = handler
///     .handle(PushEvent::typed(PushKind::Message, ["chan1", "hello"]))
///     .unwrap();
/// assert_eq!(outcome, Delivery::Delivered(DeliveryTarget::Queue));
///
/// let msg = handler.queue().pop().unwrap();
/// assert_eq!(msg.channel(), "chan1");
/// assert_eq!(msg.payload(), "hello");
/// ```
pub struct MessageHandler<R = PushEvent> {
    callback: Option<MessageCallback>,
    context: Option<CallbackContext>,
    resolver: Box<dyn PushResolver<R>>,
    queue: Arc<PubSubMessageQueue>,
}

impl<R> MessageHandler<R> {
    /// Create a handler.
    ///
    /// With a callback, every message is passed to it; without one,
    /// messages are pushed onto the queue returned by [`queue`](Self::queue).
    pub fn new(
        callback: Option<MessageCallback>,
        context: Option<CallbackContext>,
        resolver: impl PushResolver<R> + 'static,
    ) -> Self {
        Self {
            callback,
            context,
            resolver: Box::new(resolver),
            queue: Arc::new(PubSubMessageQueue::new()),
        }
    }

    /// Process one raw push notification.
    ///
    /// # Errors
    ///
    /// Resolution and classification failures, and message kinds with too
    /// few values, are returned to the caller. Nothing is delivered in that
    /// case. A panicking callback is not an error here: it is logged.
    pub fn handle(&self, raw: R) -> Result<Delivery, PushError> {
        self.process(raw).map_err(|err| {
            tracing::warn!(error = %err, "rejected push notification");
            err
        })
    }

    fn process(&self, raw: R) -> Result<Delivery, PushError> {
        let event = self.resolver.resolve(raw)?;
        let push = classify(event)?;

        match push.kind {
            PushKind::Disconnection => {
                tracing::warn!("transport disconnected, pub/sub messages might be lost");
                Ok(Delivery::Suppressed(PushKind::Disconnection))
            }
            PushKind::Message | PushKind::SMessage | PushKind::PMessage => {
                let message = build_message(push.kind, &push.values)?;
                Ok(Delivery::Delivered(self.deliver(message)))
            }
            kind if kind.is_subscription_ack() => {
                tracing::debug!(
                    kind = %kind,
                    values = ?render_all(&push.values),
                    "subscription notification"
                );
                Ok(Delivery::Suppressed(kind))
            }
            kind => {
                tracing::debug!(kind = %kind, "ignoring push notification");
                Ok(Delivery::Suppressed(kind))
            }
        }
    }

    /// Deliver a built message to the callback, or queue it.
    ///
    /// The callback runs on the calling thread. If it panics, the panic is
    /// caught, logged as a `MessageCallbackError` and not retried.
    pub fn deliver(&self, message: PubSubMessage) -> DeliveryTarget {
        match &self.callback {
            Some(callback) => {
                if let Err(err) = invoke_isolated(callback, message, self.context.as_ref()) {
                    tracing::error!(error = %err, "panic in message callback");
                }
                DeliveryTarget::Callback
            }
            None => {
                self.queue.push(message);
                DeliveryTarget::Queue
            }
        }
    }

    /// The pull queue. Only fed when no callback is registered.
    pub fn queue(&self) -> Arc<PubSubMessageQueue> {
        Arc::clone(&self.queue)
    }

    pub fn has_callback(&self) -> bool {
        self.callback.is_some()
    }

    pub fn context(&self) -> Option<&CallbackContext> {
        self.context.as_ref()
    }
}

impl MessageHandler<PushEvent> {
    /// Handler for pull consumers, taking already-decoded events.
    pub fn with_queue() -> Self {
        Self::new(None, None, identity_resolver())
    }

    /// Handler invoking `callback` for every message, taking already-decoded events.
    pub fn with_callback(callback: MessageCallback, context: Option<CallbackContext>) -> Self {
        Self::new(Some(callback), context, identity_resolver())
    }
}

impl<R> fmt::Debug for MessageHandler<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MessageHandler")
            .field("has_callback", &self.callback.is_some())
            .field("has_context", &self.context.is_some())
            .field("queued", &self.queue.len())
            .finish()
    }
}

fn render_all(values: &[PushValue]) -> Vec<String> {
    values.iter().map(PushValue::render).collect()
}
