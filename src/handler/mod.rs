//! Message handler - the delivery path for push notifications.
//!
//! ```text
//! transport ──► MessageHandler::handle(raw)
//!                 │ resolver   raw value ─► PushEvent
//!                 │ classify   PushEvent ─► ClassifiedPush
//!                 │ build      ClassifiedPush ─► PubSubMessage
//!                 ▼
//!        ┌────────┴─────────┐
//!        ▼                  ▼
//!   callback(msg, ctx)   PubSubMessageQueue
//!   (panic-isolated)     (pop / wait_for_message / signals)
//! ```
//!
//! Disconnection notices, subscription acknowledgements and unknown kinds
//! are logged and suppressed; they never produce an error.

mod callback;
mod handler;
mod resolver;

pub use callback::{message_callback, CallbackContext, MessageCallback, MessageCallbackError};
pub use handler::{Delivery, DeliveryTarget, MessageHandler};
pub use resolver::{bitcode_resolver, identity_resolver, json_resolver, PushResolver};
