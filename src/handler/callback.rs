//! Message callbacks and panic isolation.

use std::any::Any;
use std::error::Error;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use crate::message::PubSubMessage;

/// Opaque value handed back to the callback with every message.
pub type CallbackContext = Arc<dyn Any + Send + Sync>;

/// Callback invoked synchronously for every delivered message.
pub type MessageCallback = Arc<dyn Fn(PubSubMessage, Option<&CallbackContext>) + Send + Sync>;

/// Wrap a closure into a [`MessageCallback`].
pub fn message_callback<F>(f: F) -> MessageCallback
where
    F: Fn(PubSubMessage, Option<&CallbackContext>) + Send + Sync + 'static,
{
    Arc::new(f)
}

/// A message callback terminated abnormally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageCallbackError {
    cause: String,
}

impl MessageCallbackError {
    pub fn new(cause: impl Into<String>) -> Self {
        Self {
            cause: cause.into(),
        }
    }

    /// The panic message raised by the callback.
    pub fn cause(&self) -> &str {
        &self.cause
    }

    fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let cause = if let Some(s) = payload.downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "callback panicked".to_string()
        };
        Self { cause }
    }
}

impl fmt::Display for MessageCallbackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "error in message callback: {}", self.cause)
    }
}

impl Error for MessageCallbackError {}

/// Run the callback once, catching any panic it raises.
pub(crate) fn invoke_isolated(
    callback: &MessageCallback,
    message: PubSubMessage,
    context: Option<&CallbackContext>,
) -> Result<(), MessageCallbackError> {
    panic::catch_unwind(AssertUnwindSafe(|| callback(message, context)))
        .map_err(MessageCallbackError::from_panic)
}
