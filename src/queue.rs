//! Pub/sub message queue for pull-based consumers.
//!
//! The queue is a multi-producer/multi-consumer mailbox:
//! - `pop()` takes the oldest buffered message without blocking
//! - `wait_for_message()` returns a one-shot receiver that yields exactly
//!   one message, either one already buffered or the next one pushed
//! - signal channels receive a lossy "something may be available" notice
//!   after every push, for consumers multiplexing with `tokio::select!`
//!
//! Every pushed message reaches exactly one consumer. A push goes straight
//! to the oldest live waiter when there is one, otherwise it is buffered.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::{mpsc, oneshot};

use crate::message::PubSubMessage;

/// Receiving end handed to a `wait_for_message` caller.
///
/// Await it from async code, or call `blocking_recv()` from a plain thread.
pub type MessageReceiver = oneshot::Receiver<PubSubMessage>;

/// Sending end of a signal channel registered with the queue.
pub type SignalSender = mpsc::Sender<()>;

#[derive(Default)]
struct QueueState {
    /// Messages waiting for a pull consumer, oldest first
    messages: VecDeque<PubSubMessage>,
    /// Blocked `wait_for_message` callers, oldest first
    waiters: VecDeque<oneshot::Sender<PubSubMessage>>,
    /// Level-trigger subscribers
    signals: Vec<SignalSender>,
}

/// Thread-safe mailbox for messages delivered without a callback.
///
/// ## Example
///
/// ```
/// use pubsub_delivery::{PubSubMessage, PubSubMessageQueue};
///
/// let queue = PubSubMessageQueue::new();
///
/// // A waiter registered first gets the next push directly
/// let mut waiter = queue.wait_for_message();
/// queue.push(PubSubMessage::new("hello", "chan1"));
/// assert_eq!(waiter.try_recv().unwrap().payload(), "hello");
///
/// // Without waiters, pushes are buffered for pop()
/// queue.push(PubSubMessage::new("later", "chan1"));
/// assert_eq!(queue.pop().unwrap().payload(), "later");
/// assert!(queue.pop().is_none());
/// ```
#[derive(Default)]
pub struct PubSubMessageQueue {
    state: Mutex<QueueState>,
}

impl PubSubMessageQueue {
    pub fn new() -> Self {
        Self::default()
    }

    // The lock never guards user code, so a poisoned state is still consistent.
    fn state(&self) -> MutexGuard<'_, QueueState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Deliver a message to the oldest waiter, or buffer it.
    ///
    /// Never blocks: waiter channels hold exactly one message and signal
    /// channels are written with `try_send`. Waiters whose receiver was
    /// dropped or closed are skipped and discarded.
    pub fn push(&self, message: PubSubMessage) {
        let mut state = self.state();

        if let Err(message) = hand_off(&mut state.waiters, message) {
            state.messages.push_back(message);
        }

        // Lossy by design: a full channel already has a pending signal.
        state.signals.retain(|signal| match signal.try_send(()) {
            Ok(()) | Err(TrySendError::Full(())) => true,
            Err(TrySendError::Closed(())) => false,
        });
    }

    /// Take the oldest buffered message, if any.
    pub fn pop(&self) -> Option<PubSubMessage> {
        self.state().messages.pop_front()
    }

    /// Get a receiver that yields exactly one message.
    ///
    /// A buffered message is moved into the receiver right away; otherwise
    /// the receiver is completed by a later `push`. Concurrent callers are
    /// served in registration order.
    ///
    /// There is no built-in timeout. A caller that gives up should drop or
    /// `close()` the receiver, which makes `push` skip it; if it closes the
    /// receiver it must still `try_recv()` once to pick up a message that
    /// raced in. [`wait_for_message_timeout`](Self::wait_for_message_timeout)
    /// does exactly that.
    pub fn wait_for_message(&self) -> MessageReceiver {
        let (tx, rx) = oneshot::channel();
        let mut state = self.state();

        if let Some(message) = state.messages.pop_front() {
            // `rx` is still held here, so the send cannot fail.
            let _ = tx.send(message);
            return rx;
        }

        state.waiters.retain(|waiter| !waiter.is_closed());
        state.waiters.push_back(tx);
        rx
    }

    /// Wait up to `timeout` for a message.
    ///
    /// Returns `None` on timeout. A message that arrives while the wait is
    /// being abandoned is still returned, never lost.
    pub async fn wait_for_message_timeout(&self, timeout: Duration) -> Option<PubSubMessage> {
        let mut rx = self.wait_for_message();
        match tokio::time::timeout(timeout, &mut rx).await {
            Ok(Ok(message)) => Some(message),
            Ok(Err(_)) => None,
            Err(_) => {
                rx.close();
                rx.try_recv().ok()
            }
        }
    }

    /// Register a channel to be signalled after every push.
    ///
    /// Signals are level-triggered and lossy: a full channel is skipped, so
    /// consumers must re-check the queue rather than count signals. A
    /// capacity of one is enough.
    pub fn register_signal_channel(&self, signal: SignalSender) {
        self.state().signals.push(signal);
    }

    /// Stop signalling a channel. Unknown channels are ignored.
    pub fn unregister_signal_channel(&self, signal: &SignalSender) {
        self.state()
            .signals
            .retain(|registered| !registered.same_channel(signal));
    }

    /// Number of buffered messages.
    pub fn len(&self) -> usize {
        self.state().messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state().messages.is_empty()
    }

    /// Number of live `wait_for_message` callers.
    pub fn waiter_count(&self) -> usize {
        self.state()
            .waiters
            .iter()
            .filter(|waiter| !waiter.is_closed())
            .count()
    }

    pub fn signal_count(&self) -> usize {
        self.state().signals.len()
    }
}

/// Hand `message` to the oldest live waiter, returning it if there is none.
fn hand_off(
    waiters: &mut VecDeque<oneshot::Sender<PubSubMessage>>,
    mut message: PubSubMessage,
) -> Result<(), PubSubMessage> {
    while let Some(waiter) = waiters.pop_front() {
        match waiter.send(message) {
            Ok(()) => return Ok(()),
            Err(returned) => {
                tracing::trace!("skipping abandoned pub/sub waiter");
                message = returned;
            }
        }
    }
    Err(message)
}
