//! Subscription configuration.
//!
//! Describes which channels and patterns a connection subscribes to when it
//! is established, and how received messages are delivered (callback or
//! pull queue). The subscribe commands themselves go out through the
//! transport; this module only builds and validates the request and the
//! matching [`MessageHandler`].
//!
//! ```
//! use pubsub_delivery::{message_callback, ChannelMode, SubscriptionConfig};
//!
//! let config = SubscriptionConfig::cluster()
//!     .with_subscription(ChannelMode::Exact, "orders")
//!     .with_subscription(ChannelMode::Pattern, "news.*")
//!     .with_subscription(ChannelMode::Sharded, "shard-1")
//!     .set_callback(message_callback(|msg, _| println!("{}", msg)));
//!
//! assert!(config.validate().is_ok());
//! let handler = config.into_event_handler().unwrap();
//! assert!(handler.has_callback());
//! ```

use std::collections::BTreeMap;
use std::error::Error;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::handler::{
    identity_resolver, CallbackContext, MessageCallback, MessageHandler, PushResolver,
};
use crate::push::PushEvent;

/// How a subscription matches channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ChannelMode {
    /// Exact channel name (`SUBSCRIBE`).
    Exact,
    /// Glob-style pattern (`PSUBSCRIBE`).
    Pattern,
    /// Sharded channel, cluster only (`SSUBSCRIBE`).
    Sharded,
}

impl ChannelMode {
    pub fn name(self) -> &'static str {
        match self {
            ChannelMode::Exact => "EXACT",
            ChannelMode::Pattern => "PATTERN",
            ChannelMode::Sharded => "SHARDED",
        }
    }

    pub fn subscribe_command(self) -> &'static str {
        match self {
            ChannelMode::Exact => "SUBSCRIBE",
            ChannelMode::Pattern => "PSUBSCRIBE",
            ChannelMode::Sharded => "SSUBSCRIBE",
        }
    }

    pub fn unsubscribe_command(self) -> &'static str {
        match self {
            ChannelMode::Exact => "UNSUBSCRIBE",
            ChannelMode::Pattern => "PUNSUBSCRIBE",
            ChannelMode::Sharded => "SUNSUBSCRIBE",
        }
    }
}

impl fmt::Display for ChannelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Deployment the subscriptions are meant for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Topology {
    Standalone,
    Cluster,
}

/// Error type for subscription configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubscriptionConfigError {
    /// A context was given but no callback to receive it.
    ContextWithoutCallback,
    /// A channel or pattern name was empty.
    EmptyChannelName(ChannelMode),
    /// Sharded channels only exist in cluster mode.
    ShardedInStandalone,
}

impl fmt::Display for SubscriptionConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubscriptionConfigError::ContextWithoutCallback => write!(
                f,
                "pub/sub subscriptions with a context require a callback function to be configured"
            ),
            SubscriptionConfigError::EmptyChannelName(mode) => {
                write!(f, "empty channel name in {} subscriptions", mode)
            }
            SubscriptionConfigError::ShardedInStandalone => {
                write!(f, "sharded subscriptions require a cluster connection")
            }
        }
    }
}

impl Error for SubscriptionConfigError {}

/// Channels to subscribe to, grouped by mode.
///
/// Serializable stand-in for the connection request sent to the transport.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionRequest {
    pub channels_or_patterns_by_mode: BTreeMap<ChannelMode, Vec<Vec<u8>>>,
}

/// Pub/sub subscriptions and delivery settings for one connection.
#[derive(Clone)]
pub struct SubscriptionConfig {
    topology: Topology,
    subscriptions: BTreeMap<ChannelMode, Vec<String>>,
    callback: Option<MessageCallback>,
    context: Option<CallbackContext>,
}

impl SubscriptionConfig {
    /// Configuration for a standalone server.
    pub fn standalone() -> Self {
        Self::new(Topology::Standalone)
    }

    /// Configuration for a cluster.
    pub fn cluster() -> Self {
        Self::new(Topology::Cluster)
    }

    pub fn new(topology: Topology) -> Self {
        Self {
            topology,
            subscriptions: BTreeMap::new(),
            callback: None,
            context: None,
        }
    }

    /// Add a channel or pattern. Duplicates are kept once.
    pub fn with_subscription(mut self, mode: ChannelMode, channel: impl Into<String>) -> Self {
        let channel = channel.into();
        let channels = self.subscriptions.entry(mode).or_default();
        if !channels.contains(&channel) {
            channels.push(channel);
        }
        self
    }

    /// Deliver messages to `callback`, passing `context` along.
    pub fn with_callback(
        mut self,
        callback: MessageCallback,
        context: Option<CallbackContext>,
    ) -> Self {
        self.callback = Some(callback);
        self.context = context;
        self
    }

    /// Deliver messages to `callback`, keeping any context already set.
    pub fn set_callback(mut self, callback: MessageCallback) -> Self {
        self.callback = Some(callback);
        self
    }

    /// Attach a context. Requires a callback, see [`validate`](Self::validate).
    pub fn with_context(mut self, context: CallbackContext) -> Self {
        self.context = Some(context);
        self
    }

    pub fn topology(&self) -> Topology {
        self.topology
    }

    pub fn subscriptions(&self) -> &BTreeMap<ChannelMode, Vec<String>> {
        &self.subscriptions
    }

    pub fn channels(&self, mode: ChannelMode) -> &[String] {
        self.subscriptions
            .get(&mode)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn has_callback(&self) -> bool {
        self.callback.is_some()
    }

    pub fn validate(&self) -> Result<(), SubscriptionConfigError> {
        if self.context.is_some() && self.callback.is_none() {
            return Err(SubscriptionConfigError::ContextWithoutCallback);
        }
        if self.topology == Topology::Standalone
            && self.subscriptions.contains_key(&ChannelMode::Sharded)
        {
            return Err(SubscriptionConfigError::ShardedInStandalone);
        }
        for (mode, channels) in &self.subscriptions {
            if channels.iter().any(String::is_empty) {
                return Err(SubscriptionConfigError::EmptyChannelName(*mode));
            }
        }
        Ok(())
    }

    /// Subscription request for the transport.
    pub fn to_request(&self) -> SubscriptionRequest {
        SubscriptionRequest {
            channels_or_patterns_by_mode: self
                .subscriptions
                .iter()
                .map(|(mode, channels)| {
                    let channels = channels.iter().map(|c| c.as_bytes().to_vec()).collect();
                    (*mode, channels)
                })
                .collect(),
        }
    }

    /// Validate and build the handler for this connection.
    pub fn into_handler<R>(
        self,
        resolver: impl PushResolver<R> + 'static,
    ) -> Result<MessageHandler<R>, SubscriptionConfigError> {
        self.validate()?;
        Ok(MessageHandler::new(self.callback, self.context, resolver))
    }

    /// Validate and build a handler that takes already-decoded events.
    pub fn into_event_handler(self) -> Result<MessageHandler<PushEvent>, SubscriptionConfigError> {
        self.into_handler(identity_resolver())
    }
}

impl fmt::Debug for SubscriptionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubscriptionConfig")
            .field("topology", &self.topology)
            .field("subscriptions", &self.subscriptions)
            .field("has_callback", &self.callback.is_some())
            .field("has_context", &self.context.is_some())
            .finish()
    }
}
