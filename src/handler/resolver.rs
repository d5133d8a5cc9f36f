//! Resolvers turning the transport's raw callback argument into a push event.
//!
//! A resolver is supplied by the transport integration when the handler is
//! built, which keeps the wire format out of the delivery core.

use crate::error::PushError;
use crate::push::{NativePush, PushEvent};

/// Converts a raw transport value into a [`PushEvent`].
pub trait PushResolver<R>: Send + Sync {
    fn resolve(&self, raw: R) -> Result<PushEvent, PushError>;
}

impl<R, F> PushResolver<R> for F
where
    F: Fn(R) -> Result<PushEvent, PushError> + Send + Sync,
{
    fn resolve(&self, raw: R) -> Result<PushEvent, PushError> {
        self(raw)
    }
}

/// Resolver for transports that already produce [`PushEvent`]s.
pub fn identity_resolver() -> impl PushResolver<PushEvent> {
    |event: PushEvent| -> Result<PushEvent, PushError> { Ok(event) }
}

/// Resolver for UTF-8 JSON documents (`{"kind": ..., "values": [...]}`).
pub fn json_resolver() -> impl PushResolver<Vec<u8>> {
    |raw: Vec<u8>| -> Result<PushEvent, PushError> {
        let value: serde_json::Value = serde_json::from_slice(&raw)?;
        Ok(PushEvent::Fields(value))
    }
}

/// Resolver for bitcode-encoded [`NativePush`] buffers from the native bridge.
pub fn bitcode_resolver() -> impl PushResolver<Vec<u8>> {
    |raw: Vec<u8>| -> Result<PushEvent, PushError> {
        Ok(PushEvent::from(NativePush::decode(&raw)?))
    }
}
