//! Handlers built with transport resolvers.

use pubsub_delivery::push::{NativePush, PushKind, PushValue};
use pubsub_delivery::{
    bitcode_resolver, json_resolver, ChannelMode, Delivery, DeliveryTarget, PubSubMessage,
    PushError, SubscriptionConfig,
};

use crate::support::init_tracing;

#[test]
fn json_frames_from_the_transport() {
    init_tracing();
    let handler = SubscriptionConfig::standalone()
        .with_subscription(ChannelMode::Exact, "chan1")
        .into_handler(json_resolver())
        .unwrap();

    let outcome = handler
        .handle(br#"{"kind":"message","values":["chan1","hello"]}"#.to_vec())
        .unwrap();

    assert_eq!(outcome, Delivery::Delivered(DeliveryTarget::Queue));
    assert_eq!(
        handler.queue().pop(),
        Some(PubSubMessage::new("hello", "chan1"))
    );
}

#[test]
fn unreadable_json_frame_is_rejected() {
    init_tracing();
    let handler = SubscriptionConfig::standalone()
        .into_handler(json_resolver())
        .unwrap();

    let err = handler.handle(b"\x00garbage".to_vec()).unwrap_err();

    assert!(matches!(err, PushError::ResolveFailed(_)));
    assert!(handler.queue().is_empty());
}

#[test]
fn native_bridge_buffers() {
    init_tracing();
    let handler = SubscriptionConfig::cluster()
        .with_subscription(ChannelMode::Sharded, "s1")
        .into_handler(bitcode_resolver())
        .unwrap();

    let frame = NativePush::new(
        PushKind::SMessage,
        vec![
            PushValue::Bytes(b"s1".to_vec()),
            PushValue::Bytes(b"binary \xf0\x9f\x93\xa6".to_vec()),
        ],
    )
    .encode()
    .unwrap();

    handler.handle(frame).unwrap();

    let msg = handler.queue().pop().unwrap();
    assert_eq!(msg.channel(), "s1");
    assert_eq!(msg.payload(), "binary \u{1f4e6}");
}

#[test]
fn native_ack_buffers_are_suppressed() {
    init_tracing();
    let handler = SubscriptionConfig::cluster()
        .into_handler(bitcode_resolver())
        .unwrap();

    let frame = NativePush::new(
        PushKind::SSubscribe,
        vec![PushValue::from("s1"), PushValue::Int(1)],
    )
    .encode()
    .unwrap();

    assert_eq!(
        handler.handle(frame),
        Ok(Delivery::Suppressed(PushKind::SSubscribe))
    );
}
