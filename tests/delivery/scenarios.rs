//! Concrete push scenarios through `handle`.

use serde_json::json;

use pubsub_delivery::push::{PushEvent, PushKind, PushValue};
use pubsub_delivery::{Delivery, DeliveryTarget, PubSubMessage, PushError};

use crate::support::{queue_handler, recording_handler};

#[test]
fn channel_message_is_delivered() {
    let handler = queue_handler();

    handler
        .handle(PushEvent::typed(PushKind::Message, ["chan1", "hello"]))
        .unwrap();

    let msg = handler.queue().pop().unwrap();
    assert_eq!(msg, PubSubMessage::new("hello", "chan1"));
    assert_eq!(msg.pattern(), None);
}

#[test]
fn sharded_message_is_delivered() {
    let (handler, recorded) = recording_handler();

    handler
        .handle(PushEvent::Fields(json!({
            "kind": "smessage",
            "values": ["{shard}chan", "payload"]
        })))
        .unwrap();

    assert_eq!(
        *recorded.lock().unwrap(),
        vec![PubSubMessage::new("payload", "{shard}chan")]
    );
}

#[test]
fn pattern_message_carries_pattern() {
    let handler = queue_handler();

    handler
        .handle(PushEvent::typed(
            PushKind::PMessage,
            ["news.*", "news.tech", "update"],
        ))
        .unwrap();

    let msg = handler.queue().pop().unwrap();
    assert_eq!(msg.channel(), "news.tech");
    assert_eq!(msg.payload(), "update");
    assert_eq!(msg.pattern(), Some("news.*"));
}

#[test]
fn subscribe_ack_is_silent() {
    let (handler, recorded) = recording_handler();

    let outcome = handler
        .handle(PushEvent::typed(PushKind::Subscribe, ["chan1"]))
        .unwrap();

    assert_eq!(outcome, Delivery::Suppressed(PushKind::Subscribe));
    assert!(recorded.lock().unwrap().is_empty());
}

#[test]
fn empty_container_is_invalid() {
    let (handler, recorded) = recording_handler();

    let err = handler.handle(PushEvent::Fields(json!({}))).unwrap_err();

    assert!(matches!(err, PushError::InvalidPushShape(_)));
    assert!(recorded.lock().unwrap().is_empty());
}

#[test]
fn unrecognized_container_is_invalid() {
    let handler = queue_handler();

    let err = handler.handle(PushEvent::Fields(json!([1, 2]))).unwrap_err();

    assert!(matches!(err, PushError::InvalidPushShape(_)));
    assert!(handler.queue().is_empty());
}

#[test]
fn short_pattern_message_touches_nothing() {
    let handler = queue_handler();
    let mut waiter = handler.queue().wait_for_message();

    let err = handler
        .handle(PushEvent::typed(PushKind::PMessage, ["news.*", "news.tech"]))
        .unwrap_err();

    assert_eq!(
        err,
        PushError::MalformedNotification {
            kind: PushKind::PMessage,
            expected: 3,
            actual: 2,
        }
    );
    assert!(waiter.try_recv().is_err());
    assert!(handler.queue().is_empty());
}

#[test]
fn no_payload_kinds_never_error() {
    let handler = queue_handler();
    let kinds = [
        PushKind::Disconnection,
        PushKind::Subscribe,
        PushKind::PSubscribe,
        PushKind::SSubscribe,
        PushKind::Unsubscribe,
        PushKind::PUnsubscribe,
        PushKind::SUnsubscribe,
        PushKind::Other,
    ];

    for kind in kinds {
        assert_eq!(
            handler.handle(PushEvent::typed(kind, Vec::<PushValue>::new())),
            Ok(Delivery::Suppressed(kind))
        );
    }
    assert!(handler.queue().is_empty());
}

#[test]
fn resp2_array_shape_is_accepted() {
    let handler = queue_handler();

    let outcome = handler
        .handle(PushEvent::Array(vec![
            PushValue::from(b"pmessage".to_vec()),
            PushValue::from(b"h?llo".to_vec()),
            PushValue::from(b"hello".to_vec()),
            PushValue::Int(42),
        ]))
        .unwrap();

    assert_eq!(outcome, Delivery::Delivered(DeliveryTarget::Queue));
    assert_eq!(
        handler.queue().pop(),
        Some(PubSubMessage::with_pattern("42", "hello", "h?llo"))
    );
}

#[test]
fn json_wrapped_values_are_rendered() {
    let handler = queue_handler();

    handler
        .handle(PushEvent::Fields(json!({
            "kind": 3,
            "values": {"array_value": [
                {"string_value": "metrics"},
                {"float_value": 0.25}
            ]}
        })))
        .unwrap();

    assert_eq!(
        handler.queue().pop(),
        Some(PubSubMessage::new("0.25", "metrics"))
    );
}

#[test]
fn large_integer_payloads_render_exactly() {
    let handler = queue_handler();

    handler
        .handle(PushEvent::Fields(json!({
            "kind": "message",
            "values": [{"string_value": "c"}, {"int_value": 9007199254740993_u64}]
        })))
        .unwrap();
    handler
        .handle(PushEvent::Fields(json!({
            "kind": "message",
            "values": ["c", 18446744073709551615_u64]
        })))
        .unwrap();

    let queue = handler.queue();
    assert_eq!(queue.pop().unwrap().payload(), "9007199254740993");
    assert_eq!(queue.pop().unwrap().payload(), "18446744073709551615");
}
