//! Callback failures stay inside the handler.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;

use pubsub_delivery::push::{PushEvent, PushKind};
use pubsub_delivery::{message_callback, Delivery, DeliveryTarget, MessageHandler};

use crate::support::init_tracing;

#[test]
fn panic_does_not_escape_handle() {
    init_tracing();
    let delivered = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&delivered);
    let handler = MessageHandler::with_callback(
        message_callback(move |msg, _| {
            if msg.payload == "poison" {
                panic!("cannot process {}", msg.payload);
            }
            sink.lock().unwrap().push(msg.payload);
        }),
        None,
    );

    for payload in ["first", "poison", "second"] {
        let outcome = handler.handle(PushEvent::typed(PushKind::Message, ["c", payload]));
        assert_eq!(outcome, Ok(Delivery::Delivered(DeliveryTarget::Callback)));
    }

    assert_eq!(*delivered.lock().unwrap(), vec!["first", "second"]);
    assert!(handler.queue().is_empty());
}

#[test]
fn concurrent_handle_calls_reach_the_callback_once_each() {
    init_tracing();
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let handler = Arc::new(MessageHandler::with_callback(
        message_callback(move |_, _| {
            counter.fetch_add(1, Ordering::SeqCst);
        }),
        None,
    ));

    let workers: Vec<_> = (0..8)
        .map(|w| {
            let handler = Arc::clone(&handler);
            thread::spawn(move || {
                for i in 0..100 {
                    let payload = format!("{}-{}", w, i);
                    handler
                        .handle(PushEvent::typed(PushKind::Message, ["c".to_string(), payload]))
                        .unwrap();
                }
            })
        })
        .collect();
    for worker in workers {
        worker.join().unwrap();
    }

    assert_eq!(calls.load(Ordering::SeqCst), 800);
}
