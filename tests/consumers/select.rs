//! Async consumers multiplexing the queue with `tokio::select!`.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;

use pubsub_delivery::push::{PushEvent, PushKind};
use pubsub_delivery::{MessageHandler, PubSubMessage};

#[tokio::test]
async fn signal_channel_wakes_a_select_loop() {
    let handler = Arc::new(MessageHandler::with_queue());
    let queue = handler.queue();
    let (signal_tx, mut signal_rx) = mpsc::channel(1);
    queue.register_signal_channel(signal_tx.clone());
    let (stop_tx, mut stop_rx) = mpsc::channel::<()>(1);

    let transport = Arc::clone(&handler);
    tokio::spawn(async move {
        for i in 0..5 {
            transport
                .handle(PushEvent::typed(PushKind::Message, ["chan".to_string(), i.to_string()]))
                .unwrap();
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        let _ = stop_tx.send(()).await;
    });

    let mut received = Vec::new();
    loop {
        tokio::select! {
            Some(()) = signal_rx.recv() => {
                // Signals are lossy: drain everything that is there.
                while let Some(msg) = queue.pop() {
                    received.push(msg.payload);
                }
            }
            _ = stop_rx.recv() => break,
        }
    }
    while let Some(msg) = queue.pop() {
        received.push(msg.payload);
    }

    queue.unregister_signal_channel(&signal_tx);
    assert_eq!(received, ["0", "1", "2", "3", "4"]);
    assert_eq!(queue.signal_count(), 0);
}

#[tokio::test]
async fn awaiting_a_waiter() {
    let handler = Arc::new(MessageHandler::with_queue());
    let rx = handler.queue().wait_for_message();

    let transport = Arc::clone(&handler);
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(10)).await;
        transport
            .handle(PushEvent::typed(PushKind::PMessage, ["p.*", "p.1", "late"]))
            .unwrap();
    });

    let msg = rx.await.unwrap();
    assert_eq!(msg, PubSubMessage::with_pattern("late", "p.1", "p.*"));
}

#[tokio::test]
async fn abandoned_timeout_keeps_later_messages() {
    let handler = MessageHandler::with_queue();
    let queue = handler.queue();

    assert!(queue
        .wait_for_message_timeout(Duration::from_millis(10))
        .await
        .is_none());

    handler
        .handle(PushEvent::typed(PushKind::Message, ["chan", "kept"]))
        .unwrap();

    let msg = queue
        .wait_for_message_timeout(Duration::from_millis(10))
        .await
        .unwrap();
    assert_eq!(msg.payload(), "kept");
}
