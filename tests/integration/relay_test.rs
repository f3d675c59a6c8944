//! Integration tests for the transfer relay path.

mod helpers;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde_json::json;

use beamdrop_realtime::message::types::OutboundMessage;
use helpers::{TestApp, TestClient};

fn chunk_payload(data: &[u8]) -> String {
    BASE64.encode(data)
}

#[tokio::test]
async fn test_full_transfer_between_two_devices() {
    let app = TestApp::new();

    let mut sender = TestClient::connect(&app.engine);
    sender.set_name("Laptop").await;

    let mut receiver = TestClient::connect(&app.engine);
    receiver.join_room().await;
    sender.drain();
    receiver.drain();

    // Announce the transfer.
    sender
        .send(json!({
            "type": "start-transfer",
            "targetId": receiver.id().to_string(),
            "fileName": "photo.jpg",
            "fileSize": 300,
        }))
        .await;

    match receiver.recv().await {
        OutboundMessage::IncomingTransfer {
            sender_id,
            file_name,
            file_size,
        } => {
            assert_eq!(sender_id, sender.id());
            assert_eq!(file_name, "photo.jpg");
            assert_eq!(file_size, 300);
        }
        other => panic!("expected incoming-transfer, got {other:?}"),
    }

    // Stream three chunks; each is forwarded verbatim and acked in order.
    let chunks = [b"aaa".as_slice(), b"bbb".as_slice(), b"ccc".as_slice()];
    for (i, data) in chunks.iter().enumerate() {
        let index = i as u32;
        sender
            .send(json!({
                "type": "file-chunk",
                "targetId": receiver.id().to_string(),
                "chunk": chunk_payload(data),
                "index": index,
                "totalChunks": 3,
            }))
            .await;

        match receiver.recv().await {
            OutboundMessage::ReceiveChunk {
                chunk,
                index: got_index,
                total_chunks,
            } => {
                assert_eq!(chunk, chunk_payload(data));
                assert_eq!(got_index, index);
                assert_eq!(total_chunks, 3);
            }
            other => panic!("expected receive-chunk, got {other:?}"),
        }

        match sender.recv().await {
            OutboundMessage::ChunkAck { index: acked } => assert_eq!(acked, index),
            other => panic!("expected chunk-ack, got {other:?}"),
        }
    }

    // Completion signal reaches the receiver.
    sender
        .send(json!({
            "type": "transfer-complete",
            "targetId": receiver.id().to_string(),
        }))
        .await;

    assert!(matches!(
        receiver.recv().await,
        OutboundMessage::TransferComplete
    ));
}

#[tokio::test]
async fn test_chunk_to_unjoined_target_is_dropped_but_acked() {
    let app = TestApp::new();

    let mut sender = TestClient::connect(&app.engine);
    let mut bystander = TestClient::connect(&app.engine);
    // bystander never joins its receive room
    sender.drain();
    bystander.drain();

    sender
        .send(json!({
            "type": "file-chunk",
            "targetId": bystander.id().to_string(),
            "chunk": chunk_payload(b"data"),
            "index": 0,
            "totalChunks": 1,
        }))
        .await;

    // The relay accepted the chunk, so the sender is still acked.
    assert!(matches!(
        sender.recv().await,
        OutboundMessage::ChunkAck { index: 0 }
    ));
    assert!(bystander.try_recv().is_none());
}

#[tokio::test]
async fn test_malformed_chunk_is_not_acked() {
    let app = TestApp::new();

    let mut sender = TestClient::connect(&app.engine);
    let mut receiver = TestClient::connect(&app.engine);
    receiver.join_room().await;
    sender.drain();
    receiver.drain();

    sender
        .send(json!({
            "type": "file-chunk",
            "targetId": receiver.id().to_string(),
            "chunk": "%%% not base64 %%%",
            "index": 0,
            "totalChunks": 1,
        }))
        .await;

    assert!(sender.try_recv().is_none());
    assert!(receiver.try_recv().is_none());
}

#[tokio::test]
async fn test_relay_to_disconnected_target() {
    let app = TestApp::new();

    let mut sender = TestClient::connect(&app.engine);
    let receiver = TestClient::connect(&app.engine);
    receiver.join_room().await;
    let target_id = receiver.id();
    receiver.disconnect();
    sender.drain();

    sender
        .send(json!({
            "type": "start-transfer",
            "targetId": target_id.to_string(),
            "fileName": "gone.txt",
            "fileSize": 1,
        }))
        .await;

    // No error to the sender; the event is silently dropped.
    assert!(sender.try_recv().is_none());

    // Chunks to the departed target are still acked.
    sender
        .send(json!({
            "type": "file-chunk",
            "targetId": target_id.to_string(),
            "chunk": chunk_payload(b"x"),
            "index": 0,
            "totalChunks": 1,
        }))
        .await;
    assert!(matches!(
        sender.recv().await,
        OutboundMessage::ChunkAck { index: 0 }
    ));
}

#[tokio::test]
async fn test_concurrent_transfers_do_not_interfere() {
    let app = TestApp::new();

    let mut a = TestClient::connect(&app.engine);
    let mut b = TestClient::connect(&app.engine);
    let mut c = TestClient::connect(&app.engine);
    b.join_room().await;
    c.join_room().await;
    a.drain();
    b.drain();
    c.drain();

    // A streams to B and C in interleaved order.
    for index in 0..2u32 {
        for target in [b.id(), c.id()] {
            a.send(json!({
                "type": "file-chunk",
                "targetId": target.to_string(),
                "chunk": chunk_payload(b"chunk"),
                "index": index,
                "totalChunks": 2,
            }))
            .await;
        }
    }

    for client in [&mut b, &mut c] {
        for expected in 0..2u32 {
            match client.recv().await {
                OutboundMessage::ReceiveChunk { index, .. } => assert_eq!(index, expected),
                other => panic!("expected receive-chunk, got {other:?}"),
            }
        }
        assert!(client.try_recv().is_none());
    }

    // One ack per relayed chunk.
    let acks = a.drain();
    assert_eq!(acks.len(), 4);
    assert!(acks
        .iter()
        .all(|m| matches!(m, OutboundMessage::ChunkAck { .. })));
}
