//! Integration tests for device registration and roster broadcasts.

mod helpers;

use std::sync::Arc;

use beamdrop_core::config::realtime::RealtimeConfig;
use beamdrop_realtime::message::types::OutboundMessage;
use beamdrop_realtime::RelayEngine;
use helpers::{roster_ids, roster_names, TestApp, TestClient};

#[tokio::test]
async fn test_connect_broadcasts_roster_to_everyone() {
    let app = TestApp::new();

    let mut a = TestClient::connect(&app.engine);
    let roster = a.recv().await;
    assert_eq!(roster_ids(&roster), vec![a.id()]);

    let mut b = TestClient::connect(&app.engine);

    // Both the existing and the new connection see the two-device roster.
    let roster_a = a.recv().await;
    let roster_b = b.recv().await;
    for roster in [&roster_a, &roster_b] {
        let ids = roster_ids(roster);
        assert_eq!(ids.len(), 2);
        assert!(ids.contains(&a.id()));
        assert!(ids.contains(&b.id()));
    }
}

#[tokio::test]
async fn test_rename_is_reflected_in_roster() {
    let app = TestApp::new();

    let mut a = TestClient::connect(&app.engine);
    a.drain();

    a.set_name("Laptop").await;
    let roster = a.recv().await;
    assert_eq!(roster_names(&roster), vec![Some("Laptop".to_string())]);

    // Renaming again replaces the previous name.
    a.set_name("Laptop (work)").await;
    let roster = a.recv().await;
    assert_eq!(
        roster_names(&roster),
        vec![Some("Laptop (work)".to_string())]
    );
}

#[tokio::test]
async fn test_empty_rename_does_not_broadcast() {
    let app = TestApp::new();

    let mut a = TestClient::connect(&app.engine);
    a.drain();

    a.set_name("").await;
    assert!(a.try_recv().is_none());
    assert!(app.engine.registry.snapshot()[0].name.is_none());
}

#[tokio::test]
async fn test_disconnect_removes_device_and_broadcasts() {
    let app = TestApp::new();

    let mut a = TestClient::connect(&app.engine);
    let b = TestClient::connect(&app.engine);
    a.drain();

    b.disconnect();

    let roster = a.recv().await;
    assert_eq!(roster_ids(&roster), vec![a.id()]);
    assert_eq!(app.engine.connections.connection_count(), 1);

    // A second disconnect is a no-op and triggers no broadcast.
    b.disconnect();
    assert!(a.try_recv().is_none());
}

#[tokio::test]
async fn test_missed_roster_broadcast_is_redelivered() {
    // A single-slot outbound queue so the second broadcast finds it full.
    let config = RealtimeConfig {
        channel_buffer_size: 1,
        ..RealtimeConfig::default()
    };
    let engine = Arc::new(RelayEngine::new(config));

    let mut a = TestClient::connect(&engine);
    let b = TestClient::connect(&engine);

    // A's queue still holds its own registration roster, so the broadcast
    // announcing B was dropped.
    let first = a.recv().await;
    assert_eq!(roster_ids(&first), vec![a.id()]);
    assert!(a.try_recv().is_none());

    // A's next frame triggers redelivery of the latest snapshot.
    a.send(serde_json::json!({ "type": "pong", "timestamp": 0 }))
        .await;
    let roster = a.recv().await;
    let ids = roster_ids(&roster);
    assert_eq!(ids.len(), 2);
    assert!(ids.contains(&a.id()));
    assert!(ids.contains(&b.id()));
}

#[tokio::test]
async fn test_unparseable_frame_gets_error_reply() {
    let app = TestApp::new();

    let mut a = TestClient::connect(&app.engine);
    a.drain();

    app.engine
        .connections
        .handle_inbound(&a.id(), r#"{"type":"no-such-event"}"#)
        .await;

    match a.recv().await {
        OutboundMessage::Error { code, .. } => assert_eq!(code, "INVALID_MESSAGE"),
        other => panic!("expected error, got {other:?}"),
    }
}
