//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::Router;
use http::{Request, StatusCode};
use serde_json::Value;
use tokio::sync::mpsc;
use tower::ServiceExt;

use beamdrop_api::state::AppState;
use beamdrop_core::config::AppConfig;
use beamdrop_core::types::DeviceId;
use beamdrop_realtime::connection::handle::ConnectionHandle;
use beamdrop_realtime::message::types::OutboundMessage;
use beamdrop_realtime::RelayEngine;

/// How long to wait for an expected outbound message.
const RECV_TIMEOUT: Duration = Duration::from_millis(500);

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// The relay engine behind the router
    pub engine: Arc<RelayEngine>,
}

/// A parsed HTTP response
pub struct TestResponse {
    /// Response status
    pub status: StatusCode,
    /// Parsed JSON body (Null when the body is not JSON)
    pub body: Value,
}

impl TestApp {
    /// Create a new test application
    pub fn new() -> Self {
        let config = AppConfig::default();
        let engine = Arc::new(RelayEngine::new(config.realtime.clone()));
        let state = AppState::new(Arc::new(config), Arc::clone(&engine));
        let router = beamdrop_api::build_router(state);

        Self { router, engine }
    }

    /// Make a request against the router
    pub async fn request(&self, method: &str, path: &str) -> TestResponse {
        let request = Request::builder()
            .method(method)
            .uri(path)
            .body(Body::empty())
            .expect("failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("request failed");

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("failed to read body");
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}

/// A simulated device connected to the relay engine.
///
/// Drives the engine directly through the same entry points the WebSocket
/// handler uses: raw JSON frames in, typed outbound messages out.
pub struct TestClient {
    /// The engine this client is connected to
    engine: Arc<RelayEngine>,
    /// This client's connection handle
    pub handle: Arc<ConnectionHandle>,
    /// Outbound message queue
    rx: mpsc::Receiver<OutboundMessage>,
}

impl TestClient {
    /// Connects a new client to the engine
    pub fn connect(engine: &Arc<RelayEngine>) -> Self {
        let (handle, rx) = engine.connections.register();
        Self {
            engine: Arc::clone(engine),
            handle,
            rx,
        }
    }

    /// This client's device identity
    pub fn id(&self) -> DeviceId {
        self.handle.id
    }

    /// Sends a raw JSON frame to the engine
    pub async fn send(&self, frame: Value) {
        self.engine
            .connections
            .handle_inbound(&self.handle.id, &frame.to_string())
            .await;
    }

    /// Joins this client's receive room
    pub async fn join_room(&self) {
        self.send(serde_json::json!({ "type": "join-receive-room" }))
            .await;
    }

    /// Renames this device
    pub async fn set_name(&self, name: &str) {
        self.send(serde_json::json!({ "type": "set-device-name", "name": name }))
            .await;
    }

    /// Receives the next outbound message, failing the test on timeout
    pub async fn recv(&mut self) -> OutboundMessage {
        tokio::time::timeout(RECV_TIMEOUT, self.rx.recv())
            .await
            .expect("timed out waiting for outbound message")
            .expect("outbound channel closed")
    }

    /// Receives the next outbound message without waiting
    pub fn try_recv(&mut self) -> Option<OutboundMessage> {
        self.rx.try_recv().ok()
    }

    /// Drains and returns all currently queued outbound messages
    pub fn drain(&mut self) -> Vec<OutboundMessage> {
        let mut messages = Vec::new();
        while let Ok(msg) = self.rx.try_recv() {
            messages.push(msg);
        }
        messages
    }

    /// Disconnects this client from the engine
    pub fn disconnect(&self) {
        self.engine
            .connections
            .unregister(&self.handle.id, "test disconnect");
    }
}

/// Returns the device names from a `device-list` message, in roster order.
pub fn roster_names(msg: &OutboundMessage) -> Vec<Option<String>> {
    match msg {
        OutboundMessage::DeviceList { devices } => {
            devices.iter().map(|d| d.name.clone()).collect()
        }
        other => panic!("expected device-list, got {other:?}"),
    }
}

/// Returns the device IDs from a `device-list` message.
pub fn roster_ids(msg: &OutboundMessage) -> Vec<DeviceId> {
    match msg {
        OutboundMessage::DeviceList { devices } => devices.iter().map(|d| d.id).collect(),
        other => panic!("expected device-list, got {other:?}"),
    }
}
