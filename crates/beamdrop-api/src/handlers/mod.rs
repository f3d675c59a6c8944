//! HTTP and WebSocket request handlers.

pub mod health;
pub mod ws;
