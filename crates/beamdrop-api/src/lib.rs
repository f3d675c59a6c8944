//! # beamdrop-api
//!
//! HTTP API layer for BeamDrop built on Axum.
//!
//! Provides the health endpoint, the WebSocket upgrade that feeds the
//! relay engine, CORS, request tracing, and response DTOs.

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use router::build_router;
pub use state::AppState;
