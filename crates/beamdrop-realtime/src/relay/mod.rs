//! Transfer relay — stateless forwarding of transfer lifecycle events.

pub mod transfer;

pub use transfer::{RelayOutcome, TransferRelay};
