//! Connection lifecycle: handles, pool, heartbeat, and the manager.

pub mod handle;
pub mod heartbeat;
pub mod manager;
pub mod pool;

pub use handle::ConnectionHandle;
pub use manager::ConnectionManager;
pub use pool::ConnectionPool;
