//! SQLite backend for the chuckle joke store.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated thread
//! without blocking the async runtime. Every store operation opens its own
//! connection through a retrying [`ConnectionProvider`] and closes it again
//! before returning.

mod encode;
mod schema;
mod store;

pub mod connect;
pub mod error;

pub use connect::{ConnectionProvider, Connector, RetryPolicy, SqliteConnector};
pub use error::{Error, Result};
pub use store::SqliteStore;
