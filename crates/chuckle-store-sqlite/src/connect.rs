//! Connection acquisition with fixed-delay retry.
//!
//! There is no pool. Each logical store operation asks the
//! [`ConnectionProvider`] for a fresh connection, uses it, and closes it. If
//! the database cannot be opened the provider waits [`RetryPolicy::delay`]
//! and tries again, up to [`RetryPolicy::max_attempts`] times.

use std::{future::Future, path::PathBuf, time::Duration};

use tokio_rusqlite::Connection;
use tracing::{error, info, warn};

use crate::{Error, Result};

// ─── Retry policy ────────────────────────────────────────────────────────────

/// How often and how patiently to retry opening a connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
  pub max_attempts: u32,
  pub delay:        Duration,
}

impl RetryPolicy {
  /// Build a policy. `max_attempts` is clamped to at least one.
  pub fn new(max_attempts: u32, delay: Duration) -> Self {
    Self { max_attempts: max_attempts.max(1), delay }
  }
}

impl Default for RetryPolicy {
  /// Ten attempts, five seconds apart.
  fn default() -> Self { Self::new(10, Duration::from_secs(5)) }
}

// ─── Connector ───────────────────────────────────────────────────────────────

/// Something that can open one new database connection per call.
pub trait Connector: Send + Sync {
  fn connect(&self) -> impl Future<Output = tokio_rusqlite::Result<Connection>> + Send + '_;
}

/// Opens a SQLite database file.
///
/// Each connection waits up to five seconds on a lock held by another
/// connection before a statement fails with `SQLITE_BUSY`.
#[derive(Debug, Clone)]
pub struct SqliteConnector {
  path:         PathBuf,
  busy_timeout: Duration,
}

impl SqliteConnector {
  pub fn new(path: impl Into<PathBuf>) -> Self {
    Self { path: path.into(), busy_timeout: Duration::from_secs(5) }
  }
}

impl Connector for SqliteConnector {
  async fn connect(&self) -> tokio_rusqlite::Result<Connection> {
    let conn = Connection::open(self.path.clone()).await?;
    let busy_timeout = self.busy_timeout;
    conn
      .call(move |conn| {
        conn.busy_timeout(busy_timeout)?;
        Ok(())
      })
      .await?;
    Ok(conn)
  }
}

// ─── Provider ────────────────────────────────────────────────────────────────

/// Hands out exclusively owned connections, retrying on failure.
pub struct ConnectionProvider<C = SqliteConnector> {
  connector: C,
  policy:    RetryPolicy,
}

impl<C: Connector> ConnectionProvider<C> {
  pub fn new(connector: C, policy: RetryPolicy) -> Self {
    Self { connector, policy }
  }

  pub fn connector(&self) -> &C { &self.connector }

  /// Open a connection, retrying with a fixed delay.
  ///
  /// Suspends only the calling task while waiting. Fails with
  /// [`Error::ConnectionExhausted`] once every attempt has failed.
  pub async fn acquire(&self) -> Result<Connection> {
    let max_attempts = self.policy.max_attempts;
    let mut attempt = 0;
    loop {
      attempt += 1;
      match self.connector.connect().await {
        Ok(conn) => {
          if attempt > 1 {
            info!(attempt, "database connection established after retry");
          }
          return Ok(conn);
        }
        Err(source) if attempt >= max_attempts => {
          error!(attempts = attempt, error = %source, "giving up on database connection");
          return Err(Error::ConnectionExhausted { attempts: attempt, source });
        }
        Err(e) => {
          warn!(
            attempt,
            max_attempts,
            error = %e,
            "database connection failed, retrying in {:?}",
            self.policy.delay,
          );
          tokio::time::sleep(self.policy.delay).await;
        }
      }
    }
  }

  /// Acquire a connection, run `f` on it, and close it.
  ///
  /// The connection never outlives this call: it is closed explicitly on
  /// success and dropped (which also closes it) on every error path.
  pub async fn with_connection<F, R>(&self, f: F) -> Result<R>
  where
    F: FnOnce(&mut rusqlite::Connection) -> tokio_rusqlite::Result<R> + Send + 'static,
    R: Send + 'static,
  {
    let conn = self.acquire().await?;
    let result = conn.call(f).await;
    if let Err(e) = conn.close().await {
      warn!(error = %e, "failed to close database connection");
    }
    Ok(result?)
  }
}
