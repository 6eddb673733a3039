//! [`SqliteStore`] — the SQLite implementation of [`JokeStore`].

use std::{path::Path, sync::Arc};

use chuckle_core::{joke::Joke, store::JokeStore};
use tracing::debug;

use crate::{
  connect::{ConnectionProvider, Connector, RetryPolicy, SqliteConnector},
  encode::RawJoke,
  schema::SCHEMA,
  Result,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A joke store backed by a single SQLite file.
///
/// Holds no open connection. Each call acquires one through the provider and
/// closes it before returning. Cloning is cheap; clones share the provider.
pub struct SqliteStore<C = SqliteConnector> {
  provider: Arc<ConnectionProvider<C>>,
}

impl<C> Clone for SqliteStore<C> {
  fn clone(&self) -> Self {
    Self { provider: Arc::clone(&self.provider) }
  }
}

impl SqliteStore<SqliteConnector> {
  /// A store for the database file at `path`. Nothing is opened until the
  /// first operation; call [`JokeStore::ensure_schema`] before using it.
  pub fn open(path: impl AsRef<Path>, policy: RetryPolicy) -> Self {
    Self::new(ConnectionProvider::new(
      SqliteConnector::new(path.as_ref()),
      policy,
    ))
  }
}

impl<C: Connector> SqliteStore<C> {
  pub fn new(provider: ConnectionProvider<C>) -> Self {
    Self { provider: Arc::new(provider) }
  }

  pub fn provider(&self) -> &ConnectionProvider<C> { &self.provider }
}

// ─── JokeStore impl ──────────────────────────────────────────────────────────

impl<C: Connector + 'static> JokeStore for SqliteStore<C> {
  type Error = crate::Error;

  async fn ensure_schema(&self) -> Result<()> {
    self
      .provider
      .with_connection(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    debug!("jokes schema ensured");
    Ok(())
  }

  async fn insert_joke(&self, joke_text: String) -> Result<Joke> {
    let raw = self
      .provider
      .with_connection(move |conn| {
        let tx = conn.transaction()?;
        let raw = tx.query_row(
          "INSERT INTO jokes (joke_text) VALUES (?1)
           RETURNING id, joke_text, created_at",
          rusqlite::params![joke_text],
          RawJoke::from_row,
        )?;
        tx.commit()?;
        Ok(raw)
      })
      .await?;

    let joke = raw.into_joke()?;
    debug!(id = joke.id, "joke inserted");
    Ok(joke)
  }

  async fn list_jokes(&self) -> Result<Vec<Joke>> {
    let raws: Vec<RawJoke> = self
      .provider
      .with_connection(|conn| {
        let mut stmt = conn
          .prepare("SELECT id, joke_text, created_at FROM jokes ORDER BY id DESC")?;
        let rows = stmt
          .query_map([], RawJoke::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawJoke::into_joke).collect()
  }
}
