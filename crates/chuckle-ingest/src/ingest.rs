//! Fetch one joke and persist it.

use chuckle_core::{FetchOutcome, Joke, JokeStore};
use tracing::{info, warn};

use crate::{error::IngestError, source::JokeSource};

/// Ties a [`JokeSource`] to a [`JokeStore`].
///
/// Shared between the scheduler and the HTTP layer behind an `Arc`; it holds
/// no per-call state, so concurrent runs are independent.
pub struct Ingestor<S, P> {
  store:  S,
  source: P,
}

impl<S, P> Ingestor<S, P>
where
  S: JokeStore,
  P: JokeSource,
{
  pub fn new(store: S, source: P) -> Self {
    Self { store, source }
  }

  pub fn store(&self) -> &S { &self.store }

  pub fn source(&self) -> &P { &self.source }

  /// Fetch a joke and insert it, reporting the first failure.
  ///
  /// Nothing is written unless the fetch succeeded. If the insert fails the
  /// fetched text is lost.
  pub async fn try_fetch_and_persist(&self) -> Result<Joke, IngestError> {
    let text = self.source.fetch_joke().await?;
    self
      .store
      .insert_joke(text)
      .await
      .map_err(|e| IngestError::Insert(Box::new(e)))
  }

  /// Like [`Self::try_fetch_and_persist`], but folds every failure into
  /// [`FetchOutcome::Error`]. Never fails.
  pub async fn fetch_and_persist(&self) -> FetchOutcome {
    match self.try_fetch_and_persist().await {
      Ok(joke) => {
        info!(id = joke.id, "joke stored");
        FetchOutcome::Success { joke: joke.joke_text }
      }
      Err(e) => {
        warn!(error = %e, "fetch-and-persist failed");
        FetchOutcome::Error { error: e.to_string() }
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use std::time::Duration;

  use chuckle_store_sqlite::{RetryPolicy, SqliteStore};
  use serde_json::json;
  use tempfile::TempDir;
  use wiremock::{Mock, MockServer, ResponseTemplate, matchers::method};

  use super::*;
  use crate::source::HttpJokeSource;

  async fn store() -> (TempDir, SqliteStore) {
    let dir = tempfile::tempdir().unwrap();
    let store = SqliteStore::open(
      dir.path().join("jokes.db"),
      RetryPolicy::new(2, Duration::from_millis(1)),
    );
    store.ensure_schema().await.unwrap();
    (dir, store)
  }

  fn source(url: String) -> HttpJokeSource {
    HttpJokeSource::new(url, Duration::from_secs(5)).unwrap()
  }

  async fn provider_returning(body: serde_json::Value) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
      .respond_with(ResponseTemplate::new(200).set_body_json(body))
      .mount(&server)
      .await;
    server
  }

  /// A URL nothing is listening on.
  fn dead_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/jokes/random")
  }

  #[tokio::test]
  async fn success_persists_exactly_one_row() {
    let (_dir, store) = store().await;
    let server = provider_returning(json!({"value": "Chuck Norris counted to infinity twice."})).await;
    let ingestor = Ingestor::new(store, source(server.uri()));

    let outcome = ingestor.fetch_and_persist().await;
    assert_eq!(
      outcome,
      FetchOutcome::Success { joke: "Chuck Norris counted to infinity twice.".into() }
    );

    let jokes = ingestor.store().list_jokes().await.unwrap();
    assert_eq!(jokes.len(), 1);
    assert_eq!(jokes[0].joke_text, "Chuck Norris counted to infinity twice.");
  }

  #[tokio::test]
  async fn network_failure_persists_nothing() {
    let (_dir, store) = store().await;
    let ingestor = Ingestor::new(store, source(dead_url()));

    let outcome = ingestor.fetch_and_persist().await;
    match outcome {
      FetchOutcome::Error { error } => assert!(error.contains("joke provider"), "{error}"),
      other => panic!("expected error, got {other:?}"),
    }
    assert!(ingestor.store().list_jokes().await.unwrap().is_empty());
  }

  #[tokio::test]
  async fn missing_value_persists_nothing() {
    let (_dir, store) = store().await;
    let server = provider_returning(json!({"categories": []})).await;
    let ingestor = Ingestor::new(store, source(server.uri()));

    let outcome = ingestor.fetch_and_persist().await;
    assert!(!outcome.is_success());
    assert!(ingestor.store().list_jokes().await.unwrap().is_empty());
  }

  #[tokio::test]
  async fn insert_failure_after_fetch_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let store = SqliteStore::open(
      dir.path().join("missing").join("jokes.db"),
      RetryPolicy::new(2, Duration::from_millis(1)),
    );
    let server = provider_returning(json!({"value": "lost joke"})).await;
    let ingestor = Ingestor::new(store, source(server.uri()));

    let err = ingestor.try_fetch_and_persist().await.unwrap_err();
    assert!(matches!(err, IngestError::Insert(_)), "{err:?}");
    assert!(err.to_string().contains("unreachable after 2 attempts"), "{err}");

    let outcome = ingestor.fetch_and_persist().await;
    assert!(matches!(outcome, FetchOutcome::Error { .. }));
    assert_eq!(server.received_requests().await.unwrap().len(), 2);
  }

  #[tokio::test]
  async fn repeated_runs_append_rows_newest_first() {
    let (_dir, store) = store().await;
    let server = provider_returning(json!({"value": "again"})).await;
    let ingestor = Ingestor::new(store, source(server.uri()));

    for _ in 0..3 {
      assert!(ingestor.fetch_and_persist().await.is_success());
    }
    let jokes = ingestor.store().list_jokes().await.unwrap();
    assert_eq!(jokes.len(), 3);
    assert!(jokes.windows(2).all(|w| w[0].id > w[1].id));
  }
}
