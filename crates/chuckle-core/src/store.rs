//! The `JokeStore` trait.
//!
//! Implemented by storage backends (e.g. `chuckle-store-sqlite`). The ingest
//! pipeline and the HTTP layer depend on this abstraction, not on any
//! concrete backend.

use std::future::Future;

use crate::joke::Joke;

/// Abstraction over a joke store backend.
///
/// Jokes are append-only: nothing is ever updated or deleted. Implementations
/// acquire their own storage connection for each call and release it before
/// returning, so concurrent callers never share one.
pub trait JokeStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Create the backing table if it does not exist yet. Safe to call any
  /// number of times.
  fn ensure_schema(&self) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Persist a new joke and return the stored record, with `id` and
  /// `created_at` filled in by the store.
  fn insert_joke(
    &self,
    joke_text: String,
  ) -> impl Future<Output = Result<Joke, Self::Error>> + Send + '_;

  /// Return every stored joke, most recently inserted first.
  fn list_jokes(&self) -> impl Future<Output = Result<Vec<Joke>, Self::Error>> + Send + '_;
}
