//! Error types for `chuckle-ingest`.

use reqwest::StatusCode;
use thiserror::Error;

/// The remote joke provider could not give us a joke.
#[derive(Debug, Error)]
pub enum FetchError {
  #[error("request to joke provider failed: {0}")]
  Request(#[from] reqwest::Error),

  #[error("joke provider answered {0}")]
  Status(StatusCode),

  #[error("joke provider sent malformed JSON: {0}")]
  Decode(#[source] reqwest::Error),

  #[error("joke provider response has no string `value` field")]
  MissingValue,
}

/// Why one fetch-and-persist run failed.
#[derive(Debug, Error)]
pub enum IngestError {
  #[error(transparent)]
  Fetch(#[from] FetchError),

  /// The joke was fetched but could not be stored. The text is dropped.
  #[error("failed to store joke: {0}")]
  Insert(#[source] Box<dyn std::error::Error + Send + Sync>),
}
