//! Error type for `chuckle-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// The database stayed unreachable for every attempt the retry policy
  /// allowed. Carries the error from the final attempt.
  #[error("database unreachable after {attempts} attempts: {source}")]
  ConnectionExhausted {
    attempts: u32,
    #[source]
    source:   tokio_rusqlite::Error,
  },

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
