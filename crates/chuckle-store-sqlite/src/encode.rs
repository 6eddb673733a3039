//! Decoding helpers between SQLite rows and [`Joke`].
//!
//! Timestamps are stored as RFC 3339 strings.

use chrono::{DateTime, Utc};
use chuckle_core::joke::Joke;

use crate::{Error, Result};

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(format!("{s:?}: {e}")))
}

/// A `jokes` row exactly as SQLite hands it back.
pub struct RawJoke {
  pub id:         i64,
  pub joke_text:  String,
  pub created_at: String,
}

impl RawJoke {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:         row.get(0)?,
      joke_text:  row.get(1)?,
      created_at: row.get(2)?,
    })
  }

  pub fn into_joke(self) -> Result<Joke> {
    Ok(Joke {
      id:         self.id,
      joke_text:  self.joke_text,
      created_at: decode_dt(&self.created_at)?,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn decodes_sqlite_default_timestamp() {
    let dt = decode_dt("2024-05-01T12:30:00.250Z").unwrap();
    assert_eq!(dt.to_rfc3339(), "2024-05-01T12:30:00.250+00:00");
  }

  #[test]
  fn rejects_garbage_timestamp() {
    assert!(matches!(decode_dt("yesterday"), Err(Error::DateParse(_))));
  }
}
