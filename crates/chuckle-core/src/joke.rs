//! Joke — the unit of persistence.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored joke.
///
/// `id` and `created_at` are assigned by the storage layer at insert time and
/// never change afterwards. Text is not unique; the same joke may be stored
/// many times.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Joke {
  pub id:         i64,
  pub joke_text:  String,
  pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::TimeZone;

  #[test]
  fn serialises_with_storage_column_names() {
    let joke = Joke {
      id:         7,
      joke_text:  "Chuck Norris can divide by zero.".into(),
      created_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap(),
    };
    let json = serde_json::to_value(&joke).unwrap();
    assert_eq!(json["id"], 7);
    assert_eq!(json["joke_text"], "Chuck Norris can divide by zero.");
    assert_eq!(json["created_at"], "2024-05-01T12:30:00Z");
  }
}
