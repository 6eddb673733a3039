//! The result shape of a single fetch-and-persist run.

use serde::{Deserialize, Serialize};

/// What one fetch-and-persist run produced.
///
/// Serialised with a `status` tag so the HTTP layer can return it verbatim:
///
/// ```json
/// {"status": "success", "joke": "..."}
/// {"status": "error",   "error": "..."}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum FetchOutcome {
  Success { joke: String },
  Error { error: String },
}

impl FetchOutcome {
  pub fn is_success(&self) -> bool {
    matches!(self, FetchOutcome::Success { .. })
  }
}
