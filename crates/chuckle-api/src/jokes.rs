//! Handlers for the joke endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/` | Plain-text liveness message |
//! | `GET`  | `/fetch` | Fetch and store one joke now; 500 with the error payload on failure |
//! | `GET`  | `/jokes` | Every stored joke, newest first |

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode};
use chuckle_core::{FetchOutcome, Joke, JokeStore};
use chuckle_ingest::{Ingestor, JokeSource};

use crate::error::ApiError;

pub const LIVENESS_MESSAGE: &str =
  "Application is running. Access /fetch to fetch a joke or /jokes to see stored jokes.";

/// `GET /`
pub async fn home() -> &'static str { LIVENESS_MESSAGE }

/// `GET /fetch` — runs one fetch-and-persist synchronously.
pub async fn fetch<S, P>(
  State(ingestor): State<Arc<Ingestor<S, P>>>,
) -> (StatusCode, Json<FetchOutcome>)
where
  S: JokeStore,
  P: JokeSource,
{
  let outcome = ingestor.fetch_and_persist().await;
  let status = if outcome.is_success() {
    StatusCode::OK
  } else {
    StatusCode::INTERNAL_SERVER_ERROR
  };
  (status, Json(outcome))
}

/// `GET /jokes`
pub async fn list<S, P>(
  State(ingestor): State<Arc<Ingestor<S, P>>>,
) -> Result<Json<Vec<Joke>>, ApiError>
where
  S: JokeStore,
  P: JokeSource,
{
  let jokes = ingestor
    .store()
    .list_jokes()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(jokes))
}
