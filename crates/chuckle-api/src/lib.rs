//! HTTP surface for chuckle.
//!
//! Exposes an axum [`Router`] over an [`Ingestor`]: a liveness message, an
//! on-demand fetch trigger and the list of stored jokes. Binding, TLS and
//! shutdown are the caller's responsibility.

pub mod error;
pub mod jokes;

use std::sync::Arc;

use axum::{Router, routing::get};
use chuckle_core::JokeStore;
use chuckle_ingest::{Ingestor, JokeSource};
use tower_http::trace::TraceLayer;

pub use error::ApiError;

/// Build the router. Every request is traced at the `tower_http` target.
pub fn router<S, P>(ingestor: Arc<Ingestor<S, P>>) -> Router
where
  S: JokeStore + 'static,
  P: JokeSource + 'static,
{
  Router::new()
    .route("/", get(jokes::home))
    .route("/fetch", get(jokes::fetch::<S, P>))
    .route("/jokes", get(jokes::list::<S, P>))
    .layer(TraceLayer::new_for_http())
    .with_state(ingestor)
}

// ─── Integration tests ────────────────────────────────────────────────────────
