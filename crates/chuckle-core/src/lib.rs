//! Core types and trait definitions for the chuckle joke collector.
//!
//! This crate is free of HTTP and database dependencies. Storage backends
//! implement [`store::JokeStore`]; the ingestion pipeline and the HTTP layer
//! depend only on that abstraction.

pub mod joke;
pub mod outcome;
pub mod store;

pub use joke::Joke;
pub use outcome::FetchOutcome;
pub use store::JokeStore;
