//! The chuckle ingestion pipeline.
//!
//! [`source::HttpJokeSource`] pulls one joke from the remote provider,
//! [`ingest::Ingestor`] stores it through any [`chuckle_core::JokeStore`], and
//! [`scheduler::Scheduler`] repeats that on a fixed period in the background.

pub mod error;
pub mod ingest;
pub mod scheduler;
pub mod source;

pub use error::{FetchError, IngestError};
pub use ingest::Ingestor;
pub use scheduler::Scheduler;
pub use source::{HttpJokeSource, JokeSource};
