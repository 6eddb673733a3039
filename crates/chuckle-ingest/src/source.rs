//! Where jokes come from.

use std::{future::Future, time::Duration};

use reqwest::Client;
use serde_json::Value;

use crate::error::FetchError;

/// The public Chuck Norris joke endpoint.
pub const DEFAULT_JOKE_API_URL: &str = "https://api.chucknorris.io/jokes/random";

/// A remote provider that hands out one joke per call.
pub trait JokeSource: Send + Sync {
  fn fetch_joke(&self) -> impl Future<Output = Result<String, FetchError>> + Send + '_;
}

/// Fetches jokes with a plain `GET` and reads the `value` field of the JSON
/// body.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Debug, Clone)]
pub struct HttpJokeSource {
  client: Client,
  url:    String,
}

impl HttpJokeSource {
  /// `timeout` bounds the whole request, body included.
  pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
    let client = Client::builder().timeout(timeout).build()?;
    Ok(Self { client, url: url.into() })
  }
}

impl JokeSource for HttpJokeSource {
  async fn fetch_joke(&self) -> Result<String, FetchError> {
    let resp = self.client.get(&self.url).send().await?;

    let status = resp.status();
    if !status.is_success() {
      return Err(FetchError::Status(status));
    }

    // A body cut short by a timeout or reset is a transport failure, not
    // bad JSON.
    let body: Value = resp.json().await.map_err(|e| {
      if e.is_decode() { FetchError::Decode(e) } else { FetchError::Request(e) }
    })?;
    body
      .get("value")
      .and_then(Value::as_str)
      .map(str::to_owned)
      .ok_or(FetchError::MissingValue)
  }
}
