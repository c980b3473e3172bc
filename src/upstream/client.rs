//! HTTP client for upstream search servers.
//!
//! # Responsibilities
//! - Issue `GET <upstream>?<query>` with `Accept: application/json`
//! - Bound each call by the deadline the dispatcher passes in
//! - Classify the result as an `AttemptOutcome`; never return an error

use reqwest::header::ACCEPT;
use serde_json::Value;
use std::future::Future;
use std::time::{Duration, Instant};

use crate::resilience::with_deadline;
use crate::upstream::outcome::AttemptOutcome;

/// Number of characters of an error body kept for diagnostics.
pub const DETAIL_CHARS: usize = 200;

/// Something that can perform one upstream attempt.
pub trait UpstreamClient: Send + Sync + 'static {
    /// Fetch `url`, giving up once `deadline` has elapsed.
    fn fetch(&self, url: &str, deadline: Duration) -> impl Future<Output = AttemptOutcome> + Send;
}

/// `reqwest`-backed upstream client.
#[derive(Debug, Clone)]
pub struct HttpUpstreamClient {
    client: reqwest::Client,
}

impl HttpUpstreamClient {
    /// Create a client that identifies itself with `user_agent`.
    pub fn new(user_agent: &str) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().user_agent(user_agent).build()?;
        Ok(Self { client })
    }

    async fn request(&self, url: &str, started: Instant) -> Result<AttemptOutcome, reqwest::Error> {
        let response = self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await?;
        let elapsed = started.elapsed();
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Ok(AttemptOutcome::Status {
                status: status.as_u16(),
                detail: truncate_chars(&text, DETAIL_CHARS),
                elapsed,
            });
        }

        let body = response.json::<Value>().await?;
        Ok(AttemptOutcome::Success { body, elapsed })
    }
}

impl UpstreamClient for HttpUpstreamClient {
    async fn fetch(&self, url: &str, deadline: Duration) -> AttemptOutcome {
        let started = Instant::now();
        match with_deadline(deadline, self.request(url, started)).await {
            Ok(Ok(outcome)) => outcome,
            Ok(Err(e)) => AttemptOutcome::Transport {
                error: e.to_string(),
            },
            Err(exceeded) => AttemptOutcome::TimedOut(exceeded),
        }
    }
}

/// First `max` characters of `text`, on a char boundary.
pub fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}
