//! Request dispatch across the upstream pool.
//!
//! # States
//! ```text
//! Validating ──(pool unset/empty)──▶ 500
//!     │      ──(bad q)─────────────▶ 400
//!     ▼
//! Attempting(i) ──(success)──────────────────▶ Succeeded (200 + _proxy)
//!     │         ──(failure, i+1 < max)───────▶ Attempting(i+1)
//!     │         ──(failure, i+1 == max)──────▶ Exhausted (502 + last)
//! ```
//!
//! # Design Decisions
//! - Attempts are strictly sequential; no backoff between them
//! - `max = min(policy.max_attempts, pool size)`; each upstream at most once
//! - Validation happens before rotation, so rejected requests do not move
//!   the cursor

use serde_json::Value;
use std::time::Duration;

use crate::config::UpstreamConfig;
use crate::dispatch::types::{AttemptRecord, DispatchError, ProxyMeta};
use crate::load_balancer::{Pool, PoolError, RoundRobin};
use crate::observability::metrics;
use crate::search::{upstream_url, SearchInput, SearchParams};
use crate::upstream::{AttemptOutcome, HttpUpstreamClient, UpstreamClient};

/// Failure reported when a 2xx body is neither an object nor an array.
const NON_OBJECT_BODY: &str = "upstream returned a non-object JSON body";

/// Per-request attempt limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttemptPolicy {
    /// Deadline for each individual attempt.
    pub attempt_timeout: Duration,
    /// Upper bound on attempts per request.
    pub max_attempts: usize,
}

impl Default for AttemptPolicy {
    fn default() -> Self {
        Self {
            attempt_timeout: Duration::from_secs(12),
            max_attempts: 3,
        }
    }
}

impl From<&UpstreamConfig> for AttemptPolicy {
    fn from(config: &UpstreamConfig) -> Self {
        Self {
            attempt_timeout: Duration::from_millis(config.attempt_timeout_ms),
            max_attempts: config.max_attempts,
        }
    }
}

/// Forwards searches to the pool with round-robin start and failover.
#[derive(Debug)]
pub struct Dispatcher<C = HttpUpstreamClient> {
    pool: Result<Pool, PoolError>,
    cursor: RoundRobin,
    client: C,
    policy: AttemptPolicy,
}

impl<C: UpstreamClient> Dispatcher<C> {
    /// Create a dispatcher with its own rotation cursor starting at 0.
    pub fn new(pool: Result<Pool, PoolError>, client: C, policy: AttemptPolicy) -> Self {
        Self {
            pool,
            cursor: RoundRobin::new(),
            client,
            policy,
        }
    }

    /// Create a dispatcher from the upstream section of the configuration.
    pub fn from_config(config: &UpstreamConfig, client: C) -> Self {
        Self::new(
            Pool::from_raw(config.pool.as_deref()),
            client,
            AttemptPolicy::from(config),
        )
    }

    /// The resolved pool, or why there is none.
    pub fn pool(&self) -> Result<&Pool, PoolError> {
        self.pool.as_ref().map_err(|e| *e)
    }

    pub fn cursor(&self) -> &RoundRobin {
        &self.cursor
    }

    pub fn policy(&self) -> AttemptPolicy {
        self.policy
    }

    /// Dispatch one search.
    ///
    /// Returns the upstream JSON body with `_proxy` attached, or the reason
    /// no upstream answered.
    pub async fn handle(&self, input: &SearchInput) -> Result<Value, DispatchError> {
        let pool = self.pool()?;
        let params = SearchParams::from_input(input)?;
        let query = params.to_query_string();

        let order = self.cursor.pick_order(pool.upstreams());
        let max_attempts = self.policy.max_attempts.min(order.len());

        let mut last: Option<AttemptRecord> = None;

        for (i, upstream) in order.iter().take(max_attempts).enumerate() {
            let attempt = i + 1;
            let url = upstream_url(upstream, &query);
            let outcome = self.client.fetch(&url, self.policy.attempt_timeout).await;
            metrics::record_attempt(upstream, outcome.label());

            match outcome {
                AttemptOutcome::Success { body, elapsed } => {
                    let ms = elapsed.as_millis() as u64;
                    let meta = ProxyMeta {
                        upstream: upstream.clone(),
                        ms,
                        attempt,
                    };
                    match meta.attach(body) {
                        Ok(body) => {
                            tracing::info!(upstream = %upstream, ms, attempt, "upstream_ok");
                            return Ok(body);
                        }
                        Err(body) => {
                            tracing::error!(
                                upstream = %upstream,
                                kind = json_kind(&body),
                                attempt,
                                "upstream_error"
                            );
                            last = Some(AttemptRecord::Transport {
                                upstream: upstream.clone(),
                                error: NON_OBJECT_BODY.to_string(),
                            });
                            continue;
                        }
                    }
                }
                AttemptOutcome::Status {
                    status, elapsed, ..
                } => {
                    tracing::warn!(
                        upstream = %upstream,
                        status,
                        ms = elapsed.as_millis() as u64,
                        attempt,
                        "upstream_fail"
                    );
                }
                AttemptOutcome::Transport { ref error } => {
                    tracing::error!(upstream = %upstream, error = %error, attempt, "upstream_error");
                }
                AttemptOutcome::TimedOut(exceeded) => {
                    tracing::error!(upstream = %upstream, error = %exceeded, attempt, "upstream_error");
                }
            }

            last = AttemptRecord::from_outcome(upstream, &outcome);
        }

        tracing::warn!(
            attempts = max_attempts,
            last_upstream = last.as_ref().map(AttemptRecord::upstream).unwrap_or("none"),
            "All upstream servers failed"
        );
        Err(DispatchError::Exhausted { last })
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
