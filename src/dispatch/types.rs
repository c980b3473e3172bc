//! Dispatch results and error definitions.

use serde::Serialize;
use serde_json::{json, Value};
use thiserror::Error;

use crate::load_balancer::PoolError;
use crate::upstream::AttemptOutcome;

/// Metadata injected into successful responses as `_proxy`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyMeta {
    /// Base URL of the upstream that answered.
    pub upstream: String,
    /// Milliseconds until the upstream responded.
    pub ms: u64,
    /// 1-based attempt number.
    pub attempt: usize,
}

impl ProxyMeta {
    /// Attach this metadata to a response body.
    ///
    /// Objects get the `_proxy` field and arrays pass through unchanged.
    /// Any other body (`null`, numbers, strings, booleans) is not a usable
    /// search answer and is returned as the error.
    pub fn attach(&self, body: Value) -> Result<Value, Value> {
        match body {
            Value::Object(mut map) => {
                map.insert(
                    "_proxy".to_string(),
                    json!({
                        "upstream": self.upstream,
                        "ms": self.ms,
                        "attempt": self.attempt,
                    }),
                );
                Ok(Value::Object(map))
            }
            Value::Array(_) => Ok(body),
            other => Err(other),
        }
    }
}

/// The most recent failed attempt, reported when every attempt fails.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum AttemptRecord {
    /// Upstream answered with a non-success status.
    Status {
        upstream: String,
        status: u16,
        detail: String,
    },
    /// The call never produced a response.
    Transport { upstream: String, error: String },
}

impl AttemptRecord {
    /// Describe a failed outcome. Returns `None` for a success.
    pub fn from_outcome(upstream: &str, outcome: &AttemptOutcome) -> Option<Self> {
        let upstream = upstream.to_string();
        match outcome {
            AttemptOutcome::Success { .. } => None,
            AttemptOutcome::Status { status, detail, .. } => Some(AttemptRecord::Status {
                upstream,
                status: *status,
                detail: detail.clone(),
            }),
            AttemptOutcome::Transport { error } => Some(AttemptRecord::Transport {
                upstream,
                error: error.clone(),
            }),
            AttemptOutcome::TimedOut(exceeded) => Some(AttemptRecord::Transport {
                upstream,
                error: format!("upstream {}", exceeded),
            }),
        }
    }

    pub fn upstream(&self) -> &str {
        match self {
            AttemptRecord::Status { upstream, .. } | AttemptRecord::Transport { upstream, .. } => {
                upstream
            }
        }
    }
}

/// Errors that end a dispatch without an upstream answer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    /// `SEARX_POOL` missing or blank.
    #[error("SEARX_POOL not set")]
    PoolNotSet,

    /// `SEARX_POOL` has no usable entries.
    #[error("SEARX_POOL empty")]
    PoolEmpty,

    /// `q` missing, blank, or too long.
    #[error("Invalid q (required, max 200 chars)")]
    InvalidQuery,

    /// Every attempt failed.
    #[error("All upstream servers failed")]
    Exhausted { last: Option<AttemptRecord> },
}

impl From<PoolError> for DispatchError {
    fn from(err: PoolError) -> Self {
        match err {
            PoolError::NotSet => DispatchError::PoolNotSet,
            PoolError::Empty => DispatchError::PoolEmpty,
        }
    }
}
