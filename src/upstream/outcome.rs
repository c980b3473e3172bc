//! Result of a single upstream attempt.

use serde_json::Value;
use std::time::Duration;

use crate::resilience::DeadlineExceeded;

/// How one attempt against one upstream ended.
#[derive(Debug, Clone, PartialEq)]
pub enum AttemptOutcome {
    /// 2xx with a JSON body.
    Success { body: Value, elapsed: Duration },
    /// Upstream answered with a non-success status.
    Status {
        status: u16,
        detail: String,
        elapsed: Duration,
    },
    /// The call did not complete (connect error, reset, unreadable body).
    Transport { error: String },
    /// The per-attempt deadline expired and the call was abandoned.
    TimedOut(DeadlineExceeded),
}

impl AttemptOutcome {
    /// Metric/log label.
    pub fn label(&self) -> &'static str {
        match self {
            AttemptOutcome::Success { .. } => "success",
            AttemptOutcome::Status { .. } => "status",
            AttemptOutcome::Transport { .. } => "transport",
            AttemptOutcome::TimedOut(_) => "timeout",
        }
    }
}
