//! Timeout enforcement.
//!
//! # Responsibilities
//! - Wrap upstream calls with a per-attempt deadline
//! - Cancel operations cleanly on timeout
//!
//! # Design Decisions
//! - Uses Tokio's timeout facilities; expiry drops the wrapped future,
//!   which aborts any in-flight connection it owns
//! - Timeout errors are distinct from other errors

use std::future::Future;
use std::time::Duration;
use thiserror::Error;

/// The deadline passed before the operation finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("timed out after {}ms", .after.as_millis())]
pub struct DeadlineExceeded {
    pub after: Duration,
}

/// Run `fut` to completion or until `deadline` elapses.
pub async fn with_deadline<F, T>(deadline: Duration, fut: F) -> Result<T, DeadlineExceeded>
where
    F: Future<Output = T>,
{
    tokio::time::timeout(deadline, fut)
        .await
        .map_err(|_| DeadlineExceeded { after: deadline })
}
