//! Upstream invocation.
//!
//! # Data Flow
//! ```text
//! dispatcher (url, deadline)
//!     → client.rs (GET with Accept: application/json, bounded by deadline)
//!     → outcome.rs (Success | Status | Transport | TimedOut)
//!     → back to dispatcher for failover decisions
//! ```

pub mod client;
pub mod outcome;

pub use client::{HttpUpstreamClient, UpstreamClient};
pub use outcome::AttemptOutcome;
