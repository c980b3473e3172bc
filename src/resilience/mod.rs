//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Attempt against one upstream:
//!     → timeouts.rs (enforce per-attempt deadline)
//!     → On failure: dispatcher moves to the next upstream in rotation order
//! ```
//!
//! # Design Decisions
//! - Timeouts are non-negotiable; every upstream call has a deadline
//! - Failover instead of retry: each upstream is tried at most once per request
//! - No backoff between attempts

pub mod timeouts;

pub use timeouts::{with_deadline, DeadlineExceeded};
