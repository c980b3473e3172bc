//! Load balancing subsystem.
//!
//! # Data Flow
//! ```text
//! SEARX_POOL (raw)
//!     → pool.rs (parse into ordered base URLs)
//!     → round_robin.rs (rotate the pool per request)
//!     → attempt order handed to the dispatcher
//! ```
//!
//! # Design Decisions
//! - Rotation is positional only; no health scoring
//! - The cursor is owned by its dispatcher, not global
//! - The whole rotated pool is returned so fallback order is fixed up front

pub mod pool;
pub mod round_robin;

pub use pool::{Pool, PoolError};
pub use round_robin::RoundRobin;
