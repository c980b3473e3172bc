//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Every response:
//!     → cors.rs (Access-Control-* headers)
//! ```
//!
//! # Design Decisions
//! - No authentication; the proxy is a public search relay
//! - CORS is the only cross-origin control and it never fails a request

pub mod cors;

pub use cors::CorsPolicy;
