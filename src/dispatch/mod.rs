//! Search dispatch subsystem.
//!
//! # Data Flow
//! ```text
//! SearchInput
//!     → dispatcher.rs (pool check, validation, rotation, attempt loop)
//!     → upstream client (one bounded attempt per upstream)
//!     → types.rs (ProxyMeta on success, DispatchError otherwise)
//! ```

pub mod dispatcher;
pub mod types;

pub use dispatcher::{AttemptPolicy, Dispatcher};
pub use types::{AttemptRecord, DispatchError, ProxyMeta};
