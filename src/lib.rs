//! SearXNG pool proxy library.
//!
//! Forwards a search to one of several equivalent upstream search servers,
//! starting one position further around the pool on every request and
//! failing over to the next upstream when an attempt fails.

pub mod config;
pub mod dispatch;
pub mod http;
pub mod lifecycle;
pub mod load_balancer;
pub mod observability;
pub mod resilience;
pub mod search;
pub mod security;
pub mod upstream;

pub use config::schema::ProxyConfig;
pub use dispatch::{DispatchError, Dispatcher};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
