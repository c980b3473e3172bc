//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, request ID, tracing span)
//!     → OPTIONS: 204 + CORS
//!     → otherwise request.rs (URL query + JSON body → SearchInput)
//!     → dispatcher
//!     → response.rs (status, JSON body, Cache-Control)
//!     → CORS headers attached, sent to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{UuidRequestId, X_REQUEST_ID};
pub use response::SearchReply;
pub use server::{AppState, HttpServer, ServerError};
