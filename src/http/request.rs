//! Request handling.
//!
//! # Responsibilities
//! - Generate a unique request ID (UUID v4) when the caller sent none
//! - Read the optional JSON body and URL query into a `SearchInput`
//!
//! # Design Decisions
//! - Request ID added as early as possible for tracing
//! - Body over the size limit, or not JSON, is treated as absent rather
//!   than rejected, so every request still gets a JSON answer

use axum::body::Body;
use axum::http::Request;
use serde_json::Value;
use tower_http::request_id::{MakeRequestId, RequestId};
use uuid::Uuid;

use crate::search::SearchInput;

/// Header carrying the request ID.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Generates UUID v4 request IDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidRequestId;

impl MakeRequestId for UuidRequestId {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        Uuid::new_v4().to_string().parse().ok().map(RequestId::new)
    }
}

/// Request ID of a request, `"unknown"` if none was assigned.
pub fn request_id<B>(request: &Request<B>) -> &str {
    request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
}

/// Collect search input from the URL query and JSON body.
pub async fn read_search_input(request: Request<Body>, max_body_bytes: usize) -> SearchInput {
    let (parts, body) = request.into_parts();

    let body = match axum::body::to_bytes(body, max_body_bytes).await {
        Ok(bytes) if bytes.is_empty() => None,
        Ok(bytes) => serde_json::from_slice::<Value>(&bytes).ok(),
        Err(e) => {
            tracing::debug!(error = %e, "Ignoring unreadable request body");
            None
        }
    };

    SearchInput::new(body, parts.uri.query())
}
