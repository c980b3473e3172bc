//! Response shaping.
//!
//! # Responsibilities
//! - Turn dispatch results into JSON responses with the right status
//! - Mark upstream-derived responses as never cacheable
//!
//! # Design Decisions
//! - Error bodies are always `{"error": ...}` JSON
//! - 200 and 502 carry `Cache-Control: no-store`; 400/500 do not

use axum::http::header::CACHE_CONTROL;
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Value};

use crate::dispatch::DispatchError;

fn no_store(mut response: Response) -> Response {
    response
        .headers_mut()
        .insert(CACHE_CONTROL, HeaderValue::from_static("no-store"));
    response
}

/// Successful upstream payload, `_proxy` already attached.
#[derive(Debug)]
pub struct SearchReply(pub Value);

impl IntoResponse for SearchReply {
    fn into_response(self) -> Response {
        no_store((StatusCode::OK, Json(self.0)).into_response())
    }
}

impl DispatchError {
    /// HTTP status for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            DispatchError::PoolNotSet | DispatchError::PoolEmpty => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            DispatchError::InvalidQuery => StatusCode::BAD_REQUEST,
            DispatchError::Exhausted { .. } => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for DispatchError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.to_string();
        match self {
            DispatchError::Exhausted { last } => no_store(
                (status, Json(json!({ "error": message, "last": last }))).into_response(),
            ),
            _ => (status, Json(json!({ "error": message }))).into_response(),
        }
    }
}
