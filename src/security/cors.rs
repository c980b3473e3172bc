//! CORS response headers.
//!
//! # Responsibilities
//! - Decide `Access-Control-Allow-Origin` from the configured origin
//! - Attach the fixed method/header/max-age policy to every response
//!
//! # Design Decisions
//! - Headers are attached to every response, errors included
//! - Preflight is answered directly; it never reaches the dispatcher

use axum::http::header::{
    InvalidHeaderValue, ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
    ACCESS_CONTROL_ALLOW_ORIGIN, ACCESS_CONTROL_MAX_AGE,
};
use axum::http::{HeaderMap, HeaderValue};

const ALLOW_METHODS: &str = "GET, POST, OPTIONS";
const ALLOW_HEADERS: &str = "Content-Type";
const MAX_AGE_SECS: &str = "86400";

/// CORS policy built from the configured allowed origin.
#[derive(Debug, Clone)]
pub struct CorsPolicy {
    allowed_origin: HeaderValue,
    wildcard: bool,
}

impl CorsPolicy {
    /// Build a policy; fails when the origin cannot be a header value.
    pub fn new(allowed_origin: &str) -> Result<Self, InvalidHeaderValue> {
        Ok(Self {
            allowed_origin: HeaderValue::from_str(allowed_origin)?,
            wildcard: allowed_origin == "*",
        })
    }

    /// Value for `Access-Control-Allow-Origin` given the request's `Origin`.
    pub fn allow_origin(&self, request_origin: Option<&HeaderValue>) -> HeaderValue {
        if self.wildcard {
            return HeaderValue::from_static("*");
        }
        match request_origin {
            Some(origin) if *origin == self.allowed_origin => origin.clone(),
            _ => self.allowed_origin.clone(),
        }
    }

    /// Full set of CORS headers for a response.
    pub fn headers(&self, request_origin: Option<&HeaderValue>) -> HeaderMap {
        let mut headers = HeaderMap::with_capacity(4);
        headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, self.allow_origin(request_origin));
        headers.insert(ACCESS_CONTROL_ALLOW_METHODS, HeaderValue::from_static(ALLOW_METHODS));
        headers.insert(ACCESS_CONTROL_ALLOW_HEADERS, HeaderValue::from_static(ALLOW_HEADERS));
        headers.insert(ACCESS_CONTROL_MAX_AGE, HeaderValue::from_static(MAX_AGE_SECS));
        headers
    }
}

impl Default for CorsPolicy {
    fn default() -> Self {
        Self {
            allowed_origin: HeaderValue::from_static("*"),
            wildcard: true,
        }
    }
}
