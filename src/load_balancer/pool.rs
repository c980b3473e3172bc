//! Upstream pool management.
//!
//! # Responsibilities
//! - Parse the raw `SEARX_POOL` value into an ordered list of base URLs
//! - Distinguish "not configured" from "configured but empty"

use thiserror::Error;

/// Why no pool could be resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PoolError {
    /// The pool variable is missing or blank.
    #[error("SEARX_POOL not set")]
    NotSet,

    /// The pool variable holds only separators and whitespace.
    #[error("SEARX_POOL empty")]
    Empty,
}

/// Ordered, non-empty set of interchangeable upstream base URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pool {
    upstreams: Vec<String>,
}

impl Pool {
    /// Resolve a pool from its raw comma-separated form.
    pub fn from_raw(raw: Option<&str>) -> Result<Self, PoolError> {
        let raw = raw.map(str::trim).unwrap_or_default();
        if raw.is_empty() {
            return Err(PoolError::NotSet);
        }
        Self::new(split_pool(raw))
    }

    /// Build a pool from already separated entries.
    pub fn new(upstreams: Vec<String>) -> Result<Self, PoolError> {
        if upstreams.is_empty() {
            return Err(PoolError::Empty);
        }
        Ok(Self { upstreams })
    }

    /// Upstreams in configured order.
    pub fn upstreams(&self) -> &[String] {
        &self.upstreams
    }

    pub fn len(&self) -> usize {
        self.upstreams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.upstreams.is_empty()
    }
}

/// Split a comma-separated list, trimming entries and dropping empty ones.
pub fn split_pool(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}
