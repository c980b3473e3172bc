//! Search request parameters.
//!
//! # Data Flow
//! ```text
//! JSON body + URL query
//!     → params.rs (merge, validate q, trim optionals)
//!     → categories.rs (normalize category list)
//!     → SearchParams::to_query_string()
//!     → params::upstream_url() per attempt
//! ```

pub mod categories;
pub mod params;

pub use categories::RawCategories;
pub use params::{upstream_url, SearchInput, SearchParams, MAX_QUERY_CHARS};
