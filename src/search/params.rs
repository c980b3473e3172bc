//! Search parameter extraction and validation.
//!
//! # Responsibilities
//! - Merge JSON body fields and URL query fields (body wins per field)
//! - Validate the free-text query
//! - Build the query string sent to every upstream
//!
//! # Design Decisions
//! - JSON `null` is treated as missing and falls through to the URL query
//! - Non-string JSON scalars are stringified
//! - Upstream URLs are joined literally; no URL-aware merging

use serde_json::{Map, Value};
use url::form_urlencoded;

use crate::dispatch::DispatchError;
use crate::search::categories::RawCategories;

/// Maximum length of `q` after trimming, in UTF-16 code units.
pub const MAX_QUERY_CHARS: usize = 200;

/// Everything a caller sent that may carry search parameters.
#[derive(Debug, Clone, Default)]
pub struct SearchInput {
    /// Fields of the JSON request body, empty when there is none.
    pub body: Map<String, Value>,
    /// Decoded URL query pairs, in order.
    pub query: Vec<(String, String)>,
}

impl SearchInput {
    /// Build input from a JSON body and a raw URL query string.
    ///
    /// A body that is not a JSON object contributes nothing.
    pub fn new(body: Option<Value>, raw_query: Option<&str>) -> Self {
        let body = match body {
            Some(Value::Object(map)) => map,
            _ => Map::new(),
        };
        let query = raw_query
            .map(|q| form_urlencoded::parse(q.as_bytes()).into_owned().collect())
            .unwrap_or_default();
        Self { body, query }
    }

    fn body_value(&self, key: &str) -> Option<&Value> {
        self.body.get(key).filter(|v| !v.is_null())
    }

    fn query_values(&self, key: &str) -> Vec<&str> {
        self.query
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    /// Scalar text for `key`, body first.
    fn text(&self, key: &str) -> Option<String> {
        if let Some(value) = self.body_value(key) {
            return Some(json_text(value));
        }
        self.query_values(key).first().map(|v| v.to_string())
    }

    fn categories(&self) -> RawCategories {
        for key in ["categories", "category"] {
            if let Some(value) = self.body_value(key) {
                return RawCategories::from_json(value);
            }
            let values = self.query_values(key);
            if !values.is_empty() {
                return RawCategories::from_query(&values);
            }
        }
        RawCategories::Absent
    }
}

fn json_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Validated, normalized search parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchParams {
    pub q: String,
    pub categories: Option<String>,
    pub language: Option<String>,
    pub page: Option<String>,
}

impl SearchParams {
    /// Extract and validate parameters from caller input.
    pub fn from_input(input: &SearchInput) -> Result<Self, DispatchError> {
        let q = input.text("q").unwrap_or_default().trim().to_string();
        // UTF-16 units, so characters outside the BMP (emoji) count twice.
        if q.is_empty() || q.encode_utf16().count() > MAX_QUERY_CHARS {
            return Err(DispatchError::InvalidQuery);
        }

        Ok(Self {
            q,
            categories: input.categories().normalize(),
            language: optional_text(input, "language"),
            page: optional_text(input, "page"),
        })
    }

    /// Form-encoded query string for upstream requests.
    pub fn to_query_string(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        serializer.append_pair("q", &self.q);
        serializer.append_pair("format", "json");
        if let Some(categories) = &self.categories {
            serializer.append_pair("categories", categories);
        }
        if let Some(language) = &self.language {
            serializer.append_pair("language", language);
        }
        if let Some(page) = &self.page {
            serializer.append_pair("page", page);
        }
        serializer.finish()
    }
}

fn optional_text(input: &SearchInput, key: &str) -> Option<String> {
    input
        .text(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Append a query string to an upstream base URL.
pub fn upstream_url(base: &str, query: &str) -> String {
    let separator = if base.contains('?') { '&' } else { '?' };
    format!("{}{}{}", base, separator, query)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn input(body: Value, query: &str) -> SearchInput {
        SearchInput::new(Some(body), Some(query))
    }

    #[test]
    fn test_query_string_order() {
        let params = SearchParams::from_input(&input(
            json!({"q": " rust async ", "categories": ["it", "", "science"], "language": " en ", "page": 2}),
            "",
        ))
        .unwrap();

        assert_eq!(params.q, "rust async");
        assert_eq!(params.page.as_deref(), Some("2"));
        assert_eq!(
            params.to_query_string(),
            "q=rust+async&format=json&categories=it%2Cscience&language=en&page=2"
        );
    }

    #[test]
    fn test_body_wins_over_query() {
        let params =
            SearchParams::from_input(&input(json!({"q": "from body"}), "q=from+query&language=de"))
                .unwrap();
        assert_eq!(params.q, "from body");
        assert_eq!(params.language.as_deref(), Some("de"));
    }

    #[test]
    fn test_null_body_field_falls_through() {
        let params =
            SearchParams::from_input(&input(json!({"q": null}), "q=fallback")).unwrap();
        assert_eq!(params.q, "fallback");
    }

    #[test]
    fn test_category_lookup_order() {
        let p = SearchParams::from_input(&input(
            json!({"q": "x", "category": "body-single"}),
            "categories=query-plural",
        ))
        .unwrap();
        assert_eq!(p.categories.as_deref(), Some("query-plural"));

        let p = SearchParams::from_input(&input(json!({"q": "x"}), "category=a&category=b")).unwrap();
        assert_eq!(p.categories.as_deref(), Some("a,b"));
    }

    #[test]
    fn test_blank_optionals_are_omitted() {
        let p = SearchParams::from_input(&input(
            json!({"q": "x", "language": "  ", "page": "", "categories": " , "}),
            "",
        ))
        .unwrap();
        assert_eq!(p.to_query_string(), "q=x&format=json");
    }

    #[test]
    fn test_invalid_q() {
        for body in [json!({}), json!({"q": "   "}), json!({"q": "a".repeat(201)})] {
            assert!(matches!(
                SearchParams::from_input(&input(body, "")),
                Err(DispatchError::InvalidQuery)
            ));
        }
        // 200 multi-byte characters still fit.
        assert!(SearchParams::from_input(&input(json!({"q": "é".repeat(200)}), "")).is_ok());
        // Astral characters take two units each.
        assert!(SearchParams::from_input(&input(json!({"q": "🦀".repeat(100)}), "")).is_ok());
        assert!(matches!(
            SearchParams::from_input(&input(json!({"q": "🦀".repeat(101)}), "")),
            Err(DispatchError::InvalidQuery)
        ));
        // Trimming happens before the length check.
        let padded = format!("  {}  ", "a".repeat(200));
        assert!(SearchParams::from_input(&input(json!({"q": padded}), "")).is_ok());
    }

    #[test]
    fn test_non_object_body_is_ignored() {
        let input = SearchInput::new(Some(json!(["q", "x"])), Some("q=hello"));
        assert!(input.body.is_empty());
        assert_eq!(SearchParams::from_input(&input).unwrap().q, "hello");
    }

    #[test]
    fn test_upstream_url_join() {
        assert_eq!(upstream_url("http://a", "q=x"), "http://a?q=x");
        assert_eq!(upstream_url("http://a/search", "q=x"), "http://a/search?q=x");
        assert_eq!(upstream_url("http://a/?key=1", "q=x"), "http://a/?key=1&q=x");
    }
}
