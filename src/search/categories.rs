//! Category list normalization.
//!
//! Callers send categories as a JSON array, a comma-delimited string, or
//! repeated query keys. Everything collapses to one canonical
//! comma-joined string, or nothing.

use serde_json::Value;

/// Categories as they arrived, before normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawCategories {
    Absent,
    List(Vec<String>),
    Delimited(String),
    /// A value of a type that cannot carry categories (number, object, ...).
    Unsupported,
}

impl RawCategories {
    /// Classify a JSON body value.
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Null => RawCategories::Absent,
            Value::String(s) => RawCategories::Delimited(s.clone()),
            Value::Array(items) => {
                RawCategories::List(items.iter().filter_map(truthy_text).collect())
            }
            _ => RawCategories::Unsupported,
        }
    }

    /// Classify the values of a URL query key. Repetition means a list.
    pub fn from_query(values: &[&str]) -> Self {
        match values {
            [] => RawCategories::Absent,
            [single] => RawCategories::Delimited((*single).to_string()),
            many => RawCategories::List(many.iter().map(|v| v.to_string()).collect()),
        }
    }

    /// Canonical comma-joined form, `None` when no category survives.
    pub fn normalize(&self) -> Option<String> {
        let joined = match self {
            RawCategories::Absent | RawCategories::Unsupported => return None,
            RawCategories::Delimited(s) => split_delimited(s).join(","),
            RawCategories::List(items) => items
                .iter()
                .flat_map(|item| split_delimited(item))
                .collect::<Vec<_>>()
                .join(","),
        };
        (!joined.is_empty()).then_some(joined)
    }
}

fn split_delimited(s: &str) -> Vec<&str> {
    s.split(',').map(str::trim).filter(|p| !p.is_empty()).collect()
}

/// Text of a list element, skipping the falsy ones (`""`, `0`, `false`, `null`).
fn truthy_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        Value::Bool(true) => Some("true".to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn renormalize(raw: &RawCategories) -> Option<String> {
        let once = raw.normalize();
        let twice = match &once {
            Some(s) => RawCategories::Delimited(s.clone()).normalize(),
            None => RawCategories::Absent.normalize(),
        };
        assert_eq!(once, twice, "normalization not idempotent for {:?}", raw);
        once
    }

    #[test]
    fn test_list_drops_empty_entries() {
        let raw = RawCategories::from_json(&json!(["news", "", "tech"]));
        assert_eq!(raw.normalize().as_deref(), Some("news,tech"));
    }

    #[test]
    fn test_delimited_trims_and_drops_empty() {
        let raw = RawCategories::from_json(&json!("  news , ,tech "));
        assert_eq!(raw.normalize().as_deref(), Some("news,tech"));
    }

    #[test]
    fn test_absent_and_unsupported() {
        assert_eq!(RawCategories::from_json(&Value::Null).normalize(), None);
        assert_eq!(RawCategories::from_json(&json!(42)).normalize(), None);
        assert_eq!(RawCategories::from_json(&json!({"a": 1})).normalize(), None);
        assert_eq!(RawCategories::from_json(&json!("")).normalize(), None);
        assert_eq!(RawCategories::from_json(&json!(" , ")).normalize(), None);
        assert_eq!(RawCategories::from_json(&json!([])).normalize(), None);
    }

    #[test]
    fn test_falsy_list_elements() {
        let raw = RawCategories::from_json(&json!(["images", 0, false, null, 7, "map"]));
        assert_eq!(raw.normalize().as_deref(), Some("images,7,map"));
    }

    #[test]
    fn test_repeated_query_keys() {
        let raw = RawCategories::from_query(&["news", "science"]);
        assert_eq!(raw, RawCategories::List(vec!["news".into(), "science".into()]));
        assert_eq!(raw.normalize().as_deref(), Some("news,science"));
        assert_eq!(RawCategories::from_query(&[]), RawCategories::Absent);
    }

    #[test]
    fn test_idempotent() {
        let inputs = [
            RawCategories::from_json(&json!(["news", "", "tech"])),
            RawCategories::from_json(&json!([" padded ", "a,,b"])),
            RawCategories::from_json(&json!("  news , ,tech ")),
            RawCategories::from_json(&json!("general")),
            RawCategories::from_json(&Value::Null),
            RawCategories::from_json(&json!(3.5)),
            RawCategories::Absent,
        ];
        for raw in &inputs {
            renormalize(raw);
        }
    }
}
