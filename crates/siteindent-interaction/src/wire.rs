//! Lenient access to backend records.
//!
//! The backend mixes camelCase and snake_case keys, sends ids as strings or
//! numbers, and sometimes sends a single object where a list is expected.
//! [`Record`] reads a field under any of its known spellings.

use serde::Deserialize;
use serde_json::Value;
use siteindent_core::ApiError;

/// Borrowed view over one JSON object from the backend.
#[derive(Debug, Clone, Copy)]
pub struct Record<'a> {
    value: &'a Value,
}

impl<'a> Record<'a> {
    /// Fails unless `value` is a JSON object.
    pub fn new(value: &'a Value, what: &str) -> Result<Self, ApiError> {
        if value.is_object() {
            Ok(Self { value })
        } else {
            Err(ApiError::malformed(format!("{} is not an object", what)))
        }
    }

    /// First non-null value under any of `keys`.
    pub fn field(&self, keys: &[&str]) -> Option<&'a Value> {
        keys.iter()
            .filter_map(|key| self.value.get(key))
            .find(|v| !v.is_null())
    }

    /// Text field; numbers are accepted and rendered as text. Blank strings count as absent.
    pub fn text(&self, keys: &[&str]) -> Option<String> {
        keys.iter()
            .filter_map(|key| self.value.get(key))
            .find_map(|v| match v {
                Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
    }

    pub fn require_text(&self, keys: &[&str], what: &str) -> Result<String, ApiError> {
        self.text(keys)
            .ok_or_else(|| {
                let key = keys.first().copied().unwrap_or("value");
                ApiError::malformed(format!("{} has no {}", what, key))
            })
    }

    /// Numeric field; numeric strings are accepted.
    pub fn number(&self, keys: &[&str]) -> Option<f64> {
        keys.iter()
            .filter_map(|key| self.value.get(key))
            .find_map(|v| match v {
                Value::Number(n) => n.as_f64(),
                Value::String(s) => s.trim().parse().ok(),
                _ => None,
            })
    }

    pub fn count(&self, keys: &[&str]) -> Option<u64> {
        self.number(keys)
            .filter(|n| n.is_finite() && *n >= 0.0)
            .map(|n| n as u64)
    }

    /// List field; a lone object is treated as a one-element list.
    pub fn list(&self, keys: &[&str]) -> Option<Vec<&'a Value>> {
        self.field(keys).map(one_or_many)
    }
}

/// Items of a list payload; a lone object becomes a one-element list and `null` an empty one.
pub fn one_or_many(value: &Value) -> Vec<&Value> {
    match value {
        Value::Array(items) => items.iter().collect(),
        Value::Null => Vec::new(),
        other => vec![other],
    }
}

/// `POST /auth/login` payload.
#[derive(Debug, Deserialize)]
pub struct LoginPayload {
    pub token: String,
    pub user: Value,
}

/// `POST /upload` payload.
#[derive(Debug, Deserialize)]
pub struct UploadPayload {
    #[serde(alias = "fileUrl", alias = "file_url")]
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_text_accepts_any_spelling_and_numbers() {
        let value = json!({"site_id": "site-thane", "id": 42, "name": "  "});
        let record = Record::new(&value, "indent").unwrap();

        assert_eq!(record.text(&["siteId", "site_id"]).as_deref(), Some("site-thane"));
        assert_eq!(record.text(&["id"]).as_deref(), Some("42"));
        assert_eq!(record.text(&["name"]), None);
        assert!(record.require_text(&["vendorName"], "order").is_err());
    }

    #[test]
    fn test_number_accepts_numeric_strings() {
        let value = json!({"quantity": "12.5", "total": 3});
        let record = Record::new(&value, "line").unwrap();
        assert_eq!(record.number(&["quantity"]), Some(12.5));
        assert_eq!(record.count(&["total"]), Some(3));
    }

    #[test]
    fn test_one_or_many() {
        assert_eq!(one_or_many(&json!([1, 2])).len(), 2);
        assert_eq!(one_or_many(&json!({"id": 1})).len(), 1);
        assert!(one_or_many(&Value::Null).is_empty());
    }

    #[test]
    fn test_record_requires_object() {
        assert!(Record::new(&json!("x"), "user").is_err());
    }
}
