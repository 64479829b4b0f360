//! Parameter binding.
//!
//! Request payloads are flattened into [`Params`], a string map, whether they
//! came from a query string, a form body or a JSON body. Typed accessors then
//! coerce individual fields into procedure argument types.

use std::collections::HashMap;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Date format accepted in query strings and forms (`<input type="date">`).
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A field could not be coerced to its procedure type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindError {
    #[error("Invalid integer for {name}: '{value}'")]
    Integer { name: String, value: String },

    #[error("Invalid decimal for {name}: '{value}'")]
    Decimal { name: String, value: String },

    #[error("Invalid date for {name}: '{value}' (expected YYYY-MM-DD)")]
    Date { name: String, value: String },
}

/// Flattened request fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Params(HashMap<String, String>);

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flatten a JSON object body. Scalars are stringified; nulls, arrays and
    /// nested objects are dropped.
    pub fn from_json(map: Map<String, Value>) -> Self {
        let fields = map
            .into_iter()
            .filter_map(|(k, v)| {
                let text = match v {
                    Value::String(s) => s,
                    Value::Number(n) => n.to_string(),
                    Value::Bool(b) => b.to_string(),
                    Value::Null | Value::Array(_) | Value::Object(_) => return None,
                };
                Some((k, text))
            })
            .collect();
        Self(fields)
    }

    /// Builder-style insert, used by tests and internal callers.
    pub fn with(mut self, name: &str, value: impl Into<String>) -> Self {
        self.0.insert(name.to_string(), value.into());
        self
    }

    /// Raw field value.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Field value when present and not blank.
    pub fn present(&self, name: &str) -> Option<&str> {
        self.get(name).filter(|v| !v.trim().is_empty())
    }

    /// Verbatim string; missing becomes NULL, blank is kept.
    pub fn text(&self, name: &str) -> Option<String> {
        self.get(name).map(str::to_string)
    }

    /// String where blank also means NULL.
    pub fn optional_text(&self, name: &str) -> Option<String> {
        self.present(name).map(str::to_string)
    }

    /// String with a default for missing or blank values.
    pub fn text_or(&self, name: &str, default: &str) -> String {
        self.present(name).unwrap_or(default).to_string()
    }

    /// Integer; missing or blank becomes NULL.
    pub fn int(&self, name: &str) -> Result<Option<i32>, BindError> {
        self.parse(name, |name, value| BindError::Integer { name, value })
    }

    pub fn int_or(&self, name: &str, default: i32) -> Result<i32, BindError> {
        Ok(self.int(name)?.unwrap_or(default))
    }

    /// Decimal; missing or blank becomes NULL.
    pub fn decimal(&self, name: &str) -> Result<Option<Decimal>, BindError> {
        self.parse(name, |name, value| BindError::Decimal { name, value })
    }

    pub fn decimal_or(&self, name: &str, default: Decimal) -> Result<Decimal, BindError> {
        Ok(self.decimal(name)?.unwrap_or(default))
    }

    /// Calendar date in `YYYY-MM-DD`; missing or blank becomes NULL.
    pub fn date(&self, name: &str) -> Result<Option<NaiveDate>, BindError> {
        match self.present(name) {
            None => Ok(None),
            Some(raw) => NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
                .map(Some)
                .map_err(|_| BindError::Date {
                    name: name.to_string(),
                    value: raw.to_string(),
                }),
        }
    }

    /// Checkbox-style flag: any value except blank, `0`, `false` or `off`.
    pub fn flag(&self, name: &str) -> bool {
        match self.present(name) {
            None => false,
            Some(v) => !matches!(v.trim().to_ascii_lowercase().as_str(), "0" | "false" | "off"),
        }
    }

    fn parse<T, E>(&self, name: &str, err: E) -> Result<Option<T>, BindError>
    where
        T: FromStr,
        E: FnOnce(String, String) -> BindError,
    {
        match self.present(name) {
            None => Ok(None),
            Some(raw) => raw
                .trim()
                .parse()
                .map(Some)
                .map_err(|_| err(name.to_string(), raw.to_string())),
        }
    }
}

impl FromIterator<(String, String)> for Params {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_int_coercion() {
        let p = Params::new().with("user_id", " 12 ").with("blank", "").with("bad", "12a");
        assert_eq!(p.int("user_id").unwrap(), Some(12));
        assert_eq!(p.int("blank").unwrap(), None);
        assert_eq!(p.int("missing").unwrap(), None);
        assert_eq!(
            p.int("bad").unwrap_err().to_string(),
            "Invalid integer for bad: '12a'"
        );
        assert_eq!(p.int_or("missing", 20).unwrap(), 20);
    }

    #[test]
    fn test_decimal_coercion() {
        let p = Params::new().with("min_price", "10.50").with("max_price", "lots");
        assert_eq!(p.decimal("min_price").unwrap(), Some(Decimal::new(1050, 2)));
        assert!(matches!(p.decimal("max_price"), Err(BindError::Decimal { .. })));
        assert_eq!(p.decimal_or("missing", Decimal::ZERO).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_date_coercion() {
        let p = Params::new().with("start_date", "2025-01-31").with("end_date", "31/01/2025");
        assert_eq!(
            p.date("start_date").unwrap(),
            NaiveDate::from_ymd_opt(2025, 1, 31)
        );
        assert!(matches!(p.date("end_date"), Err(BindError::Date { .. })));
    }

    #[test]
    fn test_text_variants() {
        let p = Params::new().with("keyword", "").with("email", "a@b.c");
        assert_eq!(p.text("keyword"), Some(String::new()));
        assert_eq!(p.optional_text("keyword"), None);
        assert_eq!(p.text_or("sort_by", "newest"), "newest");
        assert_eq!(p.text("email").as_deref(), Some("a@b.c"));
        assert_eq!(p.text("missing"), None);
    }

    #[test]
    fn test_flag() {
        let p = Params::new()
            .with("on", "on")
            .with("one", "1")
            .with("zero", "0")
            .with("false", "false")
            .with("blank", "");
        assert!(p.flag("on"));
        assert!(p.flag("one"));
        assert!(!p.flag("zero"));
        assert!(!p.flag("false"));
        assert!(!p.flag("blank"));
        assert!(!p.flag("missing"));
    }

    #[test]
    fn test_from_json_stringifies_scalars() {
        let body = json!({
            "user_id": 1,
            "variant_id": "5",
            "is_default": true,
            "voucher_id": null,
            "tags": [1, 2]
        });
        let p = Params::from_json(body.as_object().unwrap().clone());
        assert_eq!(p.int("user_id").unwrap(), Some(1));
        assert_eq!(p.int("variant_id").unwrap(), Some(5));
        assert!(p.flag("is_default"));
        assert_eq!(p.get("voucher_id"), None);
        assert_eq!(p.get("tags"), None);
    }

    #[test]
    fn test_deserializes_from_query_string() {
        let p: Params = serde_json::from_value(json!({ "limit": "5" })).unwrap();
        assert_eq!(p.int("limit").unwrap(), Some(5));
    }
}
