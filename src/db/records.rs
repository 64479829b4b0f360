//! Procedure results.
//!
//! Procedures answer in one of two shapes: a table of rows, or a single
//! NVARCHAR column holding a JSON document (`FOR JSON PATH`). SQL Server
//! streams long `FOR JSON` output as several rows of that one column, so the
//! document is the concatenation of the first cell of every row.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::db::error::DbError;

/// One result row, keyed by column name.
pub type Record = Map<String, Value>;

/// The first result set of a procedure call, in server order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordSet {
    rows: Vec<Record>,
}

impl RecordSet {
    pub fn new(rows: Vec<Record>) -> Self {
        Self { rows }
    }

    /// Build from JSON objects; anything that is not an object is skipped.
    pub fn from_values(values: impl IntoIterator<Item = Value>) -> Self {
        let rows = values
            .into_iter()
            .filter_map(|v| match v {
                Value::Object(map) => Some(map),
                _ => None,
            })
            .collect();
        Self { rows }
    }

    /// A single-column, single-row result holding `text`.
    pub fn scalar(column: &str, text: impl Into<String>) -> Self {
        let mut row = Map::new();
        row.insert(column.to_string(), Value::String(text.into()));
        Self { rows: vec![row] }
    }

    pub fn rows(&self) -> &[Record] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<Record> {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Value of the first column of the first row.
    pub fn first_value(&self) -> Option<&Value> {
        self.rows.first().and_then(|row| row.values().next())
    }

    /// Text of the first column of the first row.
    pub fn first_text(&self) -> Option<&str> {
        self.first_value().and_then(Value::as_str)
    }

    /// Concatenated text of the single JSON column.
    pub fn document_text(&self) -> Result<String, DbError> {
        if self.rows.is_empty() {
            return Err(DbError::EmptyResult);
        }

        let mut text = String::new();
        for row in &self.rows {
            match row.values().next() {
                Some(Value::String(chunk)) => text.push_str(chunk),
                Some(Value::Null) | None => {}
                Some(other) => {
                    return Err(DbError::MalformedDocument(format!(
                        "expected a JSON text column, found {}",
                        other
                    )))
                }
            }
        }

        if text.trim().is_empty() {
            return Err(DbError::EmptyResult);
        }
        Ok(text)
    }

    /// Decode the single JSON column into `T`.
    pub fn decode_document<T: DeserializeOwned>(&self) -> Result<T, DbError> {
        let text = self.document_text()?;
        serde_json::from_str(&text).map_err(|e| DbError::MalformedDocument(e.to_string()))
    }
}

/// Loose equality used when matching ids from a row against a path segment:
/// the column may come back as a number or as text.
pub fn value_matches_id(value: &Value, id: i64) -> bool {
    match value {
        Value::Number(n) => n.as_i64() == Some(id),
        Value::String(s) => s.trim().parse::<i64>().ok() == Some(id),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Receipt {
        order_id: i64,
    }

    const FOR_JSON_COLUMN: &str = "JSON_F52E2B61-18A1-11d1-B105-00805F49916B";

    #[test]
    fn test_decode_single_row_document() {
        let set = RecordSet::scalar(FOR_JSON_COLUMN, r#"{"order_id": 42}"#);
        let receipt: Receipt = set.decode_document().unwrap();
        assert_eq!(receipt.order_id, 42);
    }

    #[test]
    fn test_decode_document_split_over_rows() {
        let set = RecordSet::from_values(vec![
            json!({ FOR_JSON_COLUMN: "{\"order_" }),
            json!({ FOR_JSON_COLUMN: "id\": 7}" }),
        ]);
        let receipt: Receipt = set.decode_document().unwrap();
        assert_eq!(receipt.order_id, 7);
    }

    #[test]
    fn test_malformed_document_is_an_error() {
        let set = RecordSet::scalar(FOR_JSON_COLUMN, "{not json");
        let err = set.decode_document::<Receipt>().unwrap_err();
        assert!(matches!(err, DbError::MalformedDocument(_)));
    }

    #[test]
    fn test_empty_result_is_an_error() {
        let err = RecordSet::default().decode_document::<Receipt>().unwrap_err();
        assert!(matches!(err, DbError::EmptyResult));
    }

    #[test]
    fn test_non_text_column_is_malformed() {
        let set = RecordSet::from_values(vec![json!({ "count": 3 })]);
        assert!(matches!(
            set.decode_document::<Receipt>(),
            Err(DbError::MalformedDocument(_))
        ));
    }

    #[test]
    fn test_first_text() {
        let set = RecordSet::scalar("message", "SUCCESS: User ID: 12");
        assert_eq!(set.first_text(), Some("SUCCESS: User ID: 12"));
        assert_eq!(RecordSet::default().first_text(), None);
    }

    #[test]
    fn test_value_matches_id() {
        assert!(value_matches_id(&json!(3), 3));
        assert!(value_matches_id(&json!("3"), 3));
        assert!(!value_matches_id(&json!(4), 3));
        assert!(!value_matches_id(&Value::Null, 3));
    }
}
