// src/domain/images.rs

use rusqlite::types::Value as SqlValue;
use serde_json::Value;

/// The `images` column as it arrives from the store.
///
/// Rows written by different tools disagree on the shape: some hold a JSON
/// array, some a plain URL, some a string that itself contains a serialized
/// array. We tag the shape once at the row boundary and normalize explicitly.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RawImageField {
    Sequence(Vec<String>),
    ScalarString(String),
    #[default]
    Absent,
}

impl RawImageField {
    /// Tags a decoded JSON document. Shapes we don't recognize become `Absent`.
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::Null => RawImageField::Absent,
            Value::String(s) => RawImageField::ScalarString(s),
            Value::Array(items) => match strings_only(items) {
                Some(urls) => RawImageField::Sequence(urls),
                None => RawImageField::Absent,
            },
            _ => RawImageField::Absent,
        }
    }

    /// Column text is normally a JSON document; anything that fails to decode
    /// is kept verbatim as a scalar string.
    pub fn from_stored_text(text: &str) -> Self {
        match serde_json::from_str::<Value>(text) {
            Ok(value) => Self::from_json(value),
            Err(_) => RawImageField::ScalarString(text.to_string()),
        }
    }

    pub fn from_sql_value(value: SqlValue) -> Self {
        match value {
            SqlValue::Text(text) => Self::from_stored_text(&text),
            _ => RawImageField::Absent,
        }
    }

    /// Serialized form written back to the `images` column.
    #[cfg(test)]
    pub fn to_stored_text(&self) -> Option<String> {
        match self {
            RawImageField::Sequence(urls) => Some(Value::from(urls.clone()).to_string()),
            RawImageField::ScalarString(s) => Some(Value::String(s.clone()).to_string()),
            RawImageField::Absent => None,
        }
    }
}

fn strings_only(items: Vec<Value>) -> Option<Vec<String>> {
    items
        .into_iter()
        .map(|item| match item {
            Value::String(s) => Some(s),
            _ => None,
        })
        .collect()
}

/// Ordered list of image URLs for a raw field. Never fails.
pub fn normalize_images(raw: &RawImageField) -> Vec<String> {
    match raw {
        RawImageField::Sequence(urls) => urls.clone(),
        RawImageField::ScalarString(s) => {
            if s.trim().is_empty() {
                return Vec::new();
            }
            match serde_json::from_str::<Vec<String>>(s) {
                Ok(urls) => urls,
                Err(_) => vec![s.clone()],
            }
        }
        RawImageField::Absent => Vec::new(),
    }
}
