//! Column values
//!
//! The typed value stored in a single cell of a resolved row.

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use serde_json::Value;
use uuid::Uuid;

use crate::schema::ColumnType;

/// A value held by a column of a resolved row.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ColumnValue {
    /// No value (null).
    #[default]
    Null,
    /// Boolean value.
    Bool(bool),
    /// 32-bit integer value.
    Int(i32),
    /// 64-bit integer value.
    BigInt(i64),
    /// Text value.
    String(String),
    /// List of text values.
    StringArray(Vec<String>),
    /// UTC timestamp.
    Timestamp(DateTime<Utc>),
    /// Arbitrary JSON document.
    Json(Value),
    /// UUID value.
    Uuid(Uuid),
}

impl ColumnValue {
    /// Check if this is a null value.
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, ColumnValue::Null)
    }

    /// Get as a string slice if this is a text value.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ColumnValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get as a boolean if this is a boolean value.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ColumnValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Get as a 64-bit integer (works for both integer widths).
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ColumnValue::Int(i) => Some(i64::from(*i)),
            ColumnValue::BigInt(i) => Some(*i),
            _ => None,
        }
    }

    /// Get as a JSON document if this is a JSON value.
    #[must_use]
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            ColumnValue::Json(v) => Some(v),
            _ => None,
        }
    }

    /// Get as a UUID if this is a UUID value.
    #[must_use]
    pub fn as_uuid(&self) -> Option<Uuid> {
        match self {
            ColumnValue::Uuid(u) => Some(*u),
            _ => None,
        }
    }

    /// Get as a timestamp if this is a timestamp value.
    #[must_use]
    pub fn as_timestamp(&self) -> Option<DateTime<Utc>> {
        match self {
            ColumnValue::Timestamp(t) => Some(*t),
            _ => None,
        }
    }

    /// Get as a list of strings if this is a string array.
    #[must_use]
    pub fn as_strings(&self) -> Option<&[String]> {
        match self {
            ColumnValue::StringArray(v) => Some(v),
            _ => None,
        }
    }

    /// Check whether this value can be stored in a column of `column_type`.
    ///
    /// Null fits every column.
    #[must_use]
    pub fn fits(&self, column_type: ColumnType) -> bool {
        matches!(
            (self, column_type),
            (ColumnValue::Null, _)
                | (ColumnValue::Bool(_), ColumnType::Bool)
                | (ColumnValue::Int(_), ColumnType::Int)
                | (ColumnValue::BigInt(_), ColumnType::BigInt)
                | (ColumnValue::String(_), ColumnType::String)
                | (ColumnValue::StringArray(_), ColumnType::StringArray)
                | (ColumnValue::Timestamp(_), ColumnType::Timestamp)
                | (ColumnValue::Json(_), ColumnType::Json)
                | (ColumnValue::Uuid(_), ColumnType::Uuid)
        )
    }

    /// Convert into a plain JSON value.
    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            ColumnValue::Null => Value::Null,
            ColumnValue::Bool(b) => Value::Bool(*b),
            ColumnValue::Int(i) => Value::from(*i),
            ColumnValue::BigInt(i) => Value::from(*i),
            ColumnValue::String(s) => Value::String(s.clone()),
            ColumnValue::StringArray(v) => {
                Value::Array(v.iter().cloned().map(Value::String).collect())
            }
            ColumnValue::Timestamp(t) => Value::String(t.to_rfc3339()),
            ColumnValue::Json(v) => v.clone(),
            ColumnValue::Uuid(u) => Value::String(u.to_string()),
        }
    }
}

impl Serialize for ColumnValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

impl From<String> for ColumnValue {
    fn from(s: String) -> Self {
        ColumnValue::String(s)
    }
}

impl From<&str> for ColumnValue {
    fn from(s: &str) -> Self {
        ColumnValue::String(s.to_string())
    }
}

impl From<bool> for ColumnValue {
    fn from(b: bool) -> Self {
        ColumnValue::Bool(b)
    }
}

impl From<i32> for ColumnValue {
    fn from(i: i32) -> Self {
        ColumnValue::Int(i)
    }
}

impl From<i64> for ColumnValue {
    fn from(i: i64) -> Self {
        ColumnValue::BigInt(i)
    }
}

impl From<Uuid> for ColumnValue {
    fn from(u: Uuid) -> Self {
        ColumnValue::Uuid(u)
    }
}

impl From<DateTime<Utc>> for ColumnValue {
    fn from(t: DateTime<Utc>) -> Self {
        ColumnValue::Timestamp(t)
    }
}

impl From<Vec<String>> for ColumnValue {
    fn from(v: Vec<String>) -> Self {
        ColumnValue::StringArray(v)
    }
}

impl From<Value> for ColumnValue {
    fn from(v: Value) -> Self {
        if v.is_null() {
            ColumnValue::Null
        } else {
            ColumnValue::Json(v)
        }
    }
}

impl<T: Into<ColumnValue>> From<Option<T>> for ColumnValue {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(ColumnValue::Null, Into::into)
    }
}
