//! Field projection
//!
//! Turns a field path into a typed column value. Projection never fails on
//! data: absent fields, `null`, paths running through non-objects, and values
//! that do not match the declared column type all project to
//! [`ColumnValue::Null`].

use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::debug;
use uuid::Uuid;

use crate::schema::ColumnType;
use crate::value::ColumnValue;

/// Look up a dotted path (`team.funSettings.allowGiphy`) in a document.
///
/// Returns `None` when any segment is missing or an intermediate value is not
/// an object. An empty path returns the document itself.
#[must_use]
pub fn lookup<'a>(document: &'a Value, path: &str) -> Option<&'a Value> {
    if path.is_empty() {
        return Some(document);
    }
    path.split('.')
        .try_fold(document, |current, segment| current.as_object()?.get(segment))
}

/// Coerce a JSON value into a column value of `column_type`.
///
/// Returns `None` if the value has the wrong shape for the column.
#[must_use]
pub fn coerce(value: &Value, column_type: ColumnType) -> Option<ColumnValue> {
    if value.is_null() {
        return Some(ColumnValue::Null);
    }
    let coerced = match column_type {
        ColumnType::Bool => ColumnValue::Bool(value.as_bool()?),
        ColumnType::Int => ColumnValue::Int(i32::try_from(value.as_i64()?).ok()?),
        ColumnType::BigInt => ColumnValue::BigInt(value.as_i64()?),
        ColumnType::String => ColumnValue::String(value.as_str()?.to_string()),
        ColumnType::StringArray => ColumnValue::StringArray(
            value
                .as_array()?
                .iter()
                .map(|v| v.as_str().map(String::from))
                .collect::<Option<Vec<_>>>()?,
        ),
        ColumnType::Timestamp => ColumnValue::Timestamp(
            DateTime::parse_from_rfc3339(value.as_str()?)
                .ok()?
                .with_timezone(&Utc),
        ),
        ColumnType::Json => ColumnValue::Json(value.clone()),
        ColumnType::Uuid => ColumnValue::Uuid(Uuid::parse_str(value.as_str()?).ok()?),
    };
    Some(coerced)
}

/// Project `path` of `document` into a column value of `column_type`.
#[must_use]
pub fn project(document: &Value, path: &str, column_type: ColumnType) -> ColumnValue {
    let Some(value) = lookup(document, path) else {
        return ColumnValue::Null;
    };
    coerce(value, column_type).unwrap_or_else(|| {
        debug!(path, %column_type, "value does not fit column type, projecting null");
        ColumnValue::Null
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn group() -> Value {
        json!({
            "id": "0b7a9e4e-2f0a-4d5e-9d7e-3c1c5f7c2e11",
            "displayName": "Finance",
            "groupTypes": ["Unified", "DynamicMembership"],
            "unseenCount": 7,
            "createdDateTime": "2021-03-04T05:06:07Z",
            "team": {
                "funSettings": {"allowGiphy": true, "giphyContentRating": "moderate"},
                "channels": [{"id": "19:abc"}]
            },
            "photo": null
        })
    }

    #[test]
    fn test_lookup_nested() {
        let doc = group();
        assert_eq!(
            lookup(&doc, "team.funSettings.allowGiphy"),
            Some(&json!(true))
        );
        assert!(lookup(&doc, "team.guestSettings.allowDeleteChannels").is_none());
        assert!(lookup(&doc, "displayName.length").is_none());
        assert_eq!(lookup(&doc, ""), Some(&doc));
    }

    #[test]
    fn test_project_scalars_keep_native_type() {
        let doc = group();
        assert_eq!(
            project(&doc, "displayName", ColumnType::String),
            ColumnValue::String("Finance".into())
        );
        assert_eq!(project(&doc, "unseenCount", ColumnType::Int), ColumnValue::Int(7));
        assert_eq!(
            project(&doc, "groupTypes", ColumnType::StringArray),
            ColumnValue::StringArray(vec!["Unified".into(), "DynamicMembership".into()])
        );
        let created = project(&doc, "createdDateTime", ColumnType::Timestamp);
        assert_eq!(
            created.as_timestamp().map(|t| t.to_rfc3339()),
            Some("2021-03-04T05:06:07+00:00".to_string())
        );
        assert_eq!(
            project(&doc, "id", ColumnType::Uuid).as_uuid().map(|u| u.to_string()),
            Some("0b7a9e4e-2f0a-4d5e-9d7e-3c1c5f7c2e11".to_string())
        );
    }

    #[test]
    fn test_project_nested_collection_as_json() {
        let doc = group();
        assert_eq!(
            project(&doc, "team.channels", ColumnType::Json),
            ColumnValue::Json(json!([{"id": "19:abc"}]))
        );
    }

    #[test]
    fn test_project_absent_and_null_are_null() {
        let doc = group();
        assert!(project(&doc, "photo", ColumnType::Json).is_null());
        assert!(project(&doc, "photo.height", ColumnType::Int).is_null());
        assert!(project(&doc, "calendar", ColumnType::Json).is_null());
        assert!(project(&doc, "team.schedule", ColumnType::Json).is_null());
    }

    #[test]
    fn test_project_mismatched_types_are_null() {
        let doc = group();
        assert!(project(&doc, "displayName", ColumnType::Bool).is_null());
        assert!(project(&doc, "team.funSettings.giphyContentRating", ColumnType::BigInt).is_null());
        assert!(project(&doc, "displayName", ColumnType::Timestamp).is_null());
        assert!(project(&json!({"n": 5_000_000_000_i64}), "n", ColumnType::Int).is_null());
        assert!(project(&json!({"a": ["x", 1]}), "a", ColumnType::StringArray).is_null());
    }
}
