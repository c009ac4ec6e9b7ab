//! JSON export and import of line tools.
//!
//! The export is a plain JSON array of `{ id, toolType, points, options }`.
//! Import is lenient per entry (bad entries are skipped) but strict about the
//! document itself: anything that is not a JSON array is rejected up front.

use bevy::log::{error, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::model::LogicalPoint;

/// The persisted form of one tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineToolExport {
    pub id: String,
    pub tool_type: String,
    pub points: Vec<LogicalPoint>,
    pub options: Value,
}

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("expected an array of line tools, found {0}")]
    NotAnArray(&'static str),
}

/// One usable entry of an import document.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportEntry {
    /// `None` when the entry carries no (or an empty) id
    pub id: Option<String>,
    pub tool_type: String,
    pub points: Vec<LogicalPoint>,
    pub options: Option<Value>,
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Parse an import document, skipping malformed entries.
pub fn parse_import(json: &str) -> Result<Vec<ImportEntry>, ImportError> {
    let root: Value = serde_json::from_str(json)?;
    let Value::Array(items) = root else {
        return Err(ImportError::NotAnArray(kind_of(&root)));
    };

    Ok(items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match parse_entry(&item) {
            Ok(entry) => Some(entry),
            Err(reason) => {
                warn!("Skipping line tool entry {}: {}", index, reason);
                None
            }
        })
        .collect())
}

fn parse_entry(item: &Value) -> Result<ImportEntry, String> {
    let object = item
        .as_object()
        .ok_or_else(|| format!("expected an object, found {}", kind_of(item)))?;

    let tool_type = object
        .get("toolType")
        .and_then(Value::as_str)
        .ok_or("missing toolType")?
        .to_string();
    let points = object.get("points").ok_or("missing points")?;
    let points: Vec<LogicalPoint> =
        serde_json::from_value(points.clone()).map_err(|e| format!("bad points: {}", e))?;

    let id = object
        .get("id")
        .and_then(Value::as_str)
        .filter(|id| !id.is_empty())
        .map(str::to_string);
    let options = object.get("options").filter(|o| o.is_object()).cloned();

    Ok(ImportEntry {
        id,
        tool_type,
        points,
        options,
    })
}

/// Serialize exports as a JSON array string.
pub fn to_json(exports: &[LineToolExport]) -> String {
    serde_json::to_string(exports).unwrap_or_else(|e| {
        error!("Failed to serialize line tools: {}", e);
        "[]".to_string()
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_export_field_names() {
        let export = LineToolExport {
            id: "a".to_string(),
            tool_type: "HorizontalLine".to_string(),
            points: vec![LogicalPoint::new(1_700_000_000.0, 100.0)],
            options: json!({ "visible": true }),
        };
        let json = to_json(&[export]);
        assert_eq!(
            json,
            r#"[{"id":"a","toolType":"HorizontalLine","points":[{"timestamp":1700000000,"price":100}],"options":{"visible":true}}]"#
        );
    }

    #[test]
    fn test_invalid_documents_are_errors() {
        assert!(matches!(parse_import("not json"), Err(ImportError::Json(_))));
        assert!(matches!(
            parse_import(r#"{"id":"a"}"#),
            Err(ImportError::NotAnArray("an object"))
        ));
    }

    #[test]
    fn test_malformed_entries_are_skipped() {
        let entries = parse_import(
            r#"[
                {"id":"ok","toolType":"TrendLine","points":[{"timestamp":1,"price":2}]},
                {"id":"no-type","points":[]},
                {"id":"no-points","toolType":"TrendLine"},
                {"toolType":"TrendLine","points":"nope"},
                42
            ]"#,
        )
        .unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].id.as_deref(), Some("ok"));
        assert!(entries[0].options.is_none());
    }

    #[test]
    fn test_empty_id_counts_as_missing() {
        let entries =
            parse_import(r#"[{"id":"","toolType":"Text","points":[],"options":{"a":1}}]"#)
                .unwrap();
        assert_eq!(entries[0].id, None);
        assert_eq!(entries[0].options, Some(json!({ "a": 1 })));
    }
}
