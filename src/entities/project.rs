//! Project metadata and column model records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Metadata for a single server-hosted project
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectMetadata {
    /// Project name as shown in the server UI
    pub name: String,

    /// Creation timestamp
    #[serde(default, deserialize_with = "deserialize_timestamp")]
    pub created: Option<DateTime<Utc>>,

    /// Last modification timestamp
    #[serde(default, deserialize_with = "deserialize_timestamp")]
    pub modified: Option<DateTime<Utc>>,

    /// Number of rows, when the server reports it
    #[serde(default, rename = "rowCount")]
    pub row_count: Option<u64>,

    /// User-assigned tags
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Column layout for a project, from the `get-models` command
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectModels {
    #[serde(rename = "columnModel")]
    pub column_model: ColumnModel,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ColumnModel {
    #[serde(default)]
    pub columns: Vec<Column>,

    /// Name of the key column (the record grouping column)
    #[serde(default, rename = "keyColumnName")]
    pub key_column_name: Option<String>,

    #[serde(default, rename = "keyCellIndex")]
    pub key_cell_index: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Column {
    pub name: String,

    /// Position of this column's cell within each row's cell array
    #[serde(rename = "cellIndex")]
    pub cell_index: usize,
}

impl ProjectModels {
    /// Ordered column names
    pub fn column_names(&self) -> Vec<&str> {
        self.column_model
            .columns
            .iter()
            .map(|c| c.name.as_str())
            .collect()
    }

    /// Key column name, falling back to the first column
    pub fn key_column(&self) -> Option<&str> {
        self.column_model
            .key_column_name
            .as_deref()
            .or_else(|| self.column_model.columns.first().map(|c| c.name.as_str()))
    }

    /// Cell index for a column, by name
    pub fn cell_index(&self, column: &str) -> Option<usize> {
        self.column_model
            .columns
            .iter()
            .find(|c| c.name == column)
            .map(|c| c.cell_index)
    }
}

/// Accept either an RFC 3339 string or a millisecond epoch integer.
///
/// Older servers report `created`/`modified` as epoch milliseconds; newer
/// ones use ISO strings.
fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => DateTime::parse_from_rfc3339(&s)
            .ok()
            .map(|dt| dt.with_timezone(&Utc)),
        Some(serde_json::Value::Number(n)) => n
            .as_i64()
            .and_then(|ms| DateTime::<Utc>::from_timestamp_millis(ms)),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_with_iso_timestamps() {
        let json = r#"{
            "name": "duplicates",
            "created": "2023-01-15T10:30:00Z",
            "modified": "2023-01-16T11:00:00Z",
            "rowCount": 10,
            "tags": ["demo"]
        }"#;
        let meta: ProjectMetadata = serde_json::from_str(json).unwrap();
        assert_eq!(meta.name, "duplicates");
        assert_eq!(meta.row_count, Some(10));
        assert_eq!(meta.tags, vec!["demo"]);
        assert!(meta.created.is_some());
    }

    #[test]
    fn test_metadata_with_epoch_timestamps() {
        let json = r#"{"name": "old", "created": 1303500000000, "modified": 1303500000000}"#;
        let meta: ProjectMetadata = serde_json::from_str(json).unwrap();
        assert_eq!(meta.created.unwrap().timestamp_millis(), 1303500000000);
    }

    #[test]
    fn test_metadata_tolerates_unknown_fields() {
        let json = r#"{"name": "x", "customMetadata": {}, "importOptionMetadata": []}"#;
        let meta: ProjectMetadata = serde_json::from_str(json).unwrap();
        assert_eq!(meta.name, "x");
        assert!(meta.created.is_none());
    }

    #[test]
    fn test_models_key_column() {
        let json = r#"{
            "columnModel": {
                "columns": [
                    {"cellIndex": 0, "name": "email"},
                    {"cellIndex": 1, "name": "name"}
                ],
                "keyColumnName": "email",
                "keyCellIndex": 0
            }
        }"#;
        let models: ProjectModels = serde_json::from_str(json).unwrap();
        assert_eq!(models.key_column(), Some("email"));
        assert_eq!(models.column_names(), vec!["email", "name"]);
        assert_eq!(models.cell_index("name"), Some(1));
        assert_eq!(models.cell_index("missing"), None);
    }

    #[test]
    fn test_models_key_column_falls_back_to_first() {
        let json = r#"{"columnModel": {"columns": [{"cellIndex": 0, "name": "a"}]}}"#;
        let models: ProjectModels = serde_json::from_str(json).unwrap();
        assert_eq!(models.key_column(), Some("a"));
    }
}
