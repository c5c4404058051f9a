use serde::{Deserialize, Serialize};

use crate::error::{Result, SchemaError};
use crate::sdtype::SemanticType;

/// Inferred description of one column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMetadata {
    /// Column name as it appears in the source.
    pub column_name: String,
    /// Detected semantic type.
    pub data_type: SemanticType,
    /// Free-form description; inference always leaves it empty.
    #[serde(default)]
    pub description: String,
    /// Display/parse format, only for datetime columns.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datetime_format: Option<String>,
}

impl ColumnMetadata {
    /// Create column metadata with an empty description and no format.
    pub fn new(column_name: impl Into<String>, data_type: SemanticType) -> Self {
        Self {
            column_name: column_name.into(),
            data_type,
            description: String::new(),
            datetime_format: None,
        }
    }

    /// Attach a datetime format. Ignored unless the column is a datetime.
    pub fn with_datetime_format(mut self, format: Option<impl Into<String>>) -> Self {
        if self.data_type.is_temporal() {
            self.datetime_format = format.map(Into::into);
        }
        self
    }
}

/// Inferred schema document for one table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableMetadata {
    /// Table name supplied by the caller.
    pub table_name: String,
    /// Table description supplied by the caller.
    #[serde(default)]
    pub table_description: String,
    /// Columns in source order.
    pub columns: Vec<ColumnMetadata>,
}

impl TableMetadata {
    /// Create a new TableMetadata instance.
    pub fn new(
        table_name: impl Into<String>,
        table_description: impl Into<String>,
        columns: Vec<ColumnMetadata>,
    ) -> Self {
        Self {
            table_name: table_name.into(),
            table_description: table_description.into(),
            columns,
        }
    }

    /// Look up a column by name.
    pub fn column(&self, name: &str) -> Option<&ColumnMetadata> {
        self.columns.iter().find(|c| c.column_name == name)
    }

    /// Check invariants that deserialization alone cannot enforce.
    pub fn validate(&self) -> Result<()> {
        for column in &self.columns {
            if column.datetime_format.is_some() && !column.data_type.is_temporal() {
                return Err(SchemaError::InvalidInput(format!(
                    "column '{}' has a datetime_format but data_type is {}",
                    column.column_name, column.data_type
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_datetime_format_only_on_datetime() {
        let col = ColumnMetadata::new("ts", SemanticType::Datetime)
            .with_datetime_format(Some("%Y-%m-%d"));
        assert_eq!(col.datetime_format.as_deref(), Some("%Y-%m-%d"));

        let col = ColumnMetadata::new("n", SemanticType::Numerical)
            .with_datetime_format(Some("%Y-%m-%d"));
        assert_eq!(col.datetime_format, None);
    }

    #[test]
    fn test_serialize_omits_absent_format() {
        let col = ColumnMetadata::new("name", SemanticType::String);
        let json = serde_json::to_value(&col).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "column_name": "name",
                "data_type": "string",
                "description": ""
            })
        );
    }

    #[test]
    fn test_validate_rejects_stray_format() {
        let columns = vec![ColumnMetadata::new("n", SemanticType::Numerical)];
        let mut meta = TableMetadata::new("t", "", columns);
        assert!(meta.validate().is_ok());

        meta.columns[0].datetime_format = Some("%Y-%m-%d".to_string());
        assert!(matches!(meta.validate(), Err(SchemaError::InvalidInput(_))));
    }
}
