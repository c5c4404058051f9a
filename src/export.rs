//! Metadata persistence as indented JSON.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::error::{Result, SchemaError};
use crate::metadata::TableMetadata;

const INDENT: &[u8] = b"    ";

/// Serialize metadata as JSON indented by four spaces.
///
/// Field and column order are preserved; `datetime_format` is only written
/// when present.
pub fn to_json_string(metadata: &TableMetadata) -> Result<String> {
    let mut buf = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(INDENT));
    metadata.serialize(&mut serializer)?;
    String::from_utf8(buf).map_err(|e| SchemaError::InvalidInput(e.to_string()))
}

/// Write metadata to `path`, replacing any existing file.
pub fn write_json<P: AsRef<Path>>(metadata: &TableMetadata, path: P) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, to_json_string(metadata)?)?;
    tracing::info!(
        table = %metadata.table_name,
        path = %path.display(),
        "metadata saved"
    );
    Ok(())
}

/// Read metadata back from `path` and check its invariants.
pub fn read_json<P: AsRef<Path>>(path: P) -> Result<TableMetadata> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(SchemaError::NotFound {
            what: "Metadata file",
            path: path.to_path_buf(),
        });
    }
    let metadata: TableMetadata = serde_json::from_str(&fs::read_to_string(path)?)?;
    metadata.validate()?;
    Ok(metadata)
}

/// Default output location for a table's metadata: `{table_name}_metadata.json`.
pub fn default_output_path(table_name: &str) -> PathBuf {
    PathBuf::from(format!("{table_name}_metadata.json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::ColumnMetadata;
    use crate::sdtype::SemanticType;

    fn sample() -> TableMetadata {
        TableMetadata::new(
            "DeviceEvents",
            "",
            vec![
                ColumnMetadata::new("Timestamp", SemanticType::Datetime)
                    .with_datetime_format(Some("%Y-%m-%d %H:%M:%S")),
                ColumnMetadata::new("DeviceName", SemanticType::String),
            ],
        )
    }

    #[test]
    fn test_json_layout() {
        let json = to_json_string(&sample()).unwrap();
        let expected = r#"{
    "table_name": "DeviceEvents",
    "table_description": "",
    "columns": [
        {
            "column_name": "Timestamp",
            "data_type": "datetime",
            "description": "",
            "datetime_format": "%Y-%m-%d %H:%M:%S"
        },
        {
            "column_name": "DeviceName",
            "data_type": "string",
            "description": ""
        }
    ]
}"#;
        assert_eq!(json, expected);
    }

    #[test]
    fn test_write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("DeviceEvents_metadata.json");

        write_json(&sample(), &path).unwrap();
        assert_eq!(read_json(&path).unwrap(), sample());
    }

    #[test]
    fn test_read_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = read_json(dir.path().join("nope.json"));
        assert!(matches!(result, Err(SchemaError::NotFound { .. })));
    }

    #[test]
    fn test_read_rejects_stray_format() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(
            &path,
            r#"{"table_name": "t", "table_description": "", "columns": [
                {"column_name": "n", "data_type": "numerical", "description": "", "datetime_format": "%Y"}
            ]}"#,
        )
        .unwrap();
        assert!(matches!(read_json(&path), Err(SchemaError::InvalidInput(_))));
    }

    #[test]
    fn test_default_output_path() {
        assert_eq!(
            default_output_path("SignInLogs"),
            PathBuf::from("SignInLogs_metadata.json")
        );
    }
}
