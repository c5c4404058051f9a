//! Schema inference engine: per-column detection assembled into metadata.

use std::path::Path;

use rayon::prelude::*;

use crate::detect::{detect_datetime_format, detect_sdtype};
use crate::error::Result;
use crate::metadata::{ColumnMetadata, TableMetadata};
use crate::reader::CsvReader;
use crate::sample::{DatePreference, FormatSampling};
use crate::sdtype::SemanticType;
use crate::table::{Column, Table};

/// Infers [`TableMetadata`] from tabular data.
///
/// # Example
///
/// ```
/// use schema_scout::{Column, SchemaInferrer, SemanticType, Table};
///
/// let table = Table::from_columns(vec![
///     Column::new("signed_in", ["2024-01-01", "2024-01-02"]),
///     Column::new("user", ["alice", "bob"]),
/// ])
/// .unwrap();
///
/// let metadata = SchemaInferrer::new().infer(&table, "SignInLogs", "");
/// assert_eq!(metadata.columns[0].data_type, SemanticType::Datetime);
/// assert_eq!(metadata.columns[0].datetime_format.as_deref(), Some("%Y-%m-%d"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct SchemaInferrer {
    /// Date format preference for ambiguous dates.
    date_preference: DatePreference,
    /// How many values decide a datetime column's format.
    format_sampling: FormatSampling,
    /// Evaluate columns on the rayon pool.
    parallel: bool,
    /// Loader used by [`SchemaInferrer::infer_path`].
    reader: CsvReader,
}

impl SchemaInferrer {
    /// Create a new SchemaInferrer with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the date preference for ambiguous date parsing.
    pub fn date_preference(&mut self, date_preference: DatePreference) -> &mut Self {
        self.date_preference = date_preference;
        self
    }

    /// Set how datetime formats are sampled.
    pub fn format_sampling(&mut self, format_sampling: FormatSampling) -> &mut Self {
        self.format_sampling = format_sampling;
        self
    }

    /// Detect columns in parallel. Output order is unaffected.
    pub fn parallel(&mut self, parallel: bool) -> &mut Self {
        self.parallel = parallel;
        self
    }

    /// Replace the CSV loader used by [`SchemaInferrer::infer_path`].
    pub fn reader(&mut self, reader: CsvReader) -> &mut Self {
        self.reader = reader;
        self
    }

    /// Infer metadata for a table.
    ///
    /// Table name and description are taken as given. Columns keep their
    /// source order, and every column gets an empty description.
    pub fn infer(
        &self,
        table: &Table,
        table_name: &str,
        table_description: &str,
    ) -> TableMetadata {
        let columns: Vec<ColumnMetadata> = if self.parallel {
            table
                .columns()
                .par_iter()
                .map(|column| self.describe_column(column))
                .collect()
        } else {
            table
                .columns()
                .iter()
                .map(|column| self.describe_column(column))
                .collect()
        };

        tracing::debug!(
            table = table_name,
            columns = columns.len(),
            rows = table.num_rows(),
            "inferred table schema"
        );

        TableMetadata::new(table_name, table_description, columns)
    }

    /// Load a CSV file and infer its metadata.
    ///
    /// The table is named after the file stem and has an empty description.
    pub fn infer_path<P: AsRef<Path>>(&self, path: P) -> Result<TableMetadata> {
        let path = path.as_ref();
        let table = self.reader.read_path(path)?;
        Ok(self.infer(&table, &table_name_for(path), ""))
    }

    /// Detect one column's type and, for datetimes, its format.
    pub fn describe_column(&self, column: &Column) -> ColumnMetadata {
        let sdtype = detect_sdtype(column, self.date_preference);

        let format = match sdtype {
            SemanticType::Datetime => {
                detect_datetime_format(column, self.date_preference, self.format_sampling)
            }
            _ => None,
        };

        tracing::debug!(
            column = column.name(),
            sdtype = %sdtype,
            datetime_format = format,
            "detected column type"
        );

        ColumnMetadata::new(column.name(), sdtype).with_datetime_format(format)
    }
}

/// Table name derived from a CSV path: the file name without its extension.
pub fn table_name_for(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "table".to_string())
}
