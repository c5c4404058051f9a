//! CSV loading into a [`Table`] with per-column storage typing.
//!
//! Typing follows dataframe conventions: a column whose values all parse as
//! numbers is stored numerically, a column of `True`/`False` literals is
//! stored as booleans, and anything else keeps its original text.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use foldhash::{HashSet, HashSetExt};

use crate::encoding::decode_text;
use crate::error::{Result, SchemaError};
use crate::table::{Cell, Column, Table};

/// Markers read as missing values unless [`CsvReader::keep_default_na`] is off.
pub const DEFAULT_NA_VALUES: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Check for boolean literals using exhaustive match.
#[inline]
fn parse_bool_literal(s: &str) -> Option<bool> {
    match s {
        "True" | "TRUE" | "true" => Some(true),
        "False" | "FALSE" | "false" => Some(false),
        _ => None,
    }
}

/// CSV reader producing typed tables.
///
/// # Example
///
/// ```no_run
/// use schema_scout::CsvReader;
///
/// let mut reader = CsvReader::new();
/// reader.delimiter(b';').na_values(["-", "?"]);
///
/// let table = reader.read_path("events.csv").unwrap();
/// println!("{} columns, {} rows", table.num_columns(), table.num_rows());
/// ```
#[derive(Debug, Clone)]
pub struct CsvReader {
    /// Field delimiter.
    delimiter: u8,
    /// Whether [`DEFAULT_NA_VALUES`] count as missing.
    keep_default_na: bool,
    /// Additional missing markers.
    extra_na_values: Vec<String>,
}

impl Default for CsvReader {
    fn default() -> Self {
        Self::new()
    }
}

impl CsvReader {
    /// Create a new reader with comma delimiter and default missing markers.
    pub fn new() -> Self {
        Self {
            delimiter: b',',
            keep_default_na: true,
            extra_na_values: Vec::new(),
        }
    }

    /// Set the field delimiter.
    pub fn delimiter(&mut self, delimiter: u8) -> &mut Self {
        self.delimiter = delimiter;
        self
    }

    /// Add extra strings to read as missing values.
    pub fn na_values<I, S>(&mut self, values: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extra_na_values.extend(values.into_iter().map(Into::into));
        self
    }

    /// Whether the default missing markers apply.
    pub fn keep_default_na(&mut self, keep: bool) -> &mut Self {
        self.keep_default_na = keep;
        self
    }

    /// Read a CSV file at the given path.
    pub fn read_path<P: AsRef<Path>>(&self, path: P) -> Result<Table> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => SchemaError::NotFound {
                what: "CSV file",
                path: path.to_path_buf(),
            },
            _ => SchemaError::Io(e),
        })?;
        self.read_reader(std::io::BufReader::new(file))
    }

    /// Read CSV data from a reader.
    pub fn read_reader<R: Read>(&self, mut reader: R) -> Result<Table> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        self.read_bytes(&data)
    }

    /// Read CSV data from bytes.
    pub fn read_bytes(&self, data: &[u8]) -> Result<Table> {
        let (text, encoding) = decode_text(data);
        tracing::debug!(encoding, bytes = data.len(), "decoded CSV input");

        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(true)
            .flexible(false)
            .from_reader(text.as_bytes());

        let headers = csv_reader.headers()?.clone();
        if headers.is_empty() {
            return Err(SchemaError::EmptyData);
        }

        let na = self.na_set();
        let mut raw: Vec<Vec<Option<String>>> = vec![Vec::new(); headers.len()];
        for record in csv_reader.records() {
            let record = record?;
            for (col, field) in raw.iter_mut().zip(record.iter()) {
                col.push((!na.contains(field)).then(|| field.to_string()));
            }
        }

        let columns = column_names(headers.iter())
            .into_iter()
            .zip(raw)
            .map(|(name, values)| Column::new(name, type_column(values)))
            .collect();

        Table::from_columns(columns)
    }

    fn na_set(&self) -> HashSet<&str> {
        let mut set = HashSet::with_capacity(DEFAULT_NA_VALUES.len() + self.extra_na_values.len());
        if self.keep_default_na {
            set.extend(DEFAULT_NA_VALUES.iter().copied());
        }
        set.extend(self.extra_na_values.iter().map(String::as_str));
        set
    }
}

/// Name blank headers `Unnamed: {i}` and suffix duplicates with `.1`, `.2`, ...
fn column_names<'a>(headers: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut names = Vec::new();

    for (idx, header) in headers.enumerate() {
        let base = if header.is_empty() {
            format!("Unnamed: {idx}")
        } else {
            header.to_string()
        };

        let mut name = base.clone();
        let mut suffix = 1;
        while seen.contains(&name) {
            name = format!("{base}.{suffix}");
            suffix += 1;
        }
        seen.insert(name.clone());
        names.push(name);
    }

    names
}

/// Pick the storage type for a column of raw fields.
///
/// Integer columns with missing values are stored as floats, matching how a
/// dataframe upcasts them.
fn type_column(values: Vec<Option<String>>) -> Vec<Cell> {
    let present = || values.iter().flatten();

    if present().next().is_none() {
        return vec![Cell::Missing; values.len()];
    }

    if present().all(|v| v.parse::<i64>().is_ok()) {
        let has_missing = values.iter().any(Option::is_none);
        return values
            .iter()
            .map(|v| match v.as_deref().map(str::parse::<i64>) {
                Some(Ok(i)) if has_missing => Cell::Float(i as f64),
                Some(Ok(i)) => Cell::Int(i),
                _ => Cell::Missing,
            })
            .collect();
    }

    if present().all(|v| v.parse::<f64>().is_ok()) {
        return values
            .iter()
            .map(|v| match v.as_deref().map(str::parse::<f64>) {
                Some(Ok(f)) => Cell::Float(f),
                _ => Cell::Missing,
            })
            .collect();
    }

    if present().all(|v| parse_bool_literal(v).is_some()) {
        return values
            .iter()
            .map(|v| v.as_deref().and_then(parse_bool_literal).map_or(Cell::Missing, Cell::Bool))
            .collect();
    }

    values.into_iter().map(Cell::from).collect()
}
