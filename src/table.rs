//! In-memory table model consumed by the inference engine.

use std::borrow::Cow;

use crate::error::{Result, SchemaError};

/// A single cell value.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    /// Missing value marker.
    Missing,
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Floating point value.
    Float(f64),
    /// Text value, kept verbatim.
    Text(String),
}

/// Hashable identity of a cell for distinct counting.
///
/// Numbers compare by value, so `Int(1)` and `Float(1.0)` are the same key.
/// Integers hash exactly; only non-integral floats hash by bit pattern.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CellKey<'a> {
    Bool(bool),
    Int(i64),
    Float(u64),
    Text(&'a str),
}

impl Cell {
    /// Build a text cell.
    pub fn text(value: impl Into<String>) -> Self {
        Cell::Text(value.into())
    }

    /// Returns true for the missing marker (and for NaN floats).
    #[inline]
    pub fn is_missing(&self) -> bool {
        match self {
            Cell::Missing => true,
            Cell::Float(f) => f.is_nan(),
            _ => false,
        }
    }

    /// Returns true if the cell is stored as a number.
    #[inline]
    pub fn is_numeric(&self) -> bool {
        matches!(self, Cell::Int(_) | Cell::Float(_))
    }

    /// Render the cell as text the way a dataframe stringifies it.
    pub fn to_text(&self) -> Cow<'_, str> {
        match self {
            Cell::Missing => Cow::Borrowed("nan"),
            Cell::Bool(true) => Cow::Borrowed("True"),
            Cell::Bool(false) => Cow::Borrowed("False"),
            Cell::Int(i) => Cow::Owned(i.to_string()),
            Cell::Float(f) => Cow::Owned(float_text(*f)),
            Cell::Text(s) => Cow::Borrowed(s),
        }
    }

    /// Key used for distinct-value counting.
    pub fn key(&self) -> Option<CellKey<'_>> {
        match self {
            Cell::Missing => None,
            Cell::Bool(b) => Some(CellKey::Bool(*b)),
            Cell::Int(i) => Some(CellKey::Int(*i)),
            Cell::Float(f) if f.is_nan() => None,
            Cell::Float(f) => Some(float_key(*f)),
            Cell::Text(s) => Some(CellKey::Text(s)),
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::Text(value)
    }
}

impl From<i64> for Cell {
    fn from(value: i64) -> Self {
        Cell::Int(value)
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Float(value)
    }
}

impl From<bool> for Cell {
    fn from(value: bool) -> Self {
        Cell::Bool(value)
    }
}

impl<T: Into<Cell>> From<Option<T>> for Cell {
    fn from(value: Option<T>) -> Self {
        value.map_or(Cell::Missing, Into::into)
    }
}

/// Integral floats inside the `i64` range share the integer key; `-0.0`
/// lands on `Int(0)`.
#[inline]
fn float_key(f: f64) -> CellKey<'static> {
    // 2^63 is exact in f64; anything below it converts without saturating.
    const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;
    if f.fract() == 0.0 && (-I64_BOUND..I64_BOUND).contains(&f) {
        CellKey::Int(f as i64)
    } else {
        CellKey::Float(f.to_bits())
    }
}

/// Integral floats keep a trailing `.0` so `1.0` never reads as the integer `1`.
fn float_text(f: f64) -> String {
    if f.is_nan() {
        "nan".to_string()
    } else if f.is_infinite() {
        let sign = if f > 0.0 { "" } else { "-" };
        format!("{sign}inf")
    } else if f.fract() == 0.0 && f.abs() < 1e16 {
        format!("{f:.1}")
    } else {
        format!("{f}")
    }
}

/// One named column of cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    cells: Vec<Cell>,
}

impl Column {
    /// Create a column from anything convertible to cells.
    pub fn new<I, C>(name: impl Into<String>, cells: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Cell>,
    {
        Self {
            name: name.into(),
            cells: cells.into_iter().map(Into::into).collect(),
        }
    }

    /// Column name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// All cells, missing ones included.
    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Total row count, missing cells included.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns true if the column has no rows.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Iterate over non-missing cells in row order.
    pub fn present(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter().filter(|c| !c.is_missing())
    }

    /// Returns true if every non-missing cell is stored as a number.
    ///
    /// This is the storage type, not the look of the data: the text `"42"`
    /// is not numeric storage.
    pub fn is_numeric_storage(&self) -> bool {
        self.present().all(Cell::is_numeric)
    }
}

/// A table of equally long named columns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<Column>,
}

impl Table {
    /// Create a new empty table.
    pub const fn new() -> Self {
        Self {
            columns: Vec::new(),
        }
    }

    /// Build a table from columns, rejecting columns of unequal length.
    pub fn from_columns(columns: Vec<Column>) -> Result<Self> {
        if let Some(first) = columns.first() {
            let expected = first.len();
            if let Some(bad) = columns.iter().find(|c| c.len() != expected) {
                return Err(SchemaError::InvalidInput(format!(
                    "column '{}' has {} rows, expected {}",
                    bad.name(),
                    bad.len(),
                    expected
                )));
            }
        }
        Ok(Self { columns })
    }

    /// Build a table from a header and row-major records.
    pub fn from_rows<H, R, C>(headers: H, rows: R) -> Result<Self>
    where
        H: IntoIterator,
        H::Item: Into<String>,
        R: IntoIterator,
        R::Item: IntoIterator<Item = C>,
        C: Into<Cell>,
    {
        let names: Vec<String> = headers.into_iter().map(Into::into).collect();
        let mut columns: Vec<Vec<Cell>> = vec![Vec::new(); names.len()];

        for (row_idx, row) in rows.into_iter().enumerate() {
            let cells: Vec<Cell> = row.into_iter().map(Into::into).collect();
            if cells.len() != names.len() {
                return Err(SchemaError::InvalidInput(format!(
                    "row {} has {} fields, expected {}",
                    row_idx + 1,
                    cells.len(),
                    names.len()
                )));
            }
            for (col, cell) in columns.iter_mut().zip(cells) {
                col.push(cell);
            }
        }

        Ok(Self {
            columns: names
                .into_iter()
                .zip(columns)
                .map(|(name, cells)| Column { name, cells })
                .collect(),
        })
    }

    /// Columns in source order.
    #[inline]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Look up a column by name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name() == name)
    }

    /// Returns the number of columns.
    #[inline]
    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    /// Returns the number of rows.
    #[inline]
    pub fn num_rows(&self) -> usize {
        self.columns.first().map_or(0, Column::len)
    }

    /// Returns true if the table has no columns.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rows() {
        let table = Table::from_rows(
            ["id", "name"],
            vec![
                vec![Cell::Int(1), Cell::text("alice")],
                vec![Cell::Int(2), Cell::Missing],
            ],
        )
        .unwrap();

        assert_eq!(table.num_columns(), 2);
        assert_eq!(table.num_rows(), 2);
        assert_eq!(table.columns()[1].name(), "name");
        assert_eq!(table.column("name").unwrap().present().count(), 1);
    }

    #[test]
    fn test_from_rows_rejects_ragged() {
        let result = Table::from_rows(
            ["a", "b"],
            vec![vec![Cell::Int(1), Cell::Int(2)], vec![Cell::Int(3)]],
        );
        assert!(matches!(result, Err(SchemaError::InvalidInput(_))));
    }

    #[test]
    fn test_from_columns_rejects_length_mismatch() {
        let result = Table::from_columns(vec![
            Column::new("a", [1i64, 2, 3]),
            Column::new("b", [1i64, 2]),
        ]);
        assert!(matches!(result, Err(SchemaError::InvalidInput(_))));
    }

    #[test]
    fn test_cell_text() {
        assert_eq!(Cell::Bool(true).to_text(), "True");
        assert_eq!(Cell::Int(-7).to_text(), "-7");
        assert_eq!(Cell::Float(1.0).to_text(), "1.0");
        assert_eq!(Cell::Float(2.5).to_text(), "2.5");
        assert_eq!(Cell::text("x").to_text(), "x");
    }

    #[test]
    fn test_cell_key_merges_numbers() {
        assert_eq!(Cell::Int(1).key(), Cell::Float(1.0).key());
        assert_eq!(Cell::Float(0.0).key(), Cell::Float(-0.0).key());
        assert_ne!(Cell::Int(1).key(), Cell::text("1").key());
        assert_eq!(Cell::Missing.key(), None);
        assert_eq!(Cell::Float(f64::NAN).key(), None);
    }

    #[test]
    fn test_cell_key_large_integers_stay_distinct() {
        let base = 1i64 << 53;
        assert_ne!(Cell::Int(base).key(), Cell::Int(base + 1).key());
        assert_ne!(Cell::Int(i64::MAX).key(), Cell::Int(i64::MAX - 1).key());
        assert_eq!(Cell::Int(base).key(), Cell::Float(base as f64).key());
        assert_eq!(Cell::Float(0.5).key(), Some(CellKey::Float(0.5f64.to_bits())));
        assert_eq!(Cell::Float(1e300).key(), Some(CellKey::Float(1e300f64.to_bits())));
        assert_ne!(Cell::Float(f64::INFINITY).key(), Cell::Float(f64::NEG_INFINITY).key());
    }

    #[test]
    fn test_numeric_storage_ignores_missing() {
        let col = Column::new("x", [Some(1i64), None, Some(3)]);
        assert!(col.is_numeric_storage());

        let col = Column::new("x", ["1", "2"]);
        assert!(!col.is_numeric_storage());
    }
}
