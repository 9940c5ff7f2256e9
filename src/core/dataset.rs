use chrono::{NaiveDate, NaiveDateTime};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// One spreadsheet cell.
///
/// Cells keep the scalar type the source delivered. Stringification follows
/// the booking export's own printing rules (see [`CellValue::to_raw_string`]).
#[derive(Debug, Clone, Default, PartialEq)]
pub enum CellValue {
    /// Blank cell.
    #[default]
    Empty,
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
}

impl CellValue {
    /// Text cell; blank input becomes [`CellValue::Empty`].
    pub fn text(value: impl Into<String>) -> Self {
        let value = value.into();
        if value.is_empty() {
            Self::Empty
        } else {
            Self::Text(value)
        }
    }

    /// True for blank cells and not-a-number floats.
    pub fn is_missing(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Float(f) => f.is_nan(),
            _ => false,
        }
    }

    /// Raw stringification.
    ///
    /// Blank cells and NaN print as `nan`, integral floats keep a trailing
    /// `.0` (`12.0`), booleans print `True`/`False`, timestamps print as
    /// `YYYY-MM-DD HH:MM:SS`.
    pub fn to_raw_string(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("nan"),
            Self::Text(s) => f.write_str(s),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => fmt_float(*x, f),
            Self::Bool(true) => f.write_str("True"),
            Self::Bool(false) => f.write_str("False"),
            Self::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            Self::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S")),
        }
    }
}

fn fmt_float(x: f64, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if x.is_nan() {
        f.write_str("nan")
    } else if x.is_infinite() {
        f.write_str(if x > 0.0 { "inf" } else { "-inf" })
    } else if x.fract() == 0.0 && x.abs() < 1e16 {
        write!(f, "{x:.1}")
    } else {
        write!(f, "{x}")
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        Self::text(value)
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        Self::text(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<NaiveDate> for CellValue {
    fn from(value: NaiveDate) -> Self {
        Self::Date(value)
    }
}

impl From<NaiveDateTime> for CellValue {
    fn from(value: NaiveDateTime) -> Self {
        Self::DateTime(value)
    }
}

/// Name-based access to one row of a dataset.
pub trait Row {
    /// Cell under `column`, or `None` when the row's schema has no such column.
    fn get(&self, column: &str) -> Option<&CellValue>;

    /// Whether the row's schema has `column` (regardless of the cell's content).
    fn has_column(&self, column: &str) -> bool {
        self.get(column).is_some()
    }
}

impl Row for HashMap<String, CellValue> {
    fn get(&self, column: &str) -> Option<&CellValue> {
        HashMap::get(self, column)
    }
}

impl Row for BTreeMap<String, CellValue> {
    fn get(&self, column: &str) -> Option<&CellValue> {
        BTreeMap::get(self, column)
    }
}

/// Row-oriented table with named columns.
///
/// Every row has exactly one cell per column; short rows are padded with
/// [`CellValue::Empty`] and long rows truncated on insert.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    columns: Vec<String>,
    rows: Vec<Vec<CellValue>>,
}

impl Dataset {
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a row, padding or truncating it to the column count.
    pub fn push_row(&mut self, mut cells: Vec<CellValue>) {
        cells.resize(self.columns.len(), CellValue::Empty);
        self.rows.push(cells);
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.column_index(column).is_some()
    }

    /// Position of the first column named `column`.
    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }

    pub fn row(&self, index: usize) -> Option<RowRef<'_>> {
        self.rows.get(index).map(|cells| RowRef {
            columns: &self.columns,
            cells,
        })
    }

    pub fn rows(&self) -> impl ExactSizeIterator<Item = RowRef<'_>> {
        self.rows.iter().map(|cells| RowRef {
            columns: &self.columns,
            cells,
        })
    }

    /// Names from `wanted` that this dataset does not have.
    pub fn missing_columns<'a>(&self, wanted: impl IntoIterator<Item = &'a str>) -> Vec<String> {
        wanted
            .into_iter()
            .filter(|c| !self.has_column(c))
            .map(String::from)
            .collect()
    }

    /// Copy of the dataset restricted to `keep`, in `keep` order.
    /// Names not present are skipped.
    pub fn select_columns<'a>(&self, keep: impl IntoIterator<Item = &'a str>) -> Dataset {
        let indices: Vec<(usize, &'a str)> = keep
            .into_iter()
            .filter_map(|name| self.column_index(name).map(|i| (i, name)))
            .collect();
        let mut out = Dataset::new(indices.iter().map(|(_, name)| *name));
        for cells in &self.rows {
            out.rows
                .push(indices.iter().map(|(i, _)| cells[*i].clone()).collect());
        }
        out
    }

    /// Copy of the dataset with only the rows `keep` accepts.
    pub fn filter_rows(&self, mut keep: impl FnMut(&RowRef<'_>) -> bool) -> Dataset {
        let mut out = Dataset::new(self.columns.iter().cloned());
        for row in self.rows() {
            if keep(&row) {
                out.rows.push(row.cells.to_vec());
            }
        }
        out
    }
}

/// Borrowed view of one dataset row.
#[derive(Debug, Clone, Copy)]
pub struct RowRef<'a> {
    columns: &'a [String],
    cells: &'a [CellValue],
}

impl<'a> RowRef<'a> {
    pub fn cells(&self) -> &'a [CellValue] {
        self.cells
    }

    pub fn columns(&self) -> &'a [String] {
        self.columns
    }
}

impl Row for RowRef<'_> {
    fn get(&self, column: &str) -> Option<&CellValue> {
        self.columns
            .iter()
            .position(|c| c == column)
            .and_then(|i| self.cells.get(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_string_follows_export_printing() {
        assert_eq!(CellValue::Empty.to_raw_string(), "nan");
        assert_eq!(CellValue::Float(f64::NAN).to_raw_string(), "nan");
        assert_eq!(CellValue::Float(123.0).to_raw_string(), "123.0");
        assert_eq!(CellValue::Float(12.5).to_raw_string(), "12.5");
        assert_eq!(CellValue::Int(45).to_raw_string(), "45");
        assert_eq!(CellValue::Bool(true).to_raw_string(), "True");
        let dt = NaiveDate::from_ymd_opt(2025, 7, 1)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap();
        assert_eq!(CellValue::DateTime(dt).to_raw_string(), "2025-07-01 09:30:00");
    }

    #[test]
    fn text_constructor_maps_blank_to_empty() {
        assert_eq!(CellValue::text(""), CellValue::Empty);
        assert_eq!(CellValue::text(" "), CellValue::Text(" ".into()));
    }

    #[test]
    fn push_row_pads_and_truncates() {
        let mut ds = Dataset::new(["a", "b"]);
        ds.push_row(vec!["1".into()]);
        ds.push_row(vec!["1".into(), "2".into(), "3".into()]);
        assert_eq!(ds.row(0).unwrap().cells(), &[CellValue::text("1"), CellValue::Empty]);
        assert_eq!(ds.row(1).unwrap().cells().len(), 2);
    }

    #[test]
    fn row_lookup_by_name() {
        let mut ds = Dataset::new(["Record ID", "Caller"]);
        ds.push_row(vec![CellValue::Int(7), CellValue::Empty]);
        let row = ds.row(0).unwrap();
        assert_eq!(row.get("Record ID"), Some(&CellValue::Int(7)));
        assert_eq!(row.get("Caller"), Some(&CellValue::Empty));
        assert!(row.has_column("Caller"));
        assert!(!row.has_column("Surname"));
    }

    #[test]
    fn select_and_missing_columns() {
        let mut ds = Dataset::new(["x", "Caller", "Record ID"]);
        ds.push_row(vec!["drop".into(), "Ward 3".into(), "9".into()]);
        let selected = ds.select_columns(["Record ID", "Caller", "Surname"]);
        assert_eq!(selected.columns(), &["Record ID".to_string(), "Caller".to_string()]);
        assert_eq!(selected.row(0).unwrap().cells()[0], CellValue::text("9"));
        assert_eq!(ds.missing_columns(["Caller", "Surname"]), vec!["Surname".to_string()]);
    }

    #[test]
    fn filter_rows_keeps_matching() {
        let mut ds = Dataset::new(["code"]);
        ds.push_row(vec!["A".into()]);
        ds.push_row(vec!["B".into()]);
        let only_b = ds.filter_rows(|r| r.get("code") == Some(&CellValue::text("B")));
        assert_eq!(only_b.len(), 1);
    }
}
