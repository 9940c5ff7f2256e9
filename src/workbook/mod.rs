//! Spreadsheet workbooks (xlsx, xls, ods) as datasets.
//!
//! Each worksheet becomes one [`Dataset`] with its first row as the header.
//! Cells keep their spreadsheet type: numbers stay floats, so identifiers
//! stored as numbers print as `123.0` and are cleaned by the normalizer.

use std::path::Path;

use calamine::{Data, DataType, Range, Reader, open_workbook_auto};
use tracing::debug;

use crate::core::{CellValue, Dataset, InvoiceError};

/// One worksheet of a workbook.
#[derive(Debug, Clone, PartialEq)]
pub struct Worksheet {
    pub name: String,
    pub dataset: Dataset,
}

/// Read every worksheet of the workbook at `path`, in workbook order.
pub fn read_workbook(path: &Path) -> Result<Vec<Worksheet>, InvoiceError> {
    let mut workbook = open_workbook_auto(path)
        .map_err(|e| InvoiceError::Workbook(format!("cannot open {}: {e}", path.display())))?;
    let names = workbook.sheet_names().to_vec();
    debug!(path = %path.display(), sheets = ?names, "reading workbook");

    names
        .into_iter()
        .map(|name| {
            let range = workbook
                .worksheet_range(&name)
                .map_err(|e| InvoiceError::Workbook(format!("sheet '{name}': {e}")))?;
            Ok(Worksheet {
                dataset: range_to_dataset(&range),
                name,
            })
        })
        .collect()
}

/// CSV file name for one sheet of workbook `base`: `{base}_{sheet}.csv`,
/// keeping only alphanumerics, spaces, `-` and `_` of the sheet name.
pub fn sheet_file_name(base: &str, sheet: &str) -> String {
    let safe: String = sheet
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, ' ' | '-' | '_'))
        .collect();
    format!("{base}_{}.csv", safe.trim())
}

fn range_to_dataset(range: &Range<Data>) -> Dataset {
    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        return Dataset::default();
    };
    let columns = header.iter().enumerate().map(|(i, cell)| match cell {
        Data::Empty => format!("Unnamed: {i}"),
        other => other.to_string(),
    });
    let mut dataset = Dataset::new(columns);
    for row in rows {
        dataset.push_row(row.iter().map(cell_value).collect());
    }
    dataset
}

fn cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Empty,
        Data::String(s) => CellValue::text(s.as_str()),
        Data::Int(i) => CellValue::Int(*i),
        Data::Float(f) => CellValue::Float(*f),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(_) | Data::DateTimeIso(_) => cell
            .as_datetime()
            .map_or_else(|| CellValue::text(cell.to_string()), CellValue::DateTime),
        other => CellValue::text(other.to_string()),
    }
}
