use std::path::Path;

use super::csv_error;
use crate::core::{Dataset, InvoiceError};

/// Write a dataset as comma-separated text with a header row. Blank and NaN
/// cells are written empty.
pub fn to_csv_string(dataset: &Dataset) -> Result<String, InvoiceError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(dataset.columns()).map_err(csv_error)?;
    for row in dataset.rows() {
        writer
            .write_record(row.cells().iter().map(|cell| {
                if cell.is_missing() {
                    String::new()
                } else {
                    cell.to_raw_string()
                }
            }))
            .map_err(csv_error)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| InvoiceError::Tabular(format!("CSV flush error: {e}")))?;
    String::from_utf8(bytes).map_err(|e| InvoiceError::Tabular(format!("CSV UTF-8 error: {e}")))
}

/// Write a dataset to `path` as CSV.
pub fn write_csv_path(path: &Path, dataset: &Dataset) -> Result<(), InvoiceError> {
    let text = to_csv_string(dataset)?;
    std::fs::write(path, text)
        .map_err(|e| InvoiceError::Tabular(format!("cannot write {}: {e}", path.display())))
}
