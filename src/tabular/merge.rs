use crate::core::{CellValue, Dataset, InvoiceError};

/// Concatenate datasets.
///
/// The result has the union of all columns in first-seen order; cells for
/// columns a source lacks are blank. Fails with [`InvoiceError::EmptyInput`]
/// when there is nothing to merge.
pub fn merge_datasets(datasets: &[Dataset]) -> Result<Dataset, InvoiceError> {
    if datasets.is_empty() {
        return Err(InvoiceError::EmptyInput);
    }

    let mut columns: Vec<&str> = Vec::new();
    for ds in datasets {
        for column in ds.columns() {
            if !columns.contains(&column.as_str()) {
                columns.push(column);
            }
        }
    }

    let mut merged = Dataset::new(columns.iter().copied());
    for ds in datasets {
        let mapping: Vec<Option<usize>> = columns.iter().map(|c| ds.column_index(c)).collect();
        for row in ds.rows() {
            let cells = mapping
                .iter()
                .map(|idx| idx.map_or(CellValue::Empty, |i| row.cells()[i].clone()))
                .collect();
            merged.push_row(cells);
        }
    }
    Ok(merged)
}
