use std::path::Path;

use tracing::{debug, warn};

use super::{IngestOptions, csv_error};
use crate::core::{CellValue, Dataset, InvoiceError, columns};

/// A cleaned export and the expected columns it lacked.
#[derive(Debug, Clone, PartialEq)]
pub struct Ingested {
    pub dataset: Dataset,
    pub missing_columns: Vec<String>,
}

/// Read CSV text, keeping only `options.keep_columns`.
///
/// Missing columns are logged at warn level and returned; downstream they
/// read as blank for every row. The passenger UPC aliases count as one
/// column: it is missing only when no alias is present, and then reported
/// once under its first listed name.
pub fn read_csv(text: &str, options: &IngestOptions) -> Result<Ingested, InvoiceError> {
    let all = parse(text, options.delimiter)?;
    let missing_columns = missing_keep_columns(&all, &options.keep_columns);
    if !missing_columns.is_empty() {
        warn!(missing = ?missing_columns, "expected columns not found in export");
    }

    let dataset = all.select_columns(options.keep_columns.iter().map(String::as_str));
    debug!(
        rows = dataset.len(),
        source_columns = all.columns().len(),
        kept_columns = dataset.columns().len(),
        "ingested export"
    );
    Ok(Ingested {
        dataset,
        missing_columns,
    })
}

/// [`read_csv`] over a file. Bytes that are not UTF-8 are replaced.
pub fn read_csv_path(path: &Path, options: &IngestOptions) -> Result<Ingested, InvoiceError> {
    let bytes = std::fs::read(path)
        .map_err(|e| InvoiceError::Tabular(format!("cannot read {}: {e}", path.display())))?;
    read_csv(&String::from_utf8_lossy(&bytes), options)
}

/// Read CSV text keeping every column.
pub fn read_csv_all(text: &str) -> Result<Dataset, InvoiceError> {
    parse(text, b',')
}

fn parse(text: &str, delimiter: u8) -> Result<Dataset, InvoiceError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = reader.headers().map_err(csv_error)?.clone();
    let mut dataset = Dataset::new(headers.iter());
    for record in reader.records() {
        let record = record.map_err(csv_error)?;
        dataset.push_row(record.iter().map(CellValue::text).collect());
    }
    Ok(dataset)
}

fn missing_keep_columns(dataset: &Dataset, keep: &[String]) -> Vec<String> {
    let upc_present = columns::PASSENGER_UPC
        .iter()
        .any(|c| dataset.has_column(c));
    let mut upc_reported = false;
    let mut missing = Vec::new();
    for name in keep {
        if dataset.has_column(name) {
            continue;
        }
        if columns::PASSENGER_UPC.contains(&name.as_str()) {
            if upc_present || upc_reported {
                continue;
            }
            upc_reported = true;
        }
        missing.push(name.clone());
    }
    missing
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_listed_columns_in_list_order() {
        let options = IngestOptions {
            keep_columns: vec!["Record ID".into(), "Caller".into()],
            delimiter: b',',
        };
        let ingested = read_csv("Caller,Junk,Record ID\nWard 3,x,881234\n", &options).unwrap();
        assert_eq!(
            ingested.dataset.columns(),
            &["Record ID".to_string(), "Caller".to_string()]
        );
        let row = ingested.dataset.row(0).unwrap();
        assert_eq!(row.cells(), &[CellValue::text("881234"), CellValue::text("Ward 3")]);
        assert!(ingested.missing_columns.is_empty());
    }

    #[test]
    fn upc_aliases_are_one_column() {
        let with_alias = read_csv("Record ID,PassengerUPC\n1,2\n", &IngestOptions::default()).unwrap();
        assert!(!with_alias.missing_columns.iter().any(|c| c.contains("UPC")));
        assert!(with_alias.dataset.has_column("PassengerUPC"));

        let without = read_csv("Record ID\n1\n", &IngestOptions::default()).unwrap();
        let upc: Vec<_> = without
            .missing_columns
            .iter()
            .filter(|c| c.contains("UPC"))
            .collect();
        assert_eq!(upc, ["Passenger UPC"]);
    }

    #[test]
    fn blank_cells_and_bom() {
        let ds = read_csv_all("\u{feff}a,b\n1,\n,2\n").unwrap();
        assert_eq!(ds.columns(), &["a".to_string(), "b".to_string()]);
        assert_eq!(ds.row(0).unwrap().cells()[1], CellValue::Empty);
        assert_eq!(ds.row(1).unwrap().cells()[0], CellValue::Empty);
    }

    #[test]
    fn semicolon_delimiter() {
        let options = IngestOptions {
            keep_columns: vec!["a".into()],
            delimiter: b';',
        };
        let ingested = read_csv("a;b\n1;2\n", &options).unwrap();
        assert_eq!(ingested.dataset.row(0).unwrap().cells(), &[CellValue::text("1")]);
    }

    #[test]
    fn missing_file_is_tabular_error() {
        let err = read_csv_path(Path::new("/nonexistent/export.csv"), &IngestOptions::default())
            .unwrap_err();
        assert!(matches!(err, InvoiceError::Tabular(_)));
    }
}
