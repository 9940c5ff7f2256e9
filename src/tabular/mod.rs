//! CSV booking exports: ingestion, splitting by budget code, and merging.
//!
//! Raw exports carry far more columns than an invoice needs and mix every
//! contract's bookings in one file. Ingestion keeps the invoice columns and
//! reports the ones that are missing; splitting produces one file per budget
//! code; merging concatenates exports whose column sets differ.

mod merge;
mod read;
mod split;
mod write;

pub use merge::merge_datasets;
pub use read::{Ingested, read_csv, read_csv_all, read_csv_path};
pub use split::{CombinedGroup, SplitFile, SplitOptions, sanitize_file_name, split_by_budget_code};
pub use write::{to_csv_string, write_csv_path};

use crate::core::{InvoiceError, columns};

/// How a raw export is read.
#[derive(Debug, Clone)]
pub struct IngestOptions {
    /// Columns kept, in output order. Names absent from the export are
    /// reported, not fatal.
    pub keep_columns: Vec<String>,
    /// Field delimiter byte.
    pub delimiter: u8,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            keep_columns: columns::INVOICE_COLUMNS
                .iter()
                .map(|c| c.to_string())
                .collect(),
            delimiter: b',',
        }
    }
}

fn csv_error(e: csv::Error) -> InvoiceError {
    InvoiceError::Tabular(format!("CSV error: {e}"))
}
