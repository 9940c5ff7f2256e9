use thiserror::Error;

/// Errors that can occur while building, parsing, or exporting invoice data.
///
/// Only whole-input failures surface here. Field-level problems (a missing
/// column, an odd cell, a drifted document layout) degrade to empty strings
/// instead of erroring.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum InvoiceError {
    /// The dataset handed to the forward transform has no rows.
    #[error("dataset has no rows")]
    EmptyInput,

    /// The input could not be read as structured markup at all.
    #[error("malformed document: {0}")]
    MalformedDocument(String),

    /// A column required by the operation is absent from the dataset.
    #[error("missing column: {0}")]
    MissingColumn(String),

    /// CSV reading or writing error.
    #[error("tabular data error: {0}")]
    Tabular(String),

    /// Spreadsheet workbook reading error.
    #[error("workbook error: {0}")]
    Workbook(String),

    /// Rendering the record to markup failed.
    #[error("render error: {0}")]
    Render(String),

    /// An edited record could not be decoded from or encoded to JSON.
    #[error("JSON error: {0}")]
    Json(String),
}
