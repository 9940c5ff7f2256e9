use std::collections::HashMap;

use tracing::debug;

use crate::core::{CellValue, Dataset, InvoiceError, columns};

/// File name for rows without a budget code.
pub const NO_BUDGET_CODE_FILE: &str = "No_BudgetCode.csv";

/// Budget codes invoiced together under one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CombinedGroup {
    pub name: String,
    pub codes: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct SplitOptions {
    pub combined_groups: Vec<CombinedGroup>,
}

impl Default for SplitOptions {
    fn default() -> Self {
        Self {
            combined_groups: vec![CombinedGroup {
                name: "BARTS_HDU".into(),
                codes: vec!["BARTS BHOC HDU".into(), "BARTS HDU".into()],
            }],
        }
    }
}

/// One output file of a split.
#[derive(Debug, Clone, PartialEq)]
pub struct SplitFile {
    pub file_name: String,
    pub dataset: Dataset,
}

/// Split an export into one dataset per budget code.
///
/// Files appear in the order their first row appears. Codes belonging to a
/// combined group share the group's file, blank codes go to
/// [`NO_BUDGET_CODE_FILE`], and codes whose sanitized names collide share a
/// file. Every file keeps all columns.
pub fn split_by_budget_code(
    dataset: &Dataset,
    options: &SplitOptions,
) -> Result<Vec<SplitFile>, InvoiceError> {
    let idx = dataset
        .column_index(columns::BUDGET_CODE)
        .ok_or_else(|| InvoiceError::MissingColumn(columns::BUDGET_CODE.into()))?;

    let mut files: Vec<SplitFile> = Vec::new();
    let mut by_name: HashMap<String, usize> = HashMap::new();
    for row in dataset.rows() {
        let file_name = file_name_for(&row.cells()[idx], options);
        let pos = *by_name.entry(file_name.clone()).or_insert_with(|| {
            files.push(SplitFile {
                file_name,
                dataset: Dataset::new(dataset.columns().iter().cloned()),
            });
            files.len() - 1
        });
        files[pos].dataset.push_row(row.cells().to_vec());
    }

    debug!(files = files.len(), rows = dataset.len(), "split export by budget code");
    Ok(files)
}

fn file_name_for(cell: &CellValue, options: &SplitOptions) -> String {
    if cell.is_missing() {
        return NO_BUDGET_CODE_FILE.into();
    }
    let code = cell.to_raw_string();
    if code.trim().is_empty() {
        return NO_BUDGET_CODE_FILE.into();
    }
    let stem = options
        .combined_groups
        .iter()
        .find(|group| group.codes.iter().any(|c| *c == code))
        .map_or(code.as_str(), |group| group.name.as_str());
    format!("{}.csv", sanitize_file_name(stem))
}

/// Make a budget code safe as a file name.
///
/// Characters invalid on common filesystems become `_`, leading and
/// trailing spaces and dots are dropped, and runs of whitespace or
/// underscores collapse to a single `_`.
pub fn sanitize_file_name(name: &str) -> String {
    let replaced: String = name
        .chars()
        .map(|c| if "<>:\"/\\|?*".contains(c) { '_' } else { c })
        .collect();
    let trimmed = replaced.trim_matches([' ', '.']);

    let mut out = String::with_capacity(trimmed.len());
    let mut in_run = false;
    for c in trimmed.chars() {
        if c.is_whitespace() || c == '_' {
            if !in_run {
                out.push('_');
            }
            in_run = true;
        } else {
            out.push(c);
            in_run = false;
        }
    }
    out
}
