//! Dataset → canonical invoice record.

use tracing::debug;

use super::columns;
use super::dataset::{Dataset, Row};
use super::error::InvoiceError;
use super::normalize::{is_blank_or_nan, normalize};
use super::resolve::{raw_text, resolve};
use super::types::{InvoiceRecord, LineItem, Patient};

/// Build a canonical invoice record from a booking export.
///
/// The patient block comes from the first row only. Every row becomes a line
/// item in source order, except rows that have neither a start date nor a
/// record ID (blank trailer rows, subtotal rows). Header fields and amounts
/// are left blank for the editing step; labels, bank, and flags get their
/// defaults.
///
/// Columns missing from the dataset read as blank for every row.
pub fn from_dataset(dataset: &Dataset) -> Result<InvoiceRecord, InvoiceError> {
    let first = dataset.row(0).ok_or(InvoiceError::EmptyInput)?;
    debug!(
        rows = dataset.len(),
        columns = ?dataset.columns(),
        "building invoice record from dataset"
    );

    let mut record = InvoiceRecord::new(patient_from_row(&first));

    let mut skipped = 0usize;
    for row in dataset.rows() {
        match line_item_from_row(&row) {
            Some(item) => record.invoice.items.push(item),
            None => skipped += 1,
        }
    }
    if skipped > 0 {
        debug!(skipped, "dropped rows without start date or record id");
    }

    Ok(record)
}

/// Patient block from one row: `Forename Surname`, `Road, Town`, postcode.
pub fn patient_from_row<R: Row + ?Sized>(row: &R) -> Patient {
    let name = format!(
        "{} {}",
        raw_text(row, columns::FORENAME),
        raw_text(row, columns::SURNAME)
    );
    let road = raw_text(row, columns::PATIENT_ROAD);
    let town = raw_text(row, columns::PATIENT_TOWN);
    let address = format!("{}, {}", road.trim(), town.trim());

    Patient {
        name: name.trim().to_string(),
        address: address.trim_matches([',', ' ']).to_string(),
        postcode: raw_text(row, columns::PATIENT_POSTCODE).trim().to_string(),
    }
}

/// Line item for one row, or `None` when the row has neither a usable start
/// date nor a record ID.
///
/// `date` and the free-text journey columns keep their raw text; reference
/// columns go through [`normalize`]. Amount columns start blank.
pub fn line_item_from_row<R: Row + ?Sized>(row: &R) -> Option<LineItem> {
    let date = raw_text(row, columns::START_DATE).trim().to_string();
    let our_ref = normalize(resolve(row, &[columns::RECORD_ID]));

    let date_missing = is_blank_or_nan(&date)
        || row
            .get(columns::START_DATE)
            .is_some_and(|cell| cell.is_missing());
    if date_missing && our_ref.is_empty() {
        return None;
    }

    Some(LineItem {
        date,
        our_ref,
        client_ref: normalize(resolve(row, &[columns::PAS_NUMBER])),
        nhs_number: normalize(resolve(row, columns::PASSENGER_UPC)),
        contract_hospital: raw_text(row, columns::CONTRACT_HOSPITAL),
        booked_by: normalize(resolve(row, &[columns::CALLER])),
        from_location: raw_text(row, columns::FROM_POSTCODE),
        to_location: raw_text(row, columns::TO_POSTCODE),
        status: raw_text(row, columns::JOURNEY_STATUS),
        directions: raw_text(row, columns::DIRECTION),
        mob: normalize(resolve(row, &[columns::MOBILITY])),
        wait_pounds: String::new(),
        wait_notes: raw_text(row, columns::WAITING_REASON),
        miles: raw_text(row, columns::ACTUAL_MILEAGE),
        charged: String::new(),
        miles_pounds: String::new(),
        job_pounds: String::new(),
        total: String::new(),
    })
}
