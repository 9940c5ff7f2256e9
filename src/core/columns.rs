//! Source column names of the booking-system export.
//!
//! Exports from different report versions spell some headers differently, so
//! fields that vary carry an ordered list of accepted names.

pub const START_DATE: &str = "Start Date";
pub const START_DATE_RANGE: &str = "Start Date range";
pub const RECORD_ID: &str = "Record ID";
pub const PAS_NUMBER: &str = "Pas Number";
pub const CONTRACT_HOSPITAL: &str = "Contract Hospital Text";
pub const CALLER: &str = "Caller";
pub const FROM_POSTCODE: &str = "From Postcode";
pub const TO_POSTCODE: &str = "To Postcode";
pub const DIRECTION: &str = "Direction Text";
pub const JOURNEY_STATUS: &str = "Jrny Status Text";
pub const ACTUAL_MILEAGE: &str = "Actual Mileage";
pub const MOBILITY: &str = "Mobility Abbreviation";
pub const WAITING_REASON: &str = "Waiting Time Reason";
pub const FORENAME: &str = "Forename";
pub const SURNAME: &str = "Surname";
pub const PATIENT_ROAD: &str = "Patient Road";
pub const PATIENT_TOWN: &str = "Patient Town";
pub const PATIENT_POSTCODE: &str = "Patient Postcode";

/// Column that assigns each booking to a contract budget.
pub const BUDGET_CODE: &str = "BudgetCodeText";

/// Accepted spellings of the passenger UPC (NHS number) header, in priority order.
pub const PASSENGER_UPC: &[&str] = &["Passenger UPC", "PassengerUPC", "Passenger UPC Code"];

/// Columns kept when a raw export is cleaned for invoicing.
pub const INVOICE_COLUMNS: &[&str] = &[
    START_DATE,
    RECORD_ID,
    PAS_NUMBER,
    "Passenger UPC",
    "PassengerUPC",
    "Passenger UPC Code",
    CONTRACT_HOSPITAL,
    CALLER,
    FROM_POSTCODE,
    TO_POSTCODE,
    DIRECTION,
    JOURNEY_STATUS,
    ACTUAL_MILEAGE,
    MOBILITY,
    WAITING_REASON,
    FORENAME,
    SURNAME,
    PATIENT_ROAD,
    PATIENT_TOWN,
    PATIENT_POSTCODE,
    START_DATE_RANGE,
];

/// Invoice columns that have a single accepted spelling.
pub fn single_name_columns() -> impl Iterator<Item = &'static str> {
    INVOICE_COLUMNS
        .iter()
        .copied()
        .filter(|c| !PASSENGER_UPC.contains(c))
}
