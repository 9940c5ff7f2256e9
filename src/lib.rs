//! # pts-invoice
//!
//! Invoice data handling for a patient-transport service: spreadsheet
//! exports of journey bookings become a canonical invoice record, the record
//! is edited and rendered, and a rendered invoice can be parsed back into the
//! same record for another editing pass.
//!
//! The canonical record ([`InvoiceRecord`]) is the contract shared by both
//! directions. Every value in it is a string; amounts are never computed here.
//!
//! ## Quick Start
//!
//! ```rust
//! use pts_invoice::core::*;
//!
//! let mut dataset = Dataset::new(["Start Date", "Record ID", "Forename", "Surname"]);
//! dataset.push_row(vec![
//!     CellValue::text("01/07/2025"),
//!     CellValue::Float(4512.0),
//!     CellValue::text("Ada"),
//!     CellValue::text("Lovelace"),
//! ]);
//!
//! let record = from_dataset(&dataset).unwrap();
//! assert_eq!(record.patient.name, "Ada Lovelace");
//! assert_eq!(record.invoice.items[0].our_ref, "4512");
//! assert_eq!(record.financial.total_label, "TOTAL DUE");
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` (default) | Record model, normalizer, column resolver, forward transform, JSON-safe serializer |
//! | `html` | Rendered-invoice parser (reverse transform), layout contract, reference renderer |
//! | `tabular` | CSV ingestion, split by budget code, merge |
//! | `workbook` | Excel/ODS workbook ingestion |
//! | `all` | Everything |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "html")]
pub mod html;

#[cfg(feature = "tabular")]
pub mod tabular;

#[cfg(feature = "workbook")]
pub mod workbook;

// Re-export core types at crate root for convenience
#[cfg(feature = "core")]
pub use crate::core::*;
