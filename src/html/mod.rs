//! Rendered invoices: reading them back into a record, and producing them.
//!
//! [`from_html`] recovers an [`InvoiceRecord`](crate::core::InvoiceRecord)
//! from a previously rendered invoice using only the layout conventions in
//! [`layout`]. [`LayoutRenderer`] produces that layout, so any record survives
//! a render/parse cycle with the same shape.
//!
//! ```rust
//! use pts_invoice::core::{InvoiceRecord, LineItem, Patient};
//! use pts_invoice::html::{from_html, to_html};
//!
//! let mut record = InvoiceRecord::new(Patient {
//!     name: "Ada Lovelace".into(),
//!     ..Patient::default()
//! });
//! record.invoice.items.push(LineItem {
//!     our_ref: "4512".into(),
//!     booked_by: "Ward 3".into(),
//!     ..LineItem::default()
//! });
//!
//! let parsed = from_html(&to_html(&record).unwrap()).unwrap();
//! assert_eq!(parsed.patient.name, "Ada Lovelace");
//! assert_eq!(parsed.invoice.items[0].booked_by, "Ward 3");
//! ```

mod dom;
pub mod filters;
pub mod layout;
mod parse;
mod render;
mod writer;

pub use dom::{Element, Markup};
pub use parse::{from_html, from_html_bytes};
pub use render::{LayoutRenderer, RenderSink, to_html};
