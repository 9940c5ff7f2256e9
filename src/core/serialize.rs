//! JSON-safe export of invoice records.
//!
//! A record handed across a text boundary (web response, edit form) may have
//! been extended by its caller with values straight from the dataset: cells,
//! whole rows or tables, timestamps, floats that are NaN. [`Loose`] holds such
//! a tree and [`to_json_safe`] turns it into plain JSON without failing.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::{Map, Number, Value};
use std::fmt;
use std::sync::Arc;

use super::dataset::{CellValue, Dataset};
use super::types::{BankDetails, Financial, InvoiceHeader, InvoiceRecord, LineItem, Patient};

/// Loosely typed value tree.
#[derive(Clone)]
pub enum Loose {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    Timestamp(DateTime<Utc>),
    /// Array-like column of cells.
    Cells(Vec<CellValue>),
    /// Table-like value; exported as a list of rows.
    Table(Dataset),
    List(Vec<Loose>),
    /// Ordered mapping.
    Map(Vec<(String, Loose)>),
    /// Anything else; exported through its `Display` form.
    Other(Arc<dyn fmt::Display + Send + Sync>),
}

impl fmt::Debug for Loose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("Null"),
            Self::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            Self::Int(i) => f.debug_tuple("Int").field(i).finish(),
            Self::Float(x) => f.debug_tuple("Float").field(x).finish(),
            Self::Text(s) => f.debug_tuple("Text").field(s).finish(),
            Self::Date(d) => f.debug_tuple("Date").field(d).finish(),
            Self::DateTime(dt) => f.debug_tuple("DateTime").field(dt).finish(),
            Self::Timestamp(ts) => f.debug_tuple("Timestamp").field(ts).finish(),
            Self::Cells(cells) => f.debug_tuple("Cells").field(cells).finish(),
            Self::Table(ds) => f.debug_tuple("Table").field(ds).finish(),
            Self::List(items) => f.debug_tuple("List").field(items).finish(),
            Self::Map(entries) => f.debug_tuple("Map").field(entries).finish(),
            Self::Other(v) => f.debug_tuple("Other").field(&v.to_string()).finish(),
        }
    }
}

impl Loose {
    /// Wrap an arbitrary displayable value.
    pub fn other(value: impl fmt::Display + Send + Sync + 'static) -> Self {
        Self::Other(Arc::new(value))
    }

    /// Insert or replace `key` on a map value. No-op for other variants.
    pub fn insert(&mut self, key: impl Into<String>, value: Loose) {
        if let Self::Map(entries) = self {
            let key = key.into();
            match entries.iter_mut().find(|(k, _)| *k == key) {
                Some((_, slot)) => *slot = value,
                None => entries.push((key, value)),
            }
        }
    }

    /// Mutable access to the value under `key` on a map value.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Loose> {
        match self {
            Self::Map(entries) => entries.iter_mut().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }
}

impl From<&CellValue> for Loose {
    fn from(cell: &CellValue) -> Self {
        match cell {
            CellValue::Empty => Self::Null,
            CellValue::Text(s) => Self::Text(s.clone()),
            CellValue::Int(i) => Self::Int(*i),
            CellValue::Float(x) => Self::Float(*x),
            CellValue::Bool(b) => Self::Bool(*b),
            CellValue::Date(d) => Self::Date(*d),
            CellValue::DateTime(dt) => Self::DateTime(*dt),
        }
    }
}

impl From<&str> for Loose {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Loose {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

fn text_map<'a>(pairs: impl IntoIterator<Item = (&'static str, &'a str)>) -> Vec<(String, Loose)> {
    pairs
        .into_iter()
        .map(|(k, v)| (k.to_string(), Loose::from(v)))
        .collect()
}

impl From<&Patient> for Loose {
    fn from(p: &Patient) -> Self {
        Self::Map(text_map([
            ("name", p.name.as_str()),
            ("address", p.address.as_str()),
            ("postcode", p.postcode.as_str()),
        ]))
    }
}

impl From<&LineItem> for Loose {
    fn from(item: &LineItem) -> Self {
        Self::Map(text_map([
            ("date", item.date.as_str()),
            ("our_ref", item.our_ref.as_str()),
            ("client_ref", item.client_ref.as_str()),
            ("nhs_number", item.nhs_number.as_str()),
            ("contract_hospital", item.contract_hospital.as_str()),
            ("booked_by", item.booked_by.as_str()),
            ("from_location", item.from_location.as_str()),
            ("to_location", item.to_location.as_str()),
            ("status", item.status.as_str()),
            ("directions", item.directions.as_str()),
            ("mob", item.mob.as_str()),
            ("wait_pounds", item.wait_pounds.as_str()),
            ("wait_notes", item.wait_notes.as_str()),
            ("miles", item.miles.as_str()),
            ("charged", item.charged.as_str()),
            ("miles_pounds", item.miles_pounds.as_str()),
            ("job_pounds", item.job_pounds.as_str()),
            ("total", item.total.as_str()),
        ]))
    }
}

impl From<&InvoiceHeader> for Loose {
    fn from(h: &InvoiceHeader) -> Self {
        let mut entries = text_map([
            ("number", h.number.as_str()),
            ("date", h.date.as_str()),
            ("account_ref", h.account_ref.as_str()),
            ("ref", h.reference.as_str()),
            ("po_number", h.po_number.as_str()),
            ("payment_terms", h.payment_terms.as_str()),
            ("period", h.period.as_str()),
        ]);
        entries.push((
            "items".into(),
            Self::List(h.items.iter().map(Loose::from).collect()),
        ));
        Self::Map(entries)
    }
}

impl From<&Financial> for Loose {
    fn from(f: &Financial) -> Self {
        Self::Map(text_map([
            ("net", f.net.as_str()),
            ("net_label", f.net_label.as_str()),
            ("discount", f.discount.as_str()),
            ("discount_label", f.discount_label.as_str()),
            ("subtotal", f.subtotal.as_str()),
            ("subtotal_label", f.subtotal_label.as_str()),
            ("vat_amount", f.vat_amount.as_str()),
            ("vat_label", f.vat_label.as_str()),
            ("vat_percentage", f.vat_percentage.as_str()),
            ("total", f.total.as_str()),
            ("total_label", f.total_label.as_str()),
        ]))
    }
}

impl From<&BankDetails> for Loose {
    fn from(b: &BankDetails) -> Self {
        Self::Map(text_map([
            ("name", b.name.as_str()),
            ("account_name", b.account_name.as_str()),
            ("account_number", b.account_number.as_str()),
            ("sort_code", b.sort_code.as_str()),
        ]))
    }
}

impl From<&InvoiceRecord> for Loose {
    fn from(r: &InvoiceRecord) -> Self {
        Self::Map(vec![
            ("patient".into(), Loose::from(&r.patient)),
            ("invoice".into(), Loose::from(&r.invoice)),
            ("financial".into(), Loose::from(&r.financial)),
            ("bank".into(), Loose::from(&r.bank)),
            ("paid".into(), Loose::Bool(r.paid)),
            ("style".into(), Loose::from(r.style.as_str())),
            ("item_name".into(), Loose::from(r.item_name.as_str())),
        ])
    }
}

/// Convert a loose value tree into plain JSON.
///
/// Cells and tables become arrays, dates and timestamps become ISO-8601
/// strings, NaN and infinite floats become `null`, and [`Loose::Other`] values
/// become their display string. Never fails.
pub fn to_json_safe(value: &Loose) -> Value {
    match value {
        Loose::Null => Value::Null,
        Loose::Bool(b) => Value::Bool(*b),
        Loose::Int(i) => Value::Number((*i).into()),
        Loose::Float(x) => float_value(*x),
        Loose::Text(s) => Value::String(s.clone()),
        Loose::Date(d) => Value::String(d.format("%Y-%m-%d").to_string()),
        Loose::DateTime(dt) => Value::String(dt.format("%Y-%m-%dT%H:%M:%S%.f").to_string()),
        Loose::Timestamp(ts) => Value::String(ts.to_rfc3339()),
        Loose::Cells(cells) => Value::Array(cells.iter().map(cell_value).collect()),
        Loose::Table(ds) => Value::Array(
            ds.rows()
                .map(|row| Value::Array(row.cells().iter().map(cell_value).collect()))
                .collect(),
        ),
        Loose::List(items) => Value::Array(items.iter().map(to_json_safe).collect()),
        Loose::Map(entries) => {
            let mut map = Map::with_capacity(entries.len());
            for (k, v) in entries {
                map.insert(k.clone(), to_json_safe(v));
            }
            Value::Object(map)
        }
        Loose::Other(v) => Value::String(v.to_string()),
    }
}

fn cell_value(cell: &CellValue) -> Value {
    to_json_safe(&Loose::from(cell))
}

fn float_value(x: f64) -> Value {
    Number::from_f64(x).map_or(Value::Null, Value::Number)
}

impl InvoiceRecord {
    /// JSON-safe form of the record, the wire contract for text boundaries.
    pub fn to_json_safe(&self) -> Value {
        to_json_safe(&Loose::from(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_finite_floats_become_null() {
        assert_eq!(to_json_safe(&Loose::Float(f64::NAN)), Value::Null);
        assert_eq!(to_json_safe(&Loose::Float(f64::INFINITY)), Value::Null);
        assert_eq!(to_json_safe(&Loose::Float(f64::NEG_INFINITY)), Value::Null);
        assert_eq!(to_json_safe(&Loose::Float(2.5)), serde_json::json!(2.5));
    }

    #[test]
    fn temporal_values_become_iso_strings() {
        let d = NaiveDate::from_ymd_opt(2025, 7, 1).unwrap();
        let dt = d.and_hms_opt(14, 5, 0).unwrap();
        assert_eq!(to_json_safe(&Loose::Date(d)), serde_json::json!("2025-07-01"));
        assert_eq!(
            to_json_safe(&Loose::DateTime(dt)),
            serde_json::json!("2025-07-01T14:05:00")
        );
        assert_eq!(
            to_json_safe(&Loose::Timestamp(dt.and_utc())),
            serde_json::json!("2025-07-01T14:05:00+00:00")
        );
    }

    #[test]
    fn tables_and_cells_become_arrays() {
        let mut ds = Dataset::new(["a", "b"]);
        ds.push_row(vec![CellValue::Int(1), CellValue::Float(f64::NAN)]);
        ds.push_row(vec![CellValue::text("x"), CellValue::Empty]);
        assert_eq!(
            to_json_safe(&Loose::Table(ds)),
            serde_json::json!([[1, null], ["x", null]])
        );
        assert_eq!(
            to_json_safe(&Loose::Cells(vec![CellValue::Bool(true), CellValue::Float(3.0)])),
            serde_json::json!([true, 3.0])
        );
    }

    #[test]
    fn other_values_use_display() {
        let v = Loose::other(std::net::Ipv4Addr::LOCALHOST);
        assert_eq!(to_json_safe(&v), serde_json::json!("127.0.0.1"));
    }

    #[test]
    fn record_export_matches_serde_shape() {
        let mut record = InvoiceRecord::default();
        record.invoice.items.push(LineItem {
            date: "01/07/2025".into(),
            our_ref: "1".into(),
            ..Default::default()
        });
        assert_eq!(record.to_json_safe(), serde_json::to_value(&record).unwrap());
    }

    #[test]
    fn caller_extensions_are_made_safe() {
        let record = InvoiceRecord::default();
        let mut loose = Loose::from(&record);
        loose.insert("raw_mileage", Loose::Float(f64::NAN));
        if let Some(fin) = loose.get_mut("financial") {
            fin.insert("net", Loose::Float(12.5));
        }
        let json = to_json_safe(&loose);
        assert_eq!(json["raw_mileage"], Value::Null);
        assert_eq!(json["financial"]["net"], serde_json::json!(12.5));
    }
}
