#![cfg(feature = "html")]

use pts_invoice::core::*;
use pts_invoice::html::{LayoutRenderer, RenderSink, from_html, to_html};
use serde_json::Value;

fn export() -> Dataset {
    let mut ds = Dataset::new([
        columns::START_DATE,
        columns::RECORD_ID,
        columns::PAS_NUMBER,
        "PassengerUPC",
        columns::CONTRACT_HOSPITAL,
        columns::CALLER,
        columns::FROM_POSTCODE,
        columns::TO_POSTCODE,
        columns::DIRECTION,
        columns::JOURNEY_STATUS,
        columns::ACTUAL_MILEAGE,
        columns::MOBILITY,
        columns::WAITING_REASON,
        columns::FORENAME,
        columns::SURNAME,
        columns::PATIENT_ROAD,
        columns::PATIENT_TOWN,
        columns::PATIENT_POSTCODE,
    ]);
    ds.push_row(vec![
        "2025-07-01".into(),
        CellValue::Float(881234.0),
        "PAS-1".into(),
        CellValue::Float(4857773456.0),
        "Royal Devon".into(),
        "Ward 3".into(),
        "EX1 1AA".into(),
        "EX2 5DW".into(),
        "Outbound".into(),
        "Completed".into(),
        CellValue::Float(12.0),
        "WC".into(),
        CellValue::Empty,
        "Ada".into(),
        "Lovelace".into(),
        "2 High St".into(),
        "Exeter".into(),
        "EX4 4QJ".into(),
    ]);
    ds.push_row(vec![CellValue::Empty; 18]);
    let mut third = vec![CellValue::Empty; 18];
    third[0] = "02/07/2025".into();
    third[1] = "881240".into();
    third[5] = "A&E".into();
    ds.push_row(third);
    ds
}

/// Replace every leaf with null, keeping keys and array lengths.
fn shape(value: &Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), shape(v)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.iter().map(shape).collect()),
        _ => Value::Null,
    }
}

fn summary(record: &InvoiceRecord) -> String {
    let mut lines = vec![
        format!(
            "patient: {} | {} | {}",
            record.patient.name, record.patient.address, record.patient.postcode
        ),
        format!("invoice: {} | {}", record.invoice.number, record.invoice.date),
    ];
    for item in &record.invoice.items {
        lines.push(format!(
            "item: {} | {} | {} | {} | {} | {} | {} | {}",
            item.date,
            item.our_ref,
            item.client_ref,
            item.nhs_number,
            item.contract_hospital,
            item.booked_by,
            item.from_location,
            item.to_location
        ));
        lines.push(format!(
            "trip: {} | {} | {} | {} | {} | total={}",
            item.status, item.directions, item.mob, item.wait_notes, item.miles, item.total
        ));
    }
    let fin = &record.financial;
    lines.push(format!(
        "totals: {}={} {}={} {}={}",
        fin.net_label, fin.net, fin.vat_label, fin.vat_amount, fin.total_label, fin.total
    ));
    lines.join("\n")
}

#[test]
fn forward_then_render_then_parse_keeps_shape() {
    let forward = from_dataset(&export()).unwrap();
    let parsed = from_html(&to_html(&forward).unwrap()).unwrap();
    assert_eq!(shape(&forward.to_json_safe()), shape(&parsed.to_json_safe()));
    assert_eq!(parsed.invoice.items.len(), 2);
}

#[test]
fn edited_record_survives_a_render_cycle() {
    let mut record = from_dataset(&export()).unwrap();
    record.invoice.number = "INV-1001".into();
    record.invoice.date = "2025-07-31".into();
    record.invoice.items[0].total = "1234.5".into();
    record.financial.net = "1234.50".into();
    record.financial.vat_amount = "246.90".into();
    record.financial.total = "1481.40".into();

    let parsed = from_html(&to_html(&record).unwrap()).unwrap();
    insta::assert_snapshot!(summary(&parsed), @r"
    patient: Ada Lovelace | 2 High St, Exeter | EX4 4QJ
    invoice: INV-1001 | 31st July 2025
    item: 01/07/2025 | 881234 | PAS-1 | 4857773456 | Royal Devon | Ward 3 | EX1 1AA | EX2 5DW
    trip: Completed | Outbound | WC | nan | 12.0 | total=1,234.50
    item: 02/07/2025 | 881240 |  |  | nan | A&E | nan | nan
    trip: nan | nan |  | nan | nan | total=
    totals: net=1,234.50 VAT 20%=246.90 TOTAL DUE=1,481.40
    ");
}

#[test]
fn flags_are_lost_in_markup() {
    let mut record = from_dataset(&export()).unwrap();
    record.paid = true;
    record.item_name = "Wheelchair transfers".into();
    let html = LayoutRenderer::default()
        .render(&record, Style::Style2)
        .unwrap();
    assert!(html.contains("paid-stamp"));

    let parsed = from_html(&html).unwrap();
    assert!(!parsed.paid);
    assert_eq!(parsed.style, Style::Style1);
    assert_eq!(parsed.item_name, "");
}

#[test]
fn parsing_a_parsed_record_again_is_stable() {
    let forward = from_dataset(&export()).unwrap();
    let once = from_html(&to_html(&forward).unwrap()).unwrap();
    let twice = from_html(&to_html(&once).unwrap()).unwrap();
    assert_eq!(once, twice);
}
