use criterion::{Criterion, black_box, criterion_group, criterion_main};

use pts_invoice::core::*;
use pts_invoice::html;

const COLUMNS: [&str; 18] = [
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
];

fn build_export(rows: usize) -> Dataset {
    let mut ds = Dataset::new(COLUMNS);
    for i in 0..rows {
        ds.push_row(vec![
            format!("{:02}/07/2025", i % 28 + 1).into(),
            CellValue::Float(880_000.0 + i as f64),
            format!("PAS-{i}").into(),
            CellValue::Float(4_857_773_456.0),
            "Royal Devon".into(),
            "Ward 3".into(),
            "EX1 1AA".into(),
            "EX2 5DW".into(),
            "Outbound".into(),
            "Completed".into(),
            CellValue::Float(12.0 + (i % 7) as f64),
            "WC".into(),
            CellValue::Empty,
            "Ada".into(),
            "Lovelace".into(),
            "2 High St".into(),
            "Exeter".into(),
            "EX4 4QJ".into(),
        ]);
    }
    ds
}

fn edited_record(rows: usize) -> InvoiceRecord {
    let mut record = from_dataset(&build_export(rows)).unwrap();
    record.invoice.number = "INV-BENCH".into();
    record.invoice.date = "2025-07-31".into();
    for item in &mut record.invoice.items {
        item.job_pounds = "30.00".into();
        item.total = "30.00".into();
    }
    record.financial.net = "30000.00".into();
    record.financial.total = "36000.00".into();
    record
}

fn bench_forward(c: &mut Criterion) {
    let small = build_export(10);
    let big = build_export(1000);
    c.bench_function("forward_10_rows", |b| {
        b.iter(|| from_dataset(black_box(&small)).unwrap())
    });
    c.bench_function("forward_1000_rows", |b| {
        b.iter(|| from_dataset(black_box(&big)).unwrap())
    });
}

fn bench_normalize(c: &mut Criterion) {
    let cells = [
        CellValue::Float(881234.0),
        CellValue::text(" Ward 3 "),
        CellValue::text("NaN"),
        CellValue::Empty,
        CellValue::text("12.0.0"),
    ];
    c.bench_function("normalize_cells", |b| {
        b.iter(|| {
            for cell in &cells {
                black_box(normalize(black_box(cell)));
            }
        })
    });
}

fn bench_render(c: &mut Criterion) {
    let record = edited_record(100);
    c.bench_function("render_100_items", |b| {
        b.iter(|| html::to_html(black_box(&record)).unwrap())
    });
}

fn bench_parse(c: &mut Criterion) {
    let small = html::to_html(&edited_record(10)).unwrap();
    let big = html::to_html(&edited_record(1000)).unwrap();
    c.bench_function("parse_10_items", |b| {
        b.iter(|| html::from_html(black_box(&small)).unwrap())
    });
    c.bench_function("parse_1000_items", |b| {
        b.iter(|| html::from_html(black_box(&big)).unwrap())
    });
}

fn bench_json(c: &mut Criterion) {
    let record = edited_record(1000);
    c.bench_function("json_safe_1000_items", |b| {
        b.iter(|| black_box(&record).to_json_safe())
    });
}

criterion_group!(
    benches,
    bench_forward,
    bench_normalize,
    bench_render,
    bench_parse,
    bench_json,
);
criterion_main!(benches);
