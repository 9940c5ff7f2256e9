//! Display filters applied by the renderer.
//!
//! Each filter returns `""` for `""` and its input unchanged when it cannot
//! make sense of it, so a hand-edited value always reaches the page.

use chrono::{Datelike, NaiveDate, NaiveDateTime};

use crate::core::format_amount;

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d", "%Y/%m/%d", "%d/%m/%Y", "%d-%m-%Y", "%m/%d/%Y", "%m-%d-%Y", "%d %b %Y", "%d %B %Y",
];

const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y/%m/%d %H:%M:%S"];

/// Parse a date as written in exports and edited records. Day-first wins
/// over month-first for ambiguous slash and dash dates.
pub fn parse_display_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
                .map(|dt| dt.date())
        })
}

/// `"2026-01-15"` → `"15th January 2026"`.
pub fn format_date_long(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    match parse_display_date(text) {
        Some(date) => format!(
            "{}{} {}",
            date.day(),
            ordinal_suffix(date.day()),
            date.format("%B %Y")
        ),
        None => text.to_string(),
    }
}

/// `"2026-01-15"` → `"15/01/2026"`.
pub fn format_date_numeric(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    match parse_display_date(text) {
        Some(date) => date.format("%d/%m/%Y").to_string(),
        None => text.to_string(),
    }
}

/// `"1234.5"` → `"1,234.50"`.
pub fn format_currency(text: &str) -> String {
    format_amount(text)
}

fn ordinal_suffix(day: u32) -> &'static str {
    if (11..=13).contains(&(day % 100)) {
        return "th";
    }
    match day % 10 {
        1 => "st",
        2 => "nd",
        3 => "rd",
        _ => "th",
    }
}
