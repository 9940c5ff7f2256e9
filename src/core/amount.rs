use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

/// Currency symbol printed in front of amounts on a rendered invoice.
pub const CURRENCY_SYMBOL: char = '£';

/// Parse a display amount such as `"£1,234.50"` or `" 12 "`.
///
/// Thousands separators, the currency symbol, and surrounding whitespace are
/// ignored. Returns `None` for anything that is not a plain decimal number.
pub fn parse_amount(text: &str) -> Option<Decimal> {
    let cleaned: String = text
        .chars()
        .filter(|c| *c != ',' && *c != CURRENCY_SYMBOL)
        .collect();
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return None;
    }
    Decimal::from_str(cleaned).ok()
}

/// Format an amount string with thousands separators and two decimals
/// (`"1234.5"` → `"1,234.50"`).
///
/// Blank input stays blank; input that does not parse as an amount is
/// returned unchanged.
pub fn format_amount(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    match parse_amount(text) {
        Some(value) => group_thousands(value),
        None => text.to_string(),
    }
}

fn group_thousands(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven);
    let plain = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = plain.split_once('.').unwrap_or((plain.as_str(), "00"));

    let mut grouped = String::with_capacity(plain.len() + plain.len() / 3 + 1);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{sign}{grouped}.{frac_part}")
}
