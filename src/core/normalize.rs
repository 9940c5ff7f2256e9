use super::dataset::CellValue;

/// Clean a cell into a display string.
///
/// Blank cells, NaN, whitespace-only text and the literal text `nan` (any
/// case) become `""`. Anything else is stringified and trimmed, and a terminal
/// `.0` is stripped so integer IDs exported as floats (`123.0`) read `123`.
pub fn normalize(raw: &CellValue) -> String {
    if raw.is_missing() {
        return String::new();
    }
    normalize_text(&raw.to_raw_string())
}

/// [`normalize`] for text that has already been stringified.
///
/// The blank check and the `.0` strip repeat until neither applies, so the
/// result is a fixed point: `normalize_text(&normalize_text(s)) == normalize_text(s)`.
pub fn normalize_text(raw: &str) -> String {
    let mut s = raw.trim();
    loop {
        if is_blank_or_nan(s) {
            return String::new();
        }
        match s.strip_suffix(".0") {
            Some(stripped) => s = stripped.trim(),
            None => return s.to_string(),
        }
    }
}

/// True for empty or whitespace-only text and for `nan` in any case.
pub fn is_blank_or_nan(s: &str) -> bool {
    let s = s.trim();
    s.is_empty() || s.eq_ignore_ascii_case("nan")
}
