use super::dataset::{CellValue, Row};

static EMPTY: CellValue = CellValue::Empty;

/// Cell under the first of `candidates` present in the row's schema.
///
/// A present column wins even when its cell is blank; later candidates are
/// only consulted when earlier names do not exist at all. Returns a blank cell
/// when none of the names exist.
pub fn resolve<'r, R: Row + ?Sized>(row: &'r R, candidates: &[&str]) -> &'r CellValue {
    candidates
        .iter()
        .find_map(|name| row.get(name))
        .unwrap_or(&EMPTY)
}

/// Raw text of `column`: `""` when the column does not exist, otherwise the
/// cell's raw stringification (a blank cell in an existing column reads `nan`).
pub fn raw_text<R: Row + ?Sized>(row: &R, column: &str) -> String {
    row.get(column)
        .map(CellValue::to_raw_string)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn row(pairs: &[(&str, CellValue)]) -> HashMap<String, CellValue> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn first_present_candidate_wins_even_if_blank() {
        let r = row(&[
            ("PassengerUPC", CellValue::Empty),
            ("Passenger UPC Code", CellValue::text("999")),
        ]);
        let value = resolve(&r, &["Passenger UPC", "PassengerUPC", "Passenger UPC Code"]);
        assert_eq!(value, &CellValue::Empty);
    }

    #[test]
    fn falls_through_absent_names() {
        let r = row(&[("Passenger UPC Code", CellValue::text("4857773456"))]);
        let value = resolve(&r, &["Passenger UPC", "PassengerUPC", "Passenger UPC Code"]);
        assert_eq!(value, &CellValue::text("4857773456"));
    }

    #[test]
    fn no_candidate_present_yields_blank() {
        let r = row(&[("Caller", CellValue::text("Ward 3"))]);
        assert_eq!(resolve(&r, &["Passenger UPC"]), &CellValue::Empty);
        assert_eq!(resolve(&r, &[]), &CellValue::Empty);
    }

    #[test]
    fn raw_text_distinguishes_absent_from_blank() {
        let r = row(&[("Direction Text", CellValue::Empty)]);
        assert_eq!(raw_text(&r, "Direction Text"), "nan");
        assert_eq!(raw_text(&r, "Actual Mileage"), "");
    }
}
