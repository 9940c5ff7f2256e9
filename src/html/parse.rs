//! Rendered invoice → canonical invoice record.

use tracing::{debug, warn};

use super::dom::{Element, Markup};
use super::layout::{
    self, FirstRowField, HeaderField, SecondRowField, BOLD, CLOSING_GROUP, CLOSING_ROW,
    DATA_GRID, FLEX, HALF_PANEL, HEADER_GRID, LINE_ITEM, MIN_ITEM_SPANS, PAGE_CONTENT,
    PATIENT_LINE, SPACER_POSITION, SPACER_SPAN,
};
use crate::core::{Financial, FinancialLine, InvoiceHeader, InvoiceError, InvoiceRecord, LineItem, Patient};

/// Recover a canonical record from a rendered invoice.
///
/// Only the markup structure is used. Anything the layout does not carry
/// comes back as its default: the bank block is the fixed constant, the
/// record is unpaid `style1` with no item name, and `vat_percentage` is
/// `"20"`. Missing or drifted sections degrade field by field to blank
/// strings.
///
/// Fails with [`InvoiceError::MalformedDocument`] only when the text is not
/// markup at all.
pub fn from_html(markup: &str) -> Result<InvoiceRecord, InvoiceError> {
    let doc = Markup::parse(markup)?;
    let root = doc.root();
    let mut record = InvoiceRecord::default();

    match root.find("div", Some(PAGE_CONTENT)) {
        Some(page) => {
            let mut panels = page.find_all("div", Some(HALF_PANEL));
            if let Some(panel) = panels.next() {
                record.patient = patient_from_panel(panel);
            }
            if let Some(panel) = panels.next() {
                read_header(panel, &mut record.invoice);
            }
            record.financial = financial_from_page(page);
        }
        None => warn!("rendered invoice has no page-content root, patient, header and totals left blank"),
    }

    record.invoice.items = line_items(root);
    Ok(record)
}

/// [`from_html`] over raw bytes, which must be UTF-8.
pub fn from_html_bytes(bytes: &[u8]) -> Result<InvoiceRecord, InvoiceError> {
    let text = std::str::from_utf8(bytes).map_err(|e| {
        InvoiceError::MalformedDocument(format!("document is not valid UTF-8: {e}"))
    })?;
    from_html(text)
}

/// Name, address, postcode by position; missing lines stay blank.
fn patient_from_panel(panel: Element<'_>) -> Patient {
    let mut lines = panel.find_all("p", Some(PATIENT_LINE)).map(|p| p.text());
    Patient {
        name: lines.next().unwrap_or_default(),
        address: lines.next().unwrap_or_default(),
        postcode: lines.next().unwrap_or_default(),
    }
}

/// Read the header grid as `(label, value)` span pairs. An odd trailing
/// span is ignored, as are labels the layout does not define.
fn read_header(panel: Element<'_>, header: &mut InvoiceHeader) {
    let Some(grid) = panel.find("div", Some(HEADER_GRID)) else {
        debug!("header panel has no label grid");
        return;
    };
    let spans: Vec<String> = grid.find_all("span", None).map(|s| s.text()).collect();
    for pair in spans.chunks_exact(2) {
        if let Some(field) = HeaderField::classify(&pair[0]) {
            *field.slot(header) = pair[1].clone();
        }
    }
}

fn financial_from_page(page: Element<'_>) -> Financial {
    let mut financial = Financial::default();
    let mut taken = [false; FinancialLine::ALL.len()];

    let groups = page
        .find_all("div", Some(FLEX))
        .filter(|div| div.has_class(CLOSING_GROUP));
    for group in groups {
        let rows = group
            .find_all("div", Some(FLEX))
            .filter(|div| div.has_class(CLOSING_ROW));
        for row in rows {
            let mut spans = row.find_all("span", None);
            let (Some(label), Some(value)) = (spans.next(), spans.next()) else {
                continue;
            };
            let label = label.text();
            let Some(line) = layout::financial_line_for(&label, |line| taken[line as usize])
            else {
                continue;
            };
            taken[line as usize] = true;
            financial.set(line, layout::strip_currency(&value.text()), label);
        }
    }
    financial
}

/// Grids holding one line item each, by wrapper if the document has any,
/// otherwise every sufficiently large data grid except the heading grid.
fn item_grids<'a>(root: Element<'a>) -> Vec<Element<'a>> {
    let wrapped: Vec<_> = root
        .find_all("div", Some(LINE_ITEM))
        .filter_map(|wrapper| wrapper.find("div", Some(DATA_GRID)))
        .collect();
    if !wrapped.is_empty() {
        debug!(grids = wrapped.len(), "line items found by wrapper");
        return wrapped;
    }

    let grids: Vec<_> = root.find_all("div", Some(DATA_GRID)).collect();
    let heading = grids
        .iter()
        .copied()
        .find(|grid| grid.find("span", Some(BOLD)).is_some());
    let items: Vec<_> = grids
        .iter()
        .copied()
        .filter(|grid| Some(*grid) != heading)
        .filter(|grid| grid.find_all("span", None).count() >= MIN_ITEM_SPANS)
        .collect();
    debug!(
        examined = grids.len(),
        grids = items.len(),
        "line items found by bare data grid"
    );
    items
}

fn line_items(root: Element<'_>) -> Vec<LineItem> {
    item_grids(root)
        .into_iter()
        .filter_map(item_from_grid)
        .collect()
}

/// One line item from its grid, or `None` when it has neither a date nor
/// our reference.
fn item_from_grid(grid: Element<'_>) -> Option<LineItem> {
    let mut item = LineItem::default();
    let mut first_row = Vec::new();

    for span in grid.find_all("span", None) {
        match SecondRowField::classify(span.classes()) {
            Some(field) => {
                let text = span.text();
                *field.slot(&mut item) = if field.is_currency() {
                    layout::strip_currency(&text)
                } else {
                    text
                };
            }
            None if layout::is_first_row_span(span.classes()) => first_row.push(span),
            None => {}
        }
    }

    let spacer_present = first_row
        .get(SPACER_POSITION)
        .is_some_and(|span| span.has_class(SPACER_SPAN) && span.text().is_empty());
    for field in FirstRowField::ALL {
        if let Some(span) = first_row.get(field.position(spacer_present)) {
            *field.slot(&mut item) = span.text();
        }
    }

    item.is_identified().then_some(item)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_malformed() {
        assert!(matches!(
            from_html("no markup here"),
            Err(InvoiceError::MalformedDocument(_))
        ));
    }

    #[test]
    fn invalid_utf8_is_malformed() {
        assert!(matches!(
            from_html_bytes(&[0x3c, 0x70, 0x3e, 0xff, 0xfe]),
            Err(InvoiceError::MalformedDocument(_))
        ));
    }

    #[test]
    fn missing_page_root_degrades_to_defaults() {
        let record = from_html("<html><body><p>hello</p></body></html>").unwrap();
        assert_eq!(record, InvoiceRecord::default());
    }

    #[test]
    fn patient_lines_are_positional() {
        let record = from_html(
            r#"<div class="page-content"><div class="w-1/2">
                <p class="text-gray-700">Jo Bloggs</p>
                <p class="text-gray-700">1 Lane, Truro</p>
            </div></div>"#,
        )
        .unwrap();
        assert_eq!(record.patient.name, "Jo Bloggs");
        assert_eq!(record.patient.address, "1 Lane, Truro");
        assert_eq!(record.patient.postcode, "");
    }

    #[test]
    fn header_pairs_by_label() {
        let record = from_html(
            r#"<div class="page-content"><div class="w-1/2"></div>
            <div class="w-1/2 text-right"><div class="grid">
                <span>Account Reference:</span><span>ACC-9</span>
                <span>Reference:</span><span>R-2</span>
                <span>Unknown:</span><span>zzz</span>
                <span>Period:</span><span>July 2025</span>
                <span>PO Number:</span>
            </div></div></div>"#,
        )
        .unwrap();
        assert_eq!(record.invoice.account_ref, "ACC-9");
        assert_eq!(record.invoice.reference, "R-2");
        assert_eq!(record.invoice.period, "July 2025");
        assert_eq!(record.invoice.po_number, "");
    }

    #[test]
    fn financial_first_match_wins() {
        let record = from_html(
            r#"<div class="page-content">
            <div class="flex justify-end"><div>
                <div class="flex justify-between"><span>Net</span><span>£100.00</span></div>
                <div class="flex justify-between"><span>net again</span><span>£999.00</span></div>
                <div class="flex justify-between"><span>Invoice subtotal</span><span>£90.00</span></div>
                <div class="flex justify-between"><span>VAT 5%</span><span>£4.50</span></div>
                <div class="flex justify-between"><span>Total due</span><span>£ 94.50</span></div>
                <div class="flex justify-between"><span>TOTAL DUE</span><span>£0.00</span></div>
            </div></div></div>"#,
        )
        .unwrap();
        let fin = &record.financial;
        assert_eq!((fin.net.as_str(), fin.net_label.as_str()), ("100.00", "Net"));
        assert_eq!(fin.subtotal, "90.00");
        assert_eq!((fin.vat_amount.as_str(), fin.vat_label.as_str()), ("4.50", "VAT 5%"));
        assert_eq!((fin.total.as_str(), fin.total_label.as_str()), ("94.50", "Total due"));
        assert_eq!(fin.discount, "");
        assert_eq!(fin.discount_label, "discount");
        assert_eq!(fin.vat_percentage, "20");
    }

    #[test]
    fn flex_rows_outside_closing_group_are_ignored() {
        let record = from_html(
            r#"<div class="page-content">
            <div class="flex justify-between"><span>Net</span><span>£5.00</span></div>
            </div>"#,
        )
        .unwrap();
        assert_eq!(record.financial.net, "");
    }
}
