//! Rendering sink and the reference layout renderer.

use super::filters::{format_currency, format_date_long, format_date_numeric};
use super::layout::{
    self, FirstRowField, HeaderField, SecondRowField, CLOSING_GROUP, CLOSING_ROW, DATA_GRID,
    FLEX, HALF_PANEL, HEADER_GRID, LINE_ITEM, PAGE_CONTENT, PATIENT_LINE, SPACER_SPAN,
};
use super::writer::MarkupWriter;
use crate::core::{CURRENCY_SYMBOL, FinancialLine, InvoiceError, InvoiceRecord, LineItem, Style};

/// Turns a canonical record into rendered markup.
pub trait RenderSink {
    fn render(&self, record: &InvoiceRecord, style: Style) -> Result<String, InvoiceError>;
}

/// Renders the invoice layout the document parser reads back.
#[derive(Debug, Clone)]
pub struct LayoutRenderer {
    /// Image source of the paid stamp.
    pub paid_stamp_src: String,
}

impl Default for LayoutRenderer {
    fn default() -> Self {
        Self {
            paid_stamp_src: "/static/paid.png".into(),
        }
    }
}

/// Render `record` with its own style selector.
pub fn to_html(record: &InvoiceRecord) -> Result<String, InvoiceError> {
    LayoutRenderer::default().render(record, record.style)
}

impl RenderSink for LayoutRenderer {
    fn render(&self, record: &InvoiceRecord, style: Style) -> Result<String, InvoiceError> {
        let mut w = MarkupWriter::new()?;
        w.start_element("html")?;
        w.start_element("head")?;
        w.void_element("meta", &[("charset", "utf-8")])?;
        w.text_element_with_class("title", "", &title(record))?;
        w.end_element("head")?;
        w.start_element_with_class("body", style.as_str())?;
        w.start_element_with_class("div", PAGE_CONTENT)?;

        if record.paid {
            w.void_element(
                "img",
                &[
                    ("class", layout::PAID_STAMP),
                    ("src", self.paid_stamp_src.as_str()),
                    ("alt", "PAID"),
                ],
            )?;
        }

        w.start_element_with_class("div", "flex justify-between mb-8")?;
        write_patient(&mut w, record)?;
        write_header(&mut w, record)?;
        w.end_element("div")?;

        if !record.item_name.is_empty() {
            w.text_element_with_class("p", "item-name font-semibold", &record.item_name)?;
        }

        write_column_headings(&mut w)?;
        for item in &record.invoice.items {
            write_line_item(&mut w, item)?;
        }

        write_totals(&mut w, record)?;
        write_bank(&mut w, record)?;

        w.end_element("div")?;
        w.end_element("body")?;
        w.end_element("html")?;
        w.into_string()
    }
}

fn title(record: &InvoiceRecord) -> String {
    if record.invoice.number.is_empty() {
        "Invoice".to_string()
    } else {
        format!("Invoice {}", record.invoice.number)
    }
}

fn with_currency(amount: &str) -> String {
    let formatted = format_currency(amount);
    if formatted.is_empty() {
        formatted
    } else {
        format!("{CURRENCY_SYMBOL}{formatted}")
    }
}

fn write_patient(w: &mut MarkupWriter, record: &InvoiceRecord) -> Result<(), InvoiceError> {
    w.start_element_with_class("div", HALF_PANEL)?;
    for line in [
        &record.patient.name,
        &record.patient.address,
        &record.patient.postcode,
    ] {
        w.text_element_with_class("p", PATIENT_LINE, line)?;
    }
    w.end_element("div")?;
    Ok(())
}

fn write_header(w: &mut MarkupWriter, record: &InvoiceRecord) -> Result<(), InvoiceError> {
    w.start_element_with_class("div", &format!("{HALF_PANEL} text-right"))?;
    w.start_element_with_class("div", &format!("{HEADER_GRID} grid-cols-2 gap-x-4"))?;
    for field in HeaderField::ALL {
        let value = field.value(&record.invoice);
        let value = match field {
            HeaderField::Date => format_date_long(value),
            _ => value.to_string(),
        };
        w.text_element_with_class("span", "font-semibold", field.label())?;
        w.text_element_with_class("span", "", &value)?;
    }
    w.end_element("div")?;
    w.end_element("div")?;
    Ok(())
}

fn write_column_headings(w: &mut MarkupWriter) -> Result<(), InvoiceError> {
    w.start_element_with_class("div", &format!("{DATA_GRID} grid-cols-22 text-xs"))?;
    for (pos, field) in FirstRowField::ALL.into_iter().enumerate() {
        if pos == layout::SPACER_POSITION {
            w.text_element_with_class("span", SPACER_SPAN, "")?;
        }
        let class = format!("{} col-span-{}", layout::BOLD, field.width());
        w.text_element_with_class("span", &class, field.heading())?;
    }
    for field in SecondRowField::ALL {
        let class = format!("{} {} col-span-2", layout::BOLD, field.marker());
        w.text_element_with_class("span", &class, field.heading())?;
    }
    w.end_element("div")?;
    Ok(())
}

fn write_line_item(w: &mut MarkupWriter, item: &LineItem) -> Result<(), InvoiceError> {
    w.start_element_with_class("div", LINE_ITEM)?;
    w.start_element_with_class("div", &format!("{DATA_GRID} grid-cols-22 text-xs"))?;

    for (pos, field) in FirstRowField::ALL.into_iter().enumerate() {
        if pos == layout::SPACER_POSITION {
            w.text_element_with_class("span", SPACER_SPAN, "")?;
        }
        let value = match field {
            FirstRowField::Date => format_date_numeric(field.value(item)),
            _ => field.value(item).to_string(),
        };
        w.text_element_with_class("span", &format!("col-span-{}", field.width()), &value)?;
    }

    for field in SecondRowField::ALL {
        let value = if field.is_currency() {
            with_currency(field.value(item))
        } else {
            field.value(item).to_string()
        };
        let class = format!("{} col-span-2", field.marker());
        w.text_element_with_class("span", &class, &value)?;
    }

    w.end_element("div")?;
    w.end_element("div")?;
    Ok(())
}

fn write_totals(w: &mut MarkupWriter, record: &InvoiceRecord) -> Result<(), InvoiceError> {
    w.start_element_with_class("div", &format!("{FLEX} {CLOSING_GROUP} mt-6"))?;
    w.start_element_with_class("div", "w-1/3")?;
    for line in FinancialLine::ALL {
        let class = if line == FinancialLine::TotalDue {
            format!("{FLEX} {CLOSING_ROW} font-bold border-t")
        } else {
            format!("{FLEX} {CLOSING_ROW}")
        };
        w.start_element_with_class("div", &class)?;
        w.text_element_with_class("span", "", record.financial.label(line))?;
        w.text_element_with_class("span", "", &with_currency(record.financial.amount(line)))?;
        w.end_element("div")?;
    }
    w.end_element("div")?;
    w.end_element("div")?;
    Ok(())
}

fn write_bank(w: &mut MarkupWriter, record: &InvoiceRecord) -> Result<(), InvoiceError> {
    let bank = &record.bank;
    w.start_element_with_class("div", "bank-details mt-8 text-sm")?;
    w.text_element_with_class("p", "font-semibold", "Payment details")?;
    w.text_element_with_class("p", "", &format!("Bank: {}", bank.name))?;
    w.text_element_with_class("p", "", &format!("Account name: {}", bank.account_name))?;
    w.text_element_with_class("p", "", &format!("Account number: {}", bank.account_number))?;
    w.text_element_with_class("p", "", &format!("Sort code: {}", bank.sort_code))?;
    w.end_element("div")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Patient;

    fn record() -> InvoiceRecord {
        let mut record = InvoiceRecord::new(Patient {
            name: "Ada Lovelace".into(),
            address: "2 High St, Exeter".into(),
            postcode: "EX1 1AA".into(),
        });
        record.invoice.number = "INV-7".into();
        record.invoice.items.push(LineItem {
            date: "2025-07-01".into(),
            our_ref: "4512".into(),
            total: "1234.5".into(),
            ..LineItem::default()
        });
        record
    }

    #[test]
    fn renders_layout_markers() {
        let html = to_html(&record()).unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains(r#"<body class="style1">"#));
        assert!(html.contains(r#"<div class="page-content">"#));
        assert!(html.contains(r#"<p class="text-gray-700">Ada Lovelace</p>"#));
        assert!(html.contains(r#"<div class="invoice-line-item">"#));
        assert!(html.contains(r#"<span class="col-span-2">01/07/2025</span>"#));
        assert!(html.contains(r#"<span class="col-start-20 col-span-2">£1,234.50</span>"#));
        assert!(html.contains("<span>TOTAL DUE</span>"));
        assert!(!html.contains("paid-stamp"));
    }

    #[test]
    fn style_argument_wins_over_record() {
        let html = LayoutRenderer::default()
            .render(&record(), Style::Style2)
            .unwrap();
        assert!(html.contains(r#"<body class="style2">"#));
    }

    #[test]
    fn paid_stamp_and_item_name() {
        let mut record = record();
        record.paid = true;
        record.item_name = "Wheelchair transfers".into();
        let html = to_html(&record).unwrap();
        assert!(html.contains(r#"class="paid-stamp""#));
        assert!(html.contains("Wheelchair transfers"));
    }

    #[test]
    fn text_is_escaped() {
        let mut record = record();
        record.patient.name = "A & B <C>".into();
        let html = to_html(&record).unwrap();
        assert!(html.contains("A &amp; B &lt;C&gt;"));
    }
}
