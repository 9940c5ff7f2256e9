//! Layout contract of a rendered invoice.
//!
//! The document parser recovers a record purely from structural conventions
//! of the rendered page: container classes, span order, and column markers.
//! Every one of those conventions is defined here and shared with the
//! reference renderer, so a layout change touches this module only.

use crate::core::{CURRENCY_SYMBOL, FinancialLine, InvoiceHeader, LineItem};

/// Root container of the first page. Patient, header, and totals live under it.
pub const PAGE_CONTENT: &str = "page-content";
/// Half-width panel. The first holds the patient, the second the header grid.
pub const HALF_PANEL: &str = "w-1/2";
/// Paragraph class of the patient lines.
pub const PATIENT_LINE: &str = "text-gray-700";
/// Grid of alternating label/value spans inside the header panel.
pub const HEADER_GRID: &str = "grid";
/// Flex row container.
pub const FLEX: &str = "flex";
/// Flex container holding the closing totals.
pub const CLOSING_GROUP: &str = "justify-end";
/// Flex row holding one label/value pair of the closing totals.
pub const CLOSING_ROW: &str = "justify-between";
/// Wrapper around one line item's grid.
pub const LINE_ITEM: &str = "invoice-line-item";
/// Grid holding either the column headings or one line item.
pub const DATA_GRID: &str = "data-grid";
/// Marks the column-heading spans of the heading grid.
pub const BOLD: &str = "font-bold";
/// Width class of the blank spacer in a line item's first row.
pub const SPACER_SPAN: &str = "col-span-4";
/// Position of the spacer among the first-row spans.
pub const SPACER_POSITION: usize = 5;
/// Fewest spans a bare data grid needs to count as a line item.
pub const MIN_ITEM_SPANS: usize = 15;
/// Image class of the paid stamp.
pub const PAID_STAMP: &str = "paid-stamp";

const COLUMN_START_PREFIX: &str = "col-start";
const COLUMN_SPAN_PREFIX: &str = "col-span";

/// Whether a span belongs to a line item's first row: it spans columns but
/// has no column-start marker.
pub fn is_first_row_span(classes: &[String]) -> bool {
    classes.iter().any(|c| c.contains(COLUMN_SPAN_PREFIX))
        && !classes.iter().any(|c| c.contains(COLUMN_START_PREFIX))
}

/// Remove the currency symbol and surrounding whitespace.
pub fn strip_currency(text: &str) -> String {
    text.replace(CURRENCY_SYMBOL, "").trim().to_string()
}

/// Header label/value pairs, in rendered order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderField {
    Number,
    Date,
    AccountRef,
    Reference,
    PoNumber,
    PaymentTerms,
    Period,
}

impl HeaderField {
    pub const ALL: [Self; 7] = [
        Self::Number,
        Self::Date,
        Self::AccountRef,
        Self::Reference,
        Self::PoNumber,
        Self::PaymentTerms,
        Self::Period,
    ];

    /// Label text as rendered.
    pub fn label(self) -> &'static str {
        match self {
            Self::Number => "Invoice Number:",
            Self::Date => "Invoice Date:",
            Self::AccountRef => "Account Reference:",
            Self::Reference => "Reference:",
            Self::PoNumber => "PO Number:",
            Self::PaymentTerms => "Payment Terms:",
            Self::Period => "Period:",
        }
    }

    /// Field named by a rendered label.
    ///
    /// Most labels match by substring. `Reference:` and `Period:` must match
    /// exactly, otherwise `Account Reference:` would be read as the reference.
    pub fn classify(label: &str) -> Option<Self> {
        if label.contains("Invoice Number") {
            Some(Self::Number)
        } else if label.contains("Invoice Date") {
            Some(Self::Date)
        } else if label.contains("Account Reference") {
            Some(Self::AccountRef)
        } else if label == "Reference:" {
            Some(Self::Reference)
        } else if label.contains("PO Number") {
            Some(Self::PoNumber)
        } else if label.contains("Payment Terms") {
            Some(Self::PaymentTerms)
        } else if label == "Period:" {
            Some(Self::Period)
        } else {
            None
        }
    }

    pub fn value(self, header: &InvoiceHeader) -> &str {
        match self {
            Self::Number => &header.number,
            Self::Date => &header.date,
            Self::AccountRef => &header.account_ref,
            Self::Reference => &header.reference,
            Self::PoNumber => &header.po_number,
            Self::PaymentTerms => &header.payment_terms,
            Self::Period => &header.period,
        }
    }

    pub fn slot(self, header: &mut InvoiceHeader) -> &mut String {
        match self {
            Self::Number => &mut header.number,
            Self::Date => &mut header.date,
            Self::AccountRef => &mut header.account_ref,
            Self::Reference => &mut header.reference,
            Self::PoNumber => &mut header.po_number,
            Self::PaymentTerms => &mut header.payment_terms,
            Self::Period => &mut header.period,
        }
    }
}

/// Positional fields of a line item's first row.
///
/// The rendered row is `date, our_ref, client_ref, nhs_number,
/// contract_hospital, <spacer>, booked_by, from_location, to_location`. The
/// spacer is sometimes missing, in which case the last three move up by one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FirstRowField {
    Date,
    OurRef,
    ClientRef,
    NhsNumber,
    ContractHospital,
    BookedBy,
    FromLocation,
    ToLocation,
}

impl FirstRowField {
    pub const ALL: [Self; 8] = [
        Self::Date,
        Self::OurRef,
        Self::ClientRef,
        Self::NhsNumber,
        Self::ContractHospital,
        Self::BookedBy,
        Self::FromLocation,
        Self::ToLocation,
    ];

    /// Index among the first-row spans.
    pub fn position(self, spacer_present: bool) -> usize {
        let before_spacer = match self {
            Self::Date => return 0,
            Self::OurRef => return 1,
            Self::ClientRef => return 2,
            Self::NhsNumber => return 3,
            Self::ContractHospital => return 4,
            Self::BookedBy => SPACER_POSITION,
            Self::FromLocation => SPACER_POSITION + 1,
            Self::ToLocation => SPACER_POSITION + 2,
        };
        if spacer_present {
            before_spacer + 1
        } else {
            before_spacer
        }
    }

    /// Rendered column width.
    pub fn width(self) -> u8 {
        match self {
            Self::ContractHospital | Self::FromLocation | Self::ToLocation => 3,
            _ => 2,
        }
    }

    pub fn heading(self) -> &'static str {
        match self {
            Self::Date => "Date",
            Self::OurRef => "Our Ref",
            Self::ClientRef => "Client Ref",
            Self::NhsNumber => "NHS Number",
            Self::ContractHospital => "Contract Hospital",
            Self::BookedBy => "Booked By",
            Self::FromLocation => "From",
            Self::ToLocation => "To",
        }
    }

    pub fn value(self, item: &LineItem) -> &str {
        match self {
            Self::Date => &item.date,
            Self::OurRef => &item.our_ref,
            Self::ClientRef => &item.client_ref,
            Self::NhsNumber => &item.nhs_number,
            Self::ContractHospital => &item.contract_hospital,
            Self::BookedBy => &item.booked_by,
            Self::FromLocation => &item.from_location,
            Self::ToLocation => &item.to_location,
        }
    }

    pub fn slot(self, item: &mut LineItem) -> &mut String {
        match self {
            Self::Date => &mut item.date,
            Self::OurRef => &mut item.our_ref,
            Self::ClientRef => &mut item.client_ref,
            Self::NhsNumber => &mut item.nhs_number,
            Self::ContractHospital => &mut item.contract_hospital,
            Self::BookedBy => &mut item.booked_by,
            Self::FromLocation => &mut item.from_location,
            Self::ToLocation => &mut item.to_location,
        }
    }
}

/// Fields of a line item's second row, identified by column-start marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecondRowField {
    Status,
    Directions,
    Mob,
    WaitPounds,
    WaitNotes,
    Miles,
    Charged,
    MilesPounds,
    JobPounds,
    Total,
}

impl SecondRowField {
    pub const ALL: [Self; 10] = [
        Self::Status,
        Self::Directions,
        Self::Mob,
        Self::WaitPounds,
        Self::WaitNotes,
        Self::Miles,
        Self::Charged,
        Self::MilesPounds,
        Self::JobPounds,
        Self::Total,
    ];

    pub fn column_start(self) -> u8 {
        match self {
            Self::Status => 1,
            Self::Directions => 3,
            Self::Mob => 5,
            Self::WaitPounds => 7,
            Self::WaitNotes => 9,
            Self::Miles => 12,
            Self::Charged => 14,
            Self::MilesPounds => 16,
            Self::JobPounds => 18,
            Self::Total => 20,
        }
    }

    /// Class token carrying the column start, e.g. `col-start-12`.
    pub fn marker(self) -> String {
        format!("{COLUMN_START_PREFIX}-{}", self.column_start())
    }

    /// Amount fields are rendered with a currency symbol.
    pub fn is_currency(self) -> bool {
        matches!(
            self,
            Self::WaitPounds | Self::MilesPounds | Self::JobPounds | Self::Total
        )
    }

    /// Field whose marker appears among `classes`. Markers match whole class
    /// tokens, so `col-start-1` never matches `col-start-12`.
    pub fn classify(classes: &[String]) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|field| {
                let marker = field.marker();
                classes.iter().any(|c| *c == marker)
            })
    }

    pub fn heading(self) -> &'static str {
        match self {
            Self::Status => "Status",
            Self::Directions => "Directions",
            Self::Mob => "Mob",
            Self::WaitPounds => "Wait £",
            Self::WaitNotes => "Wait Notes",
            Self::Miles => "Miles",
            Self::Charged => "Charged",
            Self::MilesPounds => "Miles £",
            Self::JobPounds => "Job £",
            Self::Total => "Total",
        }
    }

    pub fn value(self, item: &LineItem) -> &str {
        match self {
            Self::Status => &item.status,
            Self::Directions => &item.directions,
            Self::Mob => &item.mob,
            Self::WaitPounds => &item.wait_pounds,
            Self::WaitNotes => &item.wait_notes,
            Self::Miles => &item.miles,
            Self::Charged => &item.charged,
            Self::MilesPounds => &item.miles_pounds,
            Self::JobPounds => &item.job_pounds,
            Self::Total => &item.total,
        }
    }

    pub fn slot(self, item: &mut LineItem) -> &mut String {
        match self {
            Self::Status => &mut item.status,
            Self::Directions => &mut item.directions,
            Self::Mob => &mut item.mob,
            Self::WaitPounds => &mut item.wait_pounds,
            Self::WaitNotes => &mut item.wait_notes,
            Self::Miles => &mut item.miles,
            Self::Charged => &mut item.charged,
            Self::MilesPounds => &mut item.miles_pounds,
            Self::JobPounds => &mut item.job_pounds,
            Self::Total => &mut item.total,
        }
    }
}

/// Closing line named by a rendered label, skipping lines already taken.
///
/// Lines are tried in rendered order with a case-insensitive substring match.
/// The total due needs both `total` and `due`, so `Invoice subtotal` is never
/// read as the total.
pub fn financial_line_for(
    label: &str,
    taken: impl Fn(FinancialLine) -> bool,
) -> Option<FinancialLine> {
    let label = label.to_lowercase();
    FinancialLine::ALL.into_iter().find(|&line| {
        let matches = match line {
            FinancialLine::Net => label.contains("net"),
            FinancialLine::Discount => label.contains("discount"),
            FinancialLine::Subtotal => label.contains("subtotal"),
            FinancialLine::Vat => label.contains("vat"),
            FinancialLine::TotalDue => label.contains("total") && label.contains("due"),
        };
        matches && !taken(line)
    })
}
