use serde::{Deserialize, Serialize};

use super::defaults::{DEFAULT_VAT_PERCENTAGE, FinancialLine};
use super::error::InvoiceError;

/// Canonical invoice record. Both transforms produce it; the editing step and
/// the renderer consume it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InvoiceRecord {
    /// Invoiced patient.
    pub patient: Patient,
    /// Header fields plus the ordered line items.
    pub invoice: InvoiceHeader,
    /// Closing totals block (amounts as display strings, labels editable).
    pub financial: Financial,
    /// Payee bank details (fixed per deployment).
    pub bank: BankDetails,
    /// Whether the rendered invoice carries a paid stamp.
    pub paid: bool,
    /// Rendering variant.
    pub style: Style,
    /// Free-text item name shown on the invoice.
    pub item_name: String,
}

impl InvoiceRecord {
    /// A complete pre-edit record for `patient`: empty header, no items,
    /// default financial labels, the fixed bank block, and unpaid `style1`.
    pub fn new(patient: Patient) -> Self {
        Self {
            patient,
            invoice: InvoiceHeader::default(),
            financial: Financial::default(),
            bank: BankDetails::fixed(),
            paid: false,
            style: Style::default(),
            item_name: String::new(),
        }
    }

    /// Decode an edited record. Missing keys fall back to their defaults.
    pub fn from_json(json: &str) -> Result<Self, InvoiceError> {
        serde_json::from_str(json).map_err(|e| InvoiceError::Json(e.to_string()))
    }

    /// Encode the record as compact JSON.
    pub fn to_json_string(&self) -> Result<String, InvoiceError> {
        serde_json::to_string(self).map_err(|e| InvoiceError::Json(e.to_string()))
    }
}

impl Default for InvoiceRecord {
    fn default() -> Self {
        Self::new(Patient::default())
    }
}

/// Patient block, taken from the first dataset row or the first half panel
/// of a rendered invoice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Patient {
    pub name: String,
    pub address: String,
    pub postcode: String,
}

/// Invoice header fields and line items.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InvoiceHeader {
    pub number: String,
    pub date: String,
    pub account_ref: String,
    #[serde(rename = "ref")]
    pub reference: String,
    pub po_number: String,
    pub payment_terms: String,
    pub period: String,
    /// Line items in source-row or document order.
    pub items: Vec<LineItem>,
}

/// One transported-patient journey.
///
/// Every field is always present. The money fields (`wait_pounds`,
/// `miles_pounds`, `job_pounds`, `total`) and `charged` start blank on the
/// forward path and are filled in by the editing step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineItem {
    pub date: String,
    pub our_ref: String,
    pub client_ref: String,
    pub nhs_number: String,
    pub contract_hospital: String,
    pub booked_by: String,
    pub from_location: String,
    pub to_location: String,
    pub status: String,
    pub directions: String,
    pub mob: String,
    pub wait_pounds: String,
    pub wait_notes: String,
    pub miles: String,
    pub charged: String,
    pub miles_pounds: String,
    pub job_pounds: String,
    pub total: String,
}

impl LineItem {
    /// An item carries identifying information when it has a date or our
    /// reference. Items without either are dropped by both transforms.
    pub fn is_identified(&self) -> bool {
        !self.date.is_empty() || !self.our_ref.is_empty()
    }
}

/// Closing totals block. Amounts are display strings, never parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Financial {
    pub net: String,
    pub net_label: String,
    pub discount: String,
    pub discount_label: String,
    pub subtotal: String,
    pub subtotal_label: String,
    pub vat_amount: String,
    pub vat_label: String,
    pub vat_percentage: String,
    pub total: String,
    pub total_label: String,
}

impl Default for Financial {
    fn default() -> Self {
        Self {
            net: String::new(),
            net_label: FinancialLine::Net.default_label().into(),
            discount: String::new(),
            discount_label: FinancialLine::Discount.default_label().into(),
            subtotal: String::new(),
            subtotal_label: FinancialLine::Subtotal.default_label().into(),
            vat_amount: String::new(),
            vat_label: FinancialLine::Vat.default_label().into(),
            vat_percentage: DEFAULT_VAT_PERCENTAGE.into(),
            total: String::new(),
            total_label: FinancialLine::TotalDue.default_label().into(),
        }
    }
}

impl Financial {
    /// Amount text for one closing line.
    pub fn amount(&self, line: FinancialLine) -> &str {
        match line {
            FinancialLine::Net => &self.net,
            FinancialLine::Discount => &self.discount,
            FinancialLine::Subtotal => &self.subtotal,
            FinancialLine::Vat => &self.vat_amount,
            FinancialLine::TotalDue => &self.total,
        }
    }

    /// Display label for one closing line.
    pub fn label(&self, line: FinancialLine) -> &str {
        match line {
            FinancialLine::Net => &self.net_label,
            FinancialLine::Discount => &self.discount_label,
            FinancialLine::Subtotal => &self.subtotal_label,
            FinancialLine::Vat => &self.vat_label,
            FinancialLine::TotalDue => &self.total_label,
        }
    }

    /// Set both the amount and the label of one closing line.
    pub fn set(&mut self, line: FinancialLine, amount: String, label: String) {
        let (amount_slot, label_slot) = match line {
            FinancialLine::Net => (&mut self.net, &mut self.net_label),
            FinancialLine::Discount => (&mut self.discount, &mut self.discount_label),
            FinancialLine::Subtotal => (&mut self.subtotal, &mut self.subtotal_label),
            FinancialLine::Vat => (&mut self.vat_amount, &mut self.vat_label),
            FinancialLine::TotalDue => (&mut self.total, &mut self.total_label),
        };
        *amount_slot = amount;
        *label_slot = label;
    }
}

/// Payee bank details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BankDetails {
    pub name: String,
    pub account_name: String,
    pub account_number: String,
    pub sort_code: String,
}

impl BankDetails {
    /// The deployment's bank block. Never read from input.
    pub fn fixed() -> Self {
        Self {
            name: "Lloyds Bank Plc".into(),
            account_name: "Starcross Trading Limited".into(),
            account_number: "82082760".into(),
            sort_code: "30-99-21".into(),
        }
    }
}

impl Default for BankDetails {
    fn default() -> Self {
        Self::fixed()
    }
}

/// Rendering variant selector.
///
/// Serialized as `"style1"` / `"style2"`. Any other string decodes to
/// [`Style::Style1`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Style {
    #[default]
    Style1,
    Style2,
}

impl Style {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Style1 => "style1",
            Self::Style2 => "style2",
        }
    }
}

impl From<String> for Style {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<&str> for Style {
    fn from(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("style2") {
            Self::Style2
        } else {
            Self::Style1
        }
    }
}

impl std::fmt::Display for Style {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
