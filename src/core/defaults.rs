//! Static defaults shared by the forward transform, the document parser, and
//! the renderer.

/// VAT percentage assumed when the source does not state one.
pub const DEFAULT_VAT_PERCENTAGE: &str = "20";

/// One line of the closing totals block.
///
/// Ordered as the lines appear on a rendered invoice, which is also the order
/// in which the document parser tries to match a label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FinancialLine {
    Net,
    Discount,
    Subtotal,
    Vat,
    TotalDue,
}

impl FinancialLine {
    pub const ALL: [Self; 5] = [
        Self::Net,
        Self::Discount,
        Self::Subtotal,
        Self::Vat,
        Self::TotalDue,
    ];

    /// Editable display label a fresh record starts with.
    pub fn default_label(self) -> &'static str {
        match self {
            Self::Net => "net",
            Self::Discount => "discount",
            Self::Subtotal => "Invoice subtotal",
            Self::Vat => "VAT 20%",
            Self::TotalDue => "TOTAL DUE",
        }
    }

    /// JSON key of the amount field in the financial block.
    pub fn amount_key(self) -> &'static str {
        match self {
            Self::Net => "net",
            Self::Discount => "discount",
            Self::Subtotal => "subtotal",
            Self::Vat => "vat_amount",
            Self::TotalDue => "total",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_labels() {
        let labels: Vec<_> = FinancialLine::ALL.iter().map(|l| l.default_label()).collect();
        assert_eq!(
            labels,
            ["net", "discount", "Invoice subtotal", "VAT 20%", "TOTAL DUE"]
        );
    }
}
