use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::calculations::{InvoiceAdjustments, LineItemInput};
use crate::models::PurchaseOrder;

/// Serialized as `po` / `direct`. Deserialized through
/// [`InvoiceKind::parse`], so any spelling it accepts works in files too.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum InvoiceKind {
    /// Raised against a purchase order; quantities are capped by what
    /// remains open on the PO.
    #[serde(rename = "po")]
    PoBased,
    /// Raised without a purchase order.
    #[serde(rename = "direct")]
    Direct,
}

impl InvoiceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PoBased => "po",
            Self::Direct => "direct",
        }
    }

    /// Parses a kind code, ignoring case and surrounding whitespace.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "po" | "po-based" | "po_based" => Some(Self::PoBased),
            "direct" => Some(Self::Direct),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown invoice kind '{0}' (expected po or direct)")]
pub struct UnknownInvoiceKind(pub String);

impl TryFrom<String> for InvoiceKind {
    type Error = UnknownInvoiceKind;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value).ok_or(UnknownInvoiceKind(value))
    }
}

/// One row of an invoice: what is being billed plus the numbers the
/// calculator needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceLine {
    /// 1-based position on the invoice.
    pub line_number: u32,
    pub description: String,
    /// Required for PO-based invoices, where it identifies the PO line.
    pub item_code: Option<String>,
    pub input: LineItemInput,
}

/// An invoice as entered on a form, before it is submitted to the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceDraft {
    pub invoice_number: String,
    pub kind: InvoiceKind,
    pub invoice_date: NaiveDate,
    pub purchase_order: Option<PurchaseOrder>,
    pub lines: Vec<InvoiceLine>,
    pub adjustments: InvoiceAdjustments,
}
