//! Invoice line-item tax and total calculations.
//!
//! All amounts are full-precision [`rust_decimal::Decimal`] values; rounding
//! is left to the presentation layer.

pub mod calculator;
pub mod common;
pub mod invoice_totals;
pub mod line_item;

pub use calculator::{ComputedInvoice, ComputedLine, InvoiceLineCalculator};
pub use invoice_totals::{InvoiceAdjustments, InvoiceTotals, TaxBreakdown};
pub use line_item::{LineItemInput, LineItemResult};
