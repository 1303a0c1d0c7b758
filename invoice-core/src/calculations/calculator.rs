//! The single entry point for invoice arithmetic.
//!
//! Every screen that shows line or invoice totals (PO-based invoices,
//! direct invoices, purchase requisition lines) goes through
//! [`InvoiceLineCalculator`] rather than computing amounts itself.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use invoice_core::calculations::{InvoiceAdjustments, InvoiceLineCalculator, LineItemInput};
//!
//! let first = InvoiceLineCalculator::compute_line(
//!     &LineItemInput::new(dec!(10), dec!(100))
//!         .with_other_charges(dec!(50))
//!         .with_cgst_sgst(dec!(9), dec!(9)),
//! );
//! let second = InvoiceLineCalculator::compute_line(
//!     &LineItemInput::new(dec!(4), dec!(100)).with_igst(dec!(25)),
//! );
//!
//! assert_eq!(first.total_amount, dec!(1121));
//! assert_eq!(second.total_amount, dec!(500));
//!
//! let totals = InvoiceLineCalculator::compute_invoice_totals(
//!     &[first, second],
//!     &InvoiceAdjustments::new(dec!(100), dec!(50)),
//! );
//!
//! assert_eq!(totals.sub_total, dec!(1400));
//! assert_eq!(totals.tax_amount, dec!(271));
//! assert_eq!(totals.grand_total, dec!(1721));
//! ```

use serde::Serialize;
use tracing::trace;

use crate::calculations::invoice_totals::{self, InvoiceAdjustments, InvoiceTotals};
use crate::calculations::line_item::{self, LineItemInput, LineItemResult};
use crate::models::InvoiceLine;

/// Stateless calculator for line items and invoice totals.
///
/// Holds no data; all methods are pure functions of their arguments and
/// can be called from any thread without coordination.
#[derive(Debug, Clone, Copy, Default)]
pub struct InvoiceLineCalculator;

impl InvoiceLineCalculator {
    /// Computes the full breakdown for one line.
    ///
    /// This never fails. Negative inputs are not rejected: they produce
    /// consistent, possibly negative, amounts. Rejecting them is the job of
    /// [`crate::validation`].
    ///
    /// Results are exact while every intermediate amount fits in a
    /// [`Decimal`](rust_decimal::Decimal) (magnitude below about 7.9e28).
    /// Beyond that the amounts saturate at `Decimal::MAX` / `Decimal::MIN`.
    /// [`Self::try_compute_line`] reports that case instead, and
    /// [`crate::validation::validate_line`] rejects such inputs.
    pub fn compute_line(input: &LineItemInput) -> LineItemResult {
        let result = line_item::compute(input);
        trace!(
            quantity = %input.quantity,
            unit_price = %input.unit_price,
            total_amount = %result.total_amount,
            "computed line"
        );
        result
    }

    /// Like [`Self::compute_line`], but returns `None` when an intermediate
    /// amount overflows.
    pub fn try_compute_line(input: &LineItemInput) -> Option<LineItemResult> {
        line_item::checked_compute(input)
    }

    /// Aggregates computed lines and header adjustments into invoice totals.
    ///
    /// An empty slice yields a zero sub-total and tax amount. Sums that
    /// overflow saturate, as in [`Self::compute_line`].
    pub fn compute_invoice_totals(
        lines: &[LineItemResult],
        adjustments: &InvoiceAdjustments,
    ) -> InvoiceTotals {
        let totals = invoice_totals::aggregate(lines, adjustments);
        trace!(
            lines = lines.len(),
            sub_total = %totals.sub_total,
            tax_amount = %totals.tax_amount,
            grand_total = %totals.grand_total,
            "computed invoice totals"
        );
        totals
    }

    /// Like [`Self::compute_invoice_totals`], but returns `None` when a sum
    /// overflows.
    pub fn try_compute_invoice_totals(
        lines: &[LineItemResult],
        adjustments: &InvoiceAdjustments,
    ) -> Option<InvoiceTotals> {
        invoice_totals::checked_aggregate(lines, adjustments)
    }

    /// Computes every line of an invoice and its totals in one pass.
    pub fn compute_invoice<'a>(
        lines: &'a [InvoiceLine],
        adjustments: &InvoiceAdjustments,
    ) -> ComputedInvoice<'a> {
        let computed: Vec<ComputedLine<'a>> = lines
            .iter()
            .map(|line| ComputedLine {
                line,
                result: Self::compute_line(&line.input),
            })
            .collect();

        let results: Vec<LineItemResult> = computed.iter().map(|c| c.result).collect();
        let totals = Self::compute_invoice_totals(&results, adjustments);

        ComputedInvoice {
            lines: computed,
            adjustments: *adjustments,
            totals,
        }
    }
}

/// A line paired with its computed breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComputedLine<'a> {
    pub line: &'a InvoiceLine,
    pub result: LineItemResult,
}

/// Output of [`InvoiceLineCalculator::compute_invoice`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComputedInvoice<'a> {
    pub lines: Vec<ComputedLine<'a>>,
    pub adjustments: InvoiceAdjustments,
    pub totals: InvoiceTotals,
}
