//! Invoice-level aggregation of computed lines.
//!
//! ```text
//! sub_total   = Σ base_amount
//! tax_amount  = Σ total_tax_amount
//! grand_total = sub_total + tax_amount + freight_charges − discount_amount
//! ```
//!
//! The grand total is not clamped at zero; a discount larger than the
//! payable amount is for the caller to reject.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::line_item::LineItemResult;

/// Header-level charges that apply to the invoice as a whole.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceAdjustments {
    pub freight_charges: Decimal,
    pub discount_amount: Decimal,
}

impl InvoiceAdjustments {
    pub fn new(
        freight_charges: Decimal,
        discount_amount: Decimal,
    ) -> Self {
        Self {
            freight_charges,
            discount_amount,
        }
    }
}

/// Per-component tax sums across all lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBreakdown {
    pub cgst_amount: Decimal,
    pub sgst_amount: Decimal,
    pub igst_amount: Decimal,
    pub other_tax_amount: Decimal,
}

impl TaxBreakdown {
    fn add(
        &mut self,
        line: &LineItemResult,
    ) {
        self.cgst_amount = self.cgst_amount.saturating_add(line.cgst_amount);
        self.sgst_amount = self.sgst_amount.saturating_add(line.sgst_amount);
        self.igst_amount = self.igst_amount.saturating_add(line.igst_amount);
        self.other_tax_amount = self.other_tax_amount.saturating_add(line.other_tax_amount);
    }

    fn checked_add(
        &self,
        line: &LineItemResult,
    ) -> Option<Self> {
        Some(Self {
            cgst_amount: self.cgst_amount.checked_add(line.cgst_amount)?,
            sgst_amount: self.sgst_amount.checked_add(line.sgst_amount)?,
            igst_amount: self.igst_amount.checked_add(line.igst_amount)?,
            other_tax_amount: self.other_tax_amount.checked_add(line.other_tax_amount)?,
        })
    }
}

/// Aggregate totals for an invoice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceTotals {
    pub sub_total: Decimal,
    pub tax_amount: Decimal,
    pub grand_total: Decimal,
    pub tax_breakdown: TaxBreakdown,
}

pub(crate) fn aggregate(
    lines: &[LineItemResult],
    adjustments: &InvoiceAdjustments,
) -> InvoiceTotals {
    let mut sub_total = Decimal::ZERO;
    let mut tax_amount = Decimal::ZERO;
    let mut tax_breakdown = TaxBreakdown::default();

    for line in lines {
        sub_total = sub_total.saturating_add(line.base_amount);
        tax_amount = tax_amount.saturating_add(line.total_tax_amount);
        tax_breakdown.add(line);
    }

    let grand_total = sub_total
        .saturating_add(tax_amount)
        .saturating_add(adjustments.freight_charges)
        .saturating_sub(adjustments.discount_amount);

    InvoiceTotals {
        sub_total,
        tax_amount,
        grand_total,
        tax_breakdown,
    }
}

/// Same sums as [`aggregate`], returning `None` if any of them overflows.
pub(crate) fn checked_aggregate(
    lines: &[LineItemResult],
    adjustments: &InvoiceAdjustments,
) -> Option<InvoiceTotals> {
    let mut sub_total = Decimal::ZERO;
    let mut tax_amount = Decimal::ZERO;
    let mut tax_breakdown = TaxBreakdown::default();

    for line in lines {
        sub_total = sub_total.checked_add(line.base_amount)?;
        tax_amount = tax_amount.checked_add(line.total_tax_amount)?;
        tax_breakdown = tax_breakdown.checked_add(line)?;
    }

    let grand_total = sub_total
        .checked_add(tax_amount)?
        .checked_add(adjustments.freight_charges)?
        .checked_sub(adjustments.discount_amount)?;

    Some(InvoiceTotals {
        sub_total,
        tax_amount,
        grand_total,
        tax_breakdown,
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn line(
        base_amount: Decimal,
        cgst_amount: Decimal,
        sgst_amount: Decimal,
        igst_amount: Decimal,
    ) -> LineItemResult {
        let total_tax_amount = cgst_amount + sgst_amount + igst_amount;
        LineItemResult {
            base_amount,
            taxable_amount: base_amount,
            cgst_amount,
            sgst_amount,
            igst_amount,
            other_tax_amount: Decimal::ZERO,
            total_tax_amount,
            total_amount: base_amount + total_tax_amount,
        }
    }

    // =========================================================================
    // aggregate tests
    // =========================================================================

    #[test]
    fn aggregate_empty_invoice_is_all_zero() {
        let totals = aggregate(&[], &InvoiceAdjustments::default());

        assert_eq!(totals, InvoiceTotals::default());
    }

    #[test]
    fn aggregate_empty_invoice_still_applies_adjustments() {
        let totals = aggregate(&[], &InvoiceAdjustments::new(dec!(40), dec!(10)));

        assert_eq!(totals.sub_total, dec!(0));
        assert_eq!(totals.grand_total, dec!(30));
    }

    #[test]
    fn aggregate_sums_base_and_tax() {
        let lines = [
            line(dec!(1000), dec!(90), dec!(90), dec!(0)),
            line(dec!(400), dec!(0), dec!(0), dec!(72)),
        ];

        let totals = aggregate(&lines, &InvoiceAdjustments::default());

        assert_eq!(totals.sub_total, dec!(1400));
        assert_eq!(totals.tax_amount, dec!(252));
        assert_eq!(totals.grand_total, dec!(1652));
    }

    #[test]
    fn aggregate_tracks_each_tax_component() {
        let lines = [
            line(dec!(1000), dec!(90), dec!(90), dec!(0)),
            line(dec!(400), dec!(0), dec!(0), dec!(72)),
            line(dec!(50), dec!(1.25), dec!(1.25), dec!(0)),
        ];

        let totals = aggregate(&lines, &InvoiceAdjustments::default());

        assert_eq!(
            totals.tax_breakdown,
            TaxBreakdown {
                cgst_amount: dec!(91.25),
                sgst_amount: dec!(91.25),
                igst_amount: dec!(72),
                other_tax_amount: dec!(0),
            }
        );
    }

    #[test]
    fn aggregate_applies_freight_and_discount() {
        let lines = [line(dec!(1000), dec!(90), dec!(90), dec!(0))];

        let totals = aggregate(&lines, &InvoiceAdjustments::new(dec!(100), dec!(50)));

        // 1000 + 180 + 100 - 50
        assert_eq!(totals.grand_total, dec!(1230));
    }

    #[test]
    fn aggregate_does_not_clamp_negative_grand_total() {
        let lines = [line(dec!(100), dec!(0), dec!(0), dec!(0))];

        let totals = aggregate(&lines, &InvoiceAdjustments::new(dec!(0), dec!(250)));

        assert_eq!(totals.grand_total, dec!(-150));
    }

    #[test]
    fn aggregate_saturates_instead_of_overflowing() {
        let half = Decimal::MAX / dec!(2);
        let lines = [line(half, dec!(0), dec!(0), dec!(0)); 3];

        let totals = aggregate(&lines, &InvoiceAdjustments::default());

        assert_eq!(totals.sub_total, Decimal::MAX);
    }

    // =========================================================================
    // checked_aggregate tests
    // =========================================================================

    #[test]
    fn checked_aggregate_matches_aggregate_in_range() {
        let lines = [
            line(dec!(1000), dec!(90), dec!(90), dec!(0)),
            line(dec!(400), dec!(0), dec!(0), dec!(72)),
        ];
        let adjustments = InvoiceAdjustments::new(dec!(100), dec!(50));

        assert_eq!(
            checked_aggregate(&lines, &adjustments),
            Some(aggregate(&lines, &adjustments))
        );
    }

    #[test]
    fn checked_aggregate_rejects_overflowing_sub_total() {
        let half = Decimal::MAX / dec!(2);
        let lines = [line(half, dec!(0), dec!(0), dec!(0)); 3];

        assert_eq!(checked_aggregate(&lines, &InvoiceAdjustments::default()), None);
    }

    #[test]
    fn checked_aggregate_rejects_overflowing_freight() {
        let lines = [line(Decimal::MAX, dec!(0), dec!(0), dec!(0))];

        assert_eq!(
            checked_aggregate(&lines, &InvoiceAdjustments::new(dec!(1), dec!(0))),
            None
        );
    }
}
