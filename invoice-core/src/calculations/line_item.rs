//! Line-item tax and total calculation.
//!
//! A line's breakdown is derived in a fixed order:
//!
//! | Step | Value | Formula |
//! |------|-------|---------|
//! | 1    | Base amount | quantity × unit price |
//! | 2    | Taxable amount | base amount − other charges |
//! | 3    | CGST / SGST / IGST / other tax | taxable amount × rate / 100 |
//! | 4    | Total tax | CGST + SGST + IGST + other tax |
//! | 5    | Line total | taxable amount + total tax |
//!
//! Other charges are deducted before any tax is applied, uniformly for all
//! four tax types. Nothing is rounded here; see
//! [`LineItemResult::rounded`] for display values.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::{checked_percent_of, percent_of, round_half_up};

/// One invoiceable line as entered by the user.
///
/// Absent charges and rates are treated as zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItemInput {
    pub quantity: Decimal,
    pub unit_price: Decimal,

    /// Deducted from the base amount before tax.
    pub other_charges: Option<Decimal>,

    // Percentages in [0, 100]
    pub cgst_rate: Option<Decimal>,
    pub sgst_rate: Option<Decimal>,
    pub igst_rate: Option<Decimal>,
    pub other_tax_rate: Option<Decimal>,
}

impl LineItemInput {
    /// Creates an input with the given quantity and unit price and no
    /// charges or taxes.
    pub fn new(
        quantity: Decimal,
        unit_price: Decimal,
    ) -> Self {
        Self {
            quantity,
            unit_price,
            ..Self::default()
        }
    }

    /// Sets the item-level other charges.
    pub fn with_other_charges(
        mut self,
        other_charges: Decimal,
    ) -> Self {
        self.other_charges = Some(other_charges);
        self
    }

    /// Sets intra-state CGST and SGST rates.
    pub fn with_cgst_sgst(
        mut self,
        cgst_rate: Decimal,
        sgst_rate: Decimal,
    ) -> Self {
        self.cgst_rate = Some(cgst_rate);
        self.sgst_rate = Some(sgst_rate);
        self
    }

    /// Sets the inter-state IGST rate.
    pub fn with_igst(
        mut self,
        igst_rate: Decimal,
    ) -> Self {
        self.igst_rate = Some(igst_rate);
        self
    }

    /// Sets the rate for any tax outside the GST components.
    pub fn with_other_tax(
        mut self,
        other_tax_rate: Decimal,
    ) -> Self {
        self.other_tax_rate = Some(other_tax_rate);
        self
    }

    pub fn other_charges_or_zero(&self) -> Decimal {
        self.other_charges.unwrap_or(Decimal::ZERO)
    }

    pub fn cgst_rate_or_zero(&self) -> Decimal {
        self.cgst_rate.unwrap_or(Decimal::ZERO)
    }

    pub fn sgst_rate_or_zero(&self) -> Decimal {
        self.sgst_rate.unwrap_or(Decimal::ZERO)
    }

    pub fn igst_rate_or_zero(&self) -> Decimal {
        self.igst_rate.unwrap_or(Decimal::ZERO)
    }

    pub fn other_tax_rate_or_zero(&self) -> Decimal {
        self.other_tax_rate.unwrap_or(Decimal::ZERO)
    }
}

/// Full-precision breakdown of a single line.
///
/// Always produced from scratch by
/// [`InvoiceLineCalculator::compute_line`](crate::calculations::InvoiceLineCalculator::compute_line);
/// never patched in place.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItemResult {
    pub base_amount: Decimal,
    pub taxable_amount: Decimal,
    pub cgst_amount: Decimal,
    pub sgst_amount: Decimal,
    pub igst_amount: Decimal,
    pub other_tax_amount: Decimal,
    pub total_tax_amount: Decimal,
    pub total_amount: Decimal,
}

impl LineItemResult {
    /// Returns a copy with every amount rounded to two decimal places.
    ///
    /// Intended for display only. Totals must be aggregated from the
    /// unrounded values.
    pub fn rounded(&self) -> Self {
        Self {
            base_amount: round_half_up(self.base_amount),
            taxable_amount: round_half_up(self.taxable_amount),
            cgst_amount: round_half_up(self.cgst_amount),
            sgst_amount: round_half_up(self.sgst_amount),
            igst_amount: round_half_up(self.igst_amount),
            other_tax_amount: round_half_up(self.other_tax_amount),
            total_tax_amount: round_half_up(self.total_tax_amount),
            total_amount: round_half_up(self.total_amount),
        }
    }
}

pub(crate) fn compute(input: &LineItemInput) -> LineItemResult {
    let base_amount = input.quantity.saturating_mul(input.unit_price);
    let taxable_amount = base_amount.saturating_sub(input.other_charges_or_zero());

    let cgst_amount = percent_of(taxable_amount, input.cgst_rate_or_zero());
    let sgst_amount = percent_of(taxable_amount, input.sgst_rate_or_zero());
    let igst_amount = percent_of(taxable_amount, input.igst_rate_or_zero());
    let other_tax_amount = percent_of(taxable_amount, input.other_tax_rate_or_zero());

    // Summation order is fixed for reproducible fixtures
    let total_tax_amount = cgst_amount
        .saturating_add(sgst_amount)
        .saturating_add(igst_amount)
        .saturating_add(other_tax_amount);
    let total_amount = taxable_amount.saturating_add(total_tax_amount);

    LineItemResult {
        base_amount,
        taxable_amount,
        cgst_amount,
        sgst_amount,
        igst_amount,
        other_tax_amount,
        total_tax_amount,
        total_amount,
    }
}

/// Same steps as [`compute`], returning `None` as soon as one overflows.
pub(crate) fn checked_compute(input: &LineItemInput) -> Option<LineItemResult> {
    let base_amount = input.quantity.checked_mul(input.unit_price)?;
    let taxable_amount = base_amount.checked_sub(input.other_charges_or_zero())?;

    let cgst_amount = checked_percent_of(taxable_amount, input.cgst_rate_or_zero())?;
    let sgst_amount = checked_percent_of(taxable_amount, input.sgst_rate_or_zero())?;
    let igst_amount = checked_percent_of(taxable_amount, input.igst_rate_or_zero())?;
    let other_tax_amount = checked_percent_of(taxable_amount, input.other_tax_rate_or_zero())?;

    let total_tax_amount = cgst_amount
        .checked_add(sgst_amount)?
        .checked_add(igst_amount)?
        .checked_add(other_tax_amount)?;
    let total_amount = taxable_amount.checked_add(total_tax_amount)?;

    Some(LineItemResult {
        base_amount,
        taxable_amount,
        cgst_amount,
        sgst_amount,
        igst_amount,
        other_tax_amount,
        total_tax_amount,
        total_amount,
    })
}
