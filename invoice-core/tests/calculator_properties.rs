//! Property-based tests for the invoice line calculator.
//!
//! Inputs are generated as exact decimals (integer minor units and whole or
//! half-percent rates) so every property can be checked with exact equality.

use invoice_core::calculations::{
    InvoiceAdjustments, InvoiceLineCalculator, LineItemInput, LineItemResult,
};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ── Strategies ──────────────────────────────────────────────────────────────

/// 0.001 to 9,999.999 units.
fn arb_quantity() -> impl Strategy<Value = Decimal> {
    (0i64..10_000_000i64).prop_map(|milli| Decimal::new(milli, 3))
}

/// 0.00 to 9,99,999.99 rupees.
fn arb_price() -> impl Strategy<Value = Decimal> {
    (0i64..100_000_000i64).prop_map(|paise| Decimal::new(paise, 2))
}

/// 0% to 100% in half-percent steps, or absent.
fn arb_rate() -> impl Strategy<Value = Option<Decimal>> {
    prop::option::of((0i64..=200i64).prop_map(|halves| Decimal::new(halves * 5, 1)))
}

fn arb_other_charges() -> impl Strategy<Value = Option<Decimal>> {
    prop::option::of((0i64..1_000_000i64).prop_map(|paise| Decimal::new(paise, 2)))
}

fn arb_input() -> impl Strategy<Value = LineItemInput> {
    (
        arb_quantity(),
        arb_price(),
        arb_other_charges(),
        arb_rate(),
        arb_rate(),
        arb_rate(),
        arb_rate(),
    )
        .prop_map(
            |(quantity, unit_price, other_charges, cgst, sgst, igst, other)| LineItemInput {
                quantity,
                unit_price,
                other_charges,
                cgst_rate: cgst,
                sgst_rate: sgst,
                igst_rate: igst,
                other_tax_rate: other,
            },
        )
}

fn arb_adjustment() -> impl Strategy<Value = Decimal> {
    (0i64..10_000_000i64).prop_map(|paise| Decimal::new(paise, 2))
}

/// Any representable decimal, including values near `Decimal::MAX`.
fn arb_any_decimal() -> impl Strategy<Value = Decimal> {
    (any::<u32>(), any::<u32>(), any::<u32>(), any::<bool>(), 0u32..=28u32)
        .prop_map(|(lo, mid, hi, negative, scale)| Decimal::from_parts(lo, mid, hi, negative, scale))
}

fn arb_any_input() -> impl Strategy<Value = LineItemInput> {
    (
        arb_any_decimal(),
        arb_any_decimal(),
        prop::option::of(arb_any_decimal()),
        prop::option::of(arb_any_decimal()),
        prop::option::of(arb_any_decimal()),
    )
        .prop_map(|(quantity, unit_price, other_charges, cgst, igst)| LineItemInput {
            quantity,
            unit_price,
            other_charges,
            cgst_rate: cgst,
            sgst_rate: cgst,
            igst_rate: igst,
            other_tax_rate: None,
        })
}

// ── Properties ──────────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn line_total_equals_base_minus_charges_plus_tax(input in arb_input()) {
        let result = InvoiceLineCalculator::compute_line(&input);
        let other_charges = input.other_charges.unwrap_or(Decimal::ZERO);

        prop_assert_eq!(
            result.total_amount,
            result.base_amount - other_charges + result.total_tax_amount
        );
    }

    #[test]
    fn total_tax_is_sum_of_components(input in arb_input()) {
        let result = InvoiceLineCalculator::compute_line(&input);

        prop_assert_eq!(
            result.total_tax_amount,
            result.cgst_amount + result.sgst_amount + result.igst_amount + result.other_tax_amount
        );
    }

    #[test]
    fn zero_rates_mean_no_tax(
        quantity in arb_quantity(),
        unit_price in arb_price(),
        other_charges in arb_other_charges(),
    ) {
        let input = LineItemInput {
            quantity,
            unit_price,
            other_charges,
            cgst_rate: Some(Decimal::ZERO),
            sgst_rate: None,
            igst_rate: Some(Decimal::ZERO),
            other_tax_rate: None,
        };

        let result = InvoiceLineCalculator::compute_line(&input);

        prop_assert_eq!(result.total_tax_amount, Decimal::ZERO);
        prop_assert_eq!(result.total_amount, result.taxable_amount);
    }

    #[test]
    fn doubling_quantity_doubles_total_without_other_charges(input in arb_input()) {
        let single = LineItemInput { other_charges: None, ..input };
        let double = LineItemInput { quantity: single.quantity * Decimal::TWO, ..single.clone() };

        let single_total = InvoiceLineCalculator::compute_line(&single).total_amount;
        let double_total = InvoiceLineCalculator::compute_line(&double).total_amount;

        prop_assert_eq!(double_total, single_total * Decimal::TWO);
    }

    #[test]
    fn compute_line_is_deterministic(input in arb_input()) {
        prop_assert_eq!(
            InvoiceLineCalculator::compute_line(&input),
            InvoiceLineCalculator::compute_line(&input)
        );
    }

    #[test]
    fn invoice_totals_aggregate_lines_exactly(
        inputs in prop::collection::vec(arb_input(), 0..20),
        freight in arb_adjustment(),
        discount in arb_adjustment(),
    ) {
        let lines: Vec<LineItemResult> = inputs
            .iter()
            .map(InvoiceLineCalculator::compute_line)
            .collect();

        let totals = InvoiceLineCalculator::compute_invoice_totals(
            &lines,
            &InvoiceAdjustments::new(freight, discount),
        );

        let sub_total: Decimal = lines.iter().map(|l| l.base_amount).sum();
        let tax_amount: Decimal = lines.iter().map(|l| l.total_tax_amount).sum();

        prop_assert_eq!(totals.sub_total, sub_total);
        prop_assert_eq!(totals.tax_amount, tax_amount);
        prop_assert_eq!(totals.grand_total, sub_total + tax_amount + freight - discount);
        prop_assert_eq!(
            totals.tax_breakdown.cgst_amount
                + totals.tax_breakdown.sgst_amount
                + totals.tax_breakdown.igst_amount
                + totals.tax_breakdown.other_tax_amount,
            tax_amount
        );
    }
}

proptest! {
    #[test]
    fn compute_line_never_panics(input in arb_any_input()) {
        let result = InvoiceLineCalculator::compute_line(&input);

        if let Some(checked) = InvoiceLineCalculator::try_compute_line(&input) {
            prop_assert_eq!(checked, result);
        }
    }

    #[test]
    fn checked_calculation_agrees_in_everyday_range(input in arb_input()) {
        prop_assert_eq!(
            InvoiceLineCalculator::try_compute_line(&input),
            Some(InvoiceLineCalculator::compute_line(&input))
        );
    }
}

// ── Fixed examples ──────────────────────────────────────────────────────────

#[test]
fn worked_example_line() {
    let input = LineItemInput {
        quantity: dec!(10),
        unit_price: dec!(100),
        other_charges: Some(dec!(50)),
        cgst_rate: Some(dec!(9)),
        sgst_rate: Some(dec!(9)),
        igst_rate: Some(dec!(0)),
        other_tax_rate: Some(dec!(0)),
    };

    let result = InvoiceLineCalculator::compute_line(&input);

    assert_eq!(result.base_amount, dec!(1000));
    assert_eq!(result.taxable_amount, dec!(950));
    assert_eq!(result.cgst_amount, dec!(85.5));
    assert_eq!(result.sgst_amount, dec!(85.5));
    assert_eq!(result.igst_amount, dec!(0));
    assert_eq!(result.total_tax_amount, dec!(171));
    assert_eq!(result.total_amount, dec!(1121));
}

#[test]
fn header_adjustments_fixture() {
    let first = InvoiceLineCalculator::compute_line(
        &LineItemInput::new(dec!(10), dec!(100))
            .with_other_charges(dec!(50))
            .with_cgst_sgst(dec!(9), dec!(9)),
    );
    let second = InvoiceLineCalculator::compute_line(
        &LineItemInput::new(dec!(4), dec!(100)).with_igst(dec!(25)),
    );
    assert_eq!(first.total_amount, dec!(1121));
    assert_eq!(second.total_amount, dec!(500));

    let totals = InvoiceLineCalculator::compute_invoice_totals(
        &[first, second],
        &InvoiceAdjustments::new(dec!(100), dec!(50)),
    );

    // 1400 + 271 + 100 - 50
    assert_eq!(totals.sub_total, dec!(1400));
    assert_eq!(totals.tax_amount, dec!(271));
    assert_eq!(totals.grand_total, dec!(1721));
}

#[test]
fn empty_invoice_totals_are_zero() {
    let totals = InvoiceLineCalculator::compute_invoice_totals(&[], &InvoiceAdjustments::default());

    assert_eq!(totals.sub_total, Decimal::ZERO);
    assert_eq!(totals.tax_amount, Decimal::ZERO);
    assert_eq!(totals.grand_total, Decimal::ZERO);
}

#[test]
fn negative_quantity_is_computed_not_rejected() {
    let result = InvoiceLineCalculator::compute_line(&LineItemInput::new(dec!(-1), dec!(250)));

    assert_eq!(result.base_amount, dec!(-250));
    assert_eq!(result.total_amount, dec!(-250));
}
