//! Shared arithmetic helpers for invoice calculations.
//!
//! The calculator itself never rounds. [`round_half_up`] exists for the
//! presentation layer, which rounds to currency minor units only after all
//! aggregation is done.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// Values at exactly 0.005 are rounded away from zero, matching the way
/// amounts are rendered for display in INR.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use invoice_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(85.454)), dec!(85.45));
/// assert_eq!(round_half_up(dec!(85.455)), dec!(85.46));
/// assert_eq!(round_half_up(dec!(-85.455)), dec!(-85.46)); // Away from zero
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Applies a percentage rate to an amount: `amount * rate / 100`.
///
/// The multiplication happens before the division so that exact inputs
/// stay exact for every rate with at most two fractional digits. A product
/// beyond the range of [`Decimal`] saturates instead of panicking; use
/// [`checked_percent_of`] to detect that case.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use invoice_core::calculations::common::percent_of;
///
/// assert_eq!(percent_of(dec!(950), dec!(9)), dec!(85.5));
/// assert_eq!(percent_of(dec!(950), dec!(0)), dec!(0));
/// ```
pub fn percent_of(
    amount: Decimal,
    rate: Decimal,
) -> Decimal {
    amount.saturating_mul(rate) / Decimal::ONE_HUNDRED
}

/// Like [`percent_of`], but returns `None` when the product overflows.
///
/// # Examples
///
/// ```
/// use rust_decimal::Decimal;
/// use rust_decimal_macros::dec;
/// use invoice_core::calculations::common::checked_percent_of;
///
/// assert_eq!(checked_percent_of(dec!(950), dec!(9)), Some(dec!(85.5)));
/// assert_eq!(checked_percent_of(Decimal::MAX, dec!(18)), None);
/// ```
pub fn checked_percent_of(
    amount: Decimal,
    rate: Decimal,
) -> Option<Decimal> {
    amount.checked_mul(rate)?.checked_div(Decimal::ONE_HUNDRED)
}

/// Returns the maximum of two decimal values.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use invoice_core::calculations::common::max;
///
/// assert_eq!(max(dec!(-5), dec!(0)), dec!(0));
/// assert_eq!(max(dec!(12.5), dec!(3)), dec!(12.5));
/// ```
pub fn max(
    a: Decimal,
    b: Decimal,
) -> Decimal {
    if a > b { a } else { b }
}
