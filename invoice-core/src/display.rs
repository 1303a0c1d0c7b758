//! Presentation helpers for INR amounts.
//!
//! Formatting follows the `en-IN` convention used on the invoice screens:
//! a leading `₹`, the last three integer digits grouped together and the
//! rest in pairs (`12,34,567`), and exactly two fraction digits.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::calculations::common::round_half_up;

const RUPEE: char = '₹';

/// Error returned when a string cannot be parsed as a [`Decimal`].
#[derive(Debug, Error)]
#[error("invalid decimal '{input}': {source}")]
pub struct ParseDecimalError {
    input: String,
    #[source]
    source: rust_decimal::Error,
}

/// Trims whitespace and drops the rupee sign and `,` grouping separators.
fn normalize_decimal_input(s: &str) -> String {
    s.trim()
        .trim_start_matches(RUPEE)
        .chars()
        .filter(|c| *c != ',')
        .collect::<String>()
        .trim()
        .to_string()
}

/// Parses an amount typed into a form field.
///
/// Accepts either western (`1,234.56`) or Indian (`1,23,456.78`) grouping
/// and an optional leading `₹`. Empty input is treated as 0.
pub fn parse_decimal(s: &str) -> Result<Decimal, ParseDecimalError> {
    let normalized = normalize_decimal_input(s);
    if normalized.is_empty() {
        return Ok(Decimal::ZERO);
    }
    normalized.parse().map_err(|e| {
        tracing::warn!(input = %s, "invalid decimal: {}", e);
        ParseDecimalError {
            input: s.to_string(),
            source: e,
        }
    })
}

/// Formats an amount as INR, e.g. `₹12,34,567.80` or `-₹50.00`.
///
/// The amount is rounded half away from zero to two places first.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use invoice_core::display::format_inr;
///
/// assert_eq!(format_inr(dec!(1121)), "₹1,121.00");
/// assert_eq!(format_inr(dec!(1234567.8)), "₹12,34,567.80");
/// assert_eq!(format_inr(dec!(-50)), "-₹50.00");
/// ```
pub fn format_inr(amount: Decimal) -> String {
    let rounded = round_half_up(amount);
    let sign = if rounded < Decimal::ZERO { "-" } else { "" };

    let digits = format!("{:.2}", rounded.abs());
    let (integer, fraction) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

    format!("{sign}{RUPEE}{}.{fraction}", group_indian(integer))
}

/// Formats a percentage rate without trailing zeros, e.g. `9%` or `2.5%`.
pub fn format_rate(rate: Decimal) -> String {
    format!("{}%", rate.normalize())
}

fn group_indian(integer: &str) -> String {
    if integer.len() <= 3 {
        return integer.to_string();
    }

    let (mut head, tail) = integer.split_at(integer.len() - 3);
    let mut groups = Vec::new();
    while head.len() > 2 {
        let (rest, pair) = head.split_at(head.len() - 2);
        groups.push(pair);
        head = rest;
    }
    if !head.is_empty() {
        groups.push(head);
    }
    groups.reverse();

    format!("{},{tail}", groups.join(","))
}
