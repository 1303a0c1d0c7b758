//! Form-level validation that runs before the calculator.
//!
//! The calculator accepts any numbers. Everything that reflects user intent
//! (positive quantities, PO ceilings, date ordering, rate ranges) is checked
//! here so that bad input never reaches it.

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::debug;

use crate::calculations::{InvoiceAdjustments, InvoiceLineCalculator, LineItemInput};
use crate::models::{InvoiceDraft, InvoiceKind, InvoiceLine, PurchaseOrder, SupplyType};

/// A single validation failure. Line-level variants carry the 1-based line
/// number shown on the form.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("invoice number is required")]
    MissingInvoiceNumber,

    #[error("invoice has no lines")]
    NoLines,

    #[error("line number {0} appears more than once")]
    DuplicateLineNumber(u32),

    #[error("PO-based invoice requires a purchase order")]
    MissingPurchaseOrder,

    #[error("direct invoice must not reference a purchase order")]
    UnexpectedPurchaseOrder,

    #[error("invoice date {invoice_date} is before PO date {po_date}")]
    InvoiceDateBeforePoDate {
        invoice_date: NaiveDate,
        po_date: NaiveDate,
    },

    #[error("line {line}: quantity must be greater than zero, got {quantity}")]
    NonPositiveQuantity { line: u32, quantity: Decimal },

    #[error("line {line}: unit price must be non-negative, got {unit_price}")]
    NegativeUnitPrice { line: u32, unit_price: Decimal },

    #[error("line {line}: other charges must be non-negative, got {other_charges}")]
    NegativeOtherCharges { line: u32, other_charges: Decimal },

    #[error("line {line}: other charges {other_charges} exceed base amount {base_amount}")]
    OtherChargesExceedBase {
        line: u32,
        other_charges: Decimal,
        base_amount: Decimal,
    },

    #[error("line {line}: {tax} rate must be between 0 and 100, got {rate}")]
    RateOutOfRange {
        line: u32,
        tax: &'static str,
        rate: Decimal,
    },

    #[error("line {line}: CGST/SGST and IGST cannot both be charged")]
    MixedGstComponents { line: u32 },

    #[error("line {line}: amounts are too large to compute")]
    AmountOutOfRange { line: u32 },

    #[error("line {line}: item code is required for PO-based invoices")]
    MissingItemCode { line: u32 },

    #[error("line {line}: item '{item_code}' is not on purchase order {po_number}")]
    ItemNotOnPurchaseOrder {
        line: u32,
        item_code: String,
        po_number: String,
    },

    #[error("line {line}: invoice quantity {quantity} exceeds remaining PO quantity {remaining}")]
    ExceedsRemainingQuantity {
        line: u32,
        quantity: Decimal,
        remaining: Decimal,
    },

    #[error("freight charges must be non-negative, got {0}")]
    NegativeFreightCharges(Decimal),

    #[error("discount amount must be non-negative, got {0}")]
    NegativeDiscount(Decimal),

    #[error("invoice totals are too large to compute")]
    InvoiceTotalOutOfRange,
}

/// Every failure found in a draft, in the order they were detected.
#[derive(Debug, Clone, Default, Error, PartialEq, Eq)]
#[error("invoice failed validation with {} error(s)", .0.len())]
pub struct ValidationErrors(pub Vec<ValidationError>);

impl ValidationErrors {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.0.iter()
    }
}

/// Checks the numeric fields of one line.
///
/// # Errors
///
/// Returns the first [`ValidationError`] found, checking quantity, unit
/// price, other charges, rates, GST component consistency and finally that
/// every amount of the line fits in a [`Decimal`].
pub fn validate_line(
    line_number: u32,
    input: &LineItemInput,
) -> Result<(), ValidationError> {
    if input.quantity <= Decimal::ZERO {
        return Err(ValidationError::NonPositiveQuantity {
            line: line_number,
            quantity: input.quantity,
        });
    }
    if input.unit_price < Decimal::ZERO {
        return Err(ValidationError::NegativeUnitPrice {
            line: line_number,
            unit_price: input.unit_price,
        });
    }

    let other_charges = input.other_charges_or_zero();
    if other_charges < Decimal::ZERO {
        return Err(ValidationError::NegativeOtherCharges {
            line: line_number,
            other_charges,
        });
    }
    let base_amount = input
        .quantity
        .checked_mul(input.unit_price)
        .ok_or(ValidationError::AmountOutOfRange { line: line_number })?;
    if other_charges > base_amount {
        return Err(ValidationError::OtherChargesExceedBase {
            line: line_number,
            other_charges,
            base_amount,
        });
    }

    let rates = [
        ("CGST", input.cgst_rate),
        ("SGST", input.sgst_rate),
        ("IGST", input.igst_rate),
        ("other tax", input.other_tax_rate),
    ];
    for (tax, rate) in rates {
        if let Some(rate) = rate {
            if rate < Decimal::ZERO || rate > Decimal::ONE_HUNDRED {
                return Err(ValidationError::RateOutOfRange {
                    line: line_number,
                    tax,
                    rate,
                });
            }
        }
    }

    if SupplyType::classify(input) == SupplyType::Mixed {
        return Err(ValidationError::MixedGstComponents { line: line_number });
    }

    if InvoiceLineCalculator::try_compute_line(input).is_none() {
        return Err(ValidationError::AmountOutOfRange { line: line_number });
    }

    Ok(())
}

/// Checks a line of a PO-based invoice against its purchase order.
///
/// `already_claimed` is the quantity of the same item taken by earlier
/// lines of this invoice.
///
/// # Errors
///
/// - [`ValidationError::MissingItemCode`] when the line has no item code
/// - [`ValidationError::ItemNotOnPurchaseOrder`] when the PO has no such item
/// - [`ValidationError::ExceedsRemainingQuantity`] when the claimed quantity
///   goes past what is still open on the PO line
pub fn validate_against_purchase_order(
    line: &InvoiceLine,
    purchase_order: &PurchaseOrder,
    already_claimed: Decimal,
) -> Result<(), ValidationError> {
    let item_code = line
        .item_code
        .as_deref()
        .filter(|code| !code.trim().is_empty())
        .ok_or(ValidationError::MissingItemCode {
            line: line.line_number,
        })?;

    let po_line = purchase_order.find_line(item_code).ok_or_else(|| {
        ValidationError::ItemNotOnPurchaseOrder {
            line: line.line_number,
            item_code: item_code.to_string(),
            po_number: purchase_order.po_number.clone(),
        }
    })?;

    let quantity = already_claimed
        .checked_add(line.input.quantity)
        .ok_or(ValidationError::AmountOutOfRange {
            line: line.line_number,
        })?;
    let remaining = po_line.remaining_quantity();
    if quantity > remaining {
        return Err(ValidationError::ExceedsRemainingQuantity {
            line: line.line_number,
            quantity,
            remaining,
        });
    }

    Ok(())
}

/// Checks invoice-wide freight and discount.
pub fn validate_adjustments(adjustments: &InvoiceAdjustments) -> Result<(), ValidationError> {
    if adjustments.freight_charges < Decimal::ZERO {
        return Err(ValidationError::NegativeFreightCharges(
            adjustments.freight_charges,
        ));
    }
    if adjustments.discount_amount < Decimal::ZERO {
        return Err(ValidationError::NegativeDiscount(
            adjustments.discount_amount,
        ));
    }
    Ok(())
}

/// Validates a whole draft, collecting every failure.
///
/// Header checks run first, then each line in order. A line that fails
/// [`validate_line`] is not checked against the purchase order. When every
/// line passes, the invoice totals are checked to fit in a [`Decimal`].
///
/// # Errors
///
/// Returns [`ValidationErrors`] listing every failure when any check fails.
pub fn validate_draft(draft: &InvoiceDraft) -> Result<(), ValidationErrors> {
    let mut errors = Vec::new();

    if draft.invoice_number.trim().is_empty() {
        errors.push(ValidationError::MissingInvoiceNumber);
    }
    if draft.lines.is_empty() {
        errors.push(ValidationError::NoLines);
    }

    let mut seen = HashSet::new();
    for line in &draft.lines {
        if !seen.insert(line.line_number) {
            errors.push(ValidationError::DuplicateLineNumber(line.line_number));
        }
    }

    let purchase_order = match (draft.kind, &draft.purchase_order) {
        (InvoiceKind::PoBased, None) => {
            errors.push(ValidationError::MissingPurchaseOrder);
            None
        }
        (InvoiceKind::PoBased, Some(po)) => {
            if draft.invoice_date < po.po_date {
                errors.push(ValidationError::InvoiceDateBeforePoDate {
                    invoice_date: draft.invoice_date,
                    po_date: po.po_date,
                });
            }
            Some(po)
        }
        (InvoiceKind::Direct, Some(_)) => {
            errors.push(ValidationError::UnexpectedPurchaseOrder);
            None
        }
        (InvoiceKind::Direct, None) => None,
    };

    if let Err(e) = validate_adjustments(&draft.adjustments) {
        errors.push(e);
    }

    let mut claimed: HashMap<&str, Decimal> = HashMap::new();
    let mut results = Vec::with_capacity(draft.lines.len());
    for line in &draft.lines {
        if let Err(e) = validate_line(line.line_number, &line.input) {
            errors.push(e);
            continue;
        }
        results.extend(InvoiceLineCalculator::try_compute_line(&line.input));

        if let Some(po) = purchase_order {
            let key = line.item_code.as_deref().unwrap_or_default();
            let already_claimed = claimed.get(key).copied().unwrap_or(Decimal::ZERO);
            match validate_against_purchase_order(line, po, already_claimed) {
                Ok(()) => {
                    claimed.insert(key, already_claimed.saturating_add(line.input.quantity));
                }
                Err(e) => errors.push(e),
            }
        }
    }

    if results.len() == draft.lines.len()
        && InvoiceLineCalculator::try_compute_invoice_totals(&results, &draft.adjustments).is_none()
    {
        errors.push(ValidationError::InvoiceTotalOutOfRange);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        debug!(
            invoice = %draft.invoice_number,
            errors = errors.len(),
            "invoice draft failed validation"
        );
        Err(ValidationErrors(errors))
    }
}
