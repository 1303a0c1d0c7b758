use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::LineItemInput;

/// How a line's GST is split between components.
///
/// Intra-state supplies carry CGST and SGST; inter-state supplies carry
/// IGST. The calculator sums whatever it is given, so this classification
/// is only used to flag inconsistent rate entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SupplyType {
    IntraState,
    InterState,
    Exempt,
    Mixed,
}

impl SupplyType {
    pub fn classify(input: &LineItemInput) -> Self {
        let intra = input.cgst_rate_or_zero() > Decimal::ZERO
            || input.sgst_rate_or_zero() > Decimal::ZERO;
        let inter = input.igst_rate_or_zero() > Decimal::ZERO;

        match (intra, inter) {
            (true, true) => Self::Mixed,
            (true, false) => Self::IntraState,
            (false, true) => Self::InterState,
            (false, false) => Self::Exempt,
        }
    }
}
