use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::max;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseOrderLine {
    pub item_code: String,
    pub ordered_quantity: Decimal,
    /// Quantity already billed on earlier invoices against this PO.
    pub invoiced_quantity: Decimal,
}

impl PurchaseOrderLine {
    /// Quantity still open for invoicing, never below zero.
    pub fn remaining_quantity(&self) -> Decimal {
        max(
            self.ordered_quantity.saturating_sub(self.invoiced_quantity),
            Decimal::ZERO,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseOrder {
    pub po_number: String,
    pub po_date: NaiveDate,
    pub lines: Vec<PurchaseOrderLine>,
}

impl PurchaseOrder {
    pub fn find_line(
        &self,
        item_code: &str,
    ) -> Option<&PurchaseOrderLine> {
        self.lines.iter().find(|l| l.item_code == item_code)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn po_line(
        ordered: Decimal,
        invoiced: Decimal,
    ) -> PurchaseOrderLine {
        PurchaseOrderLine {
            item_code: "ITM-001".to_string(),
            ordered_quantity: ordered,
            invoiced_quantity: invoiced,
        }
    }

    #[test]
    fn remaining_quantity_subtracts_invoiced() {
        assert_eq!(po_line(dec!(100), dec!(35)).remaining_quantity(), dec!(65));
    }

    #[test]
    fn remaining_quantity_is_zero_when_fully_invoiced() {
        assert_eq!(po_line(dec!(10), dec!(10)).remaining_quantity(), dec!(0));
    }

    #[test]
    fn remaining_quantity_never_negative() {
        assert_eq!(po_line(dec!(10), dec!(12)).remaining_quantity(), dec!(0));
    }

    #[test]
    fn find_line_matches_item_code() {
        let po = PurchaseOrder {
            po_number: "PO-2024-0007".to_string(),
            po_date: NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
            lines: vec![po_line(dec!(5), dec!(0))],
        };

        assert!(po.find_line("ITM-001").is_some());
        assert!(po.find_line("ITM-999").is_none());
    }
}
