pub mod calculations;
pub mod display;
pub mod models;
pub mod validation;

pub use calculations::{
    ComputedInvoice, InvoiceAdjustments, InvoiceLineCalculator, InvoiceTotals, LineItemInput,
    LineItemResult,
};
pub use models::*;
pub use validation::{ValidationError, ValidationErrors};
