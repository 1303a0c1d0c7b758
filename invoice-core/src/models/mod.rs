mod invoice;
mod purchase_order;
mod supply_type;

pub use invoice::{InvoiceDraft, InvoiceKind, InvoiceLine, UnknownInvoiceKind};
pub use purchase_order::{PurchaseOrder, PurchaseOrderLine};
pub use supply_type::SupplyType;
