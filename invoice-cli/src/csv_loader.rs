//! CSV loaders for invoice lines and purchase order lines.
//!
//! Headers are matched by name, so column order does not matter. Values are
//! trimmed; empty optional cells are treated as absent.
//!
//! ## Invoice lines
//!
//! | Column           | Required | Type    | Notes |
//! |------------------|----------|---------|-------|
//! | `line_number`    | no       | integer | Defaults to the 1-based row number |
//! | `description`    | yes      | string  | Must not be blank |
//! | `item_code`      | no       | string  | Required later for PO-based invoices |
//! | `quantity`       | yes      | decimal | |
//! | `unit_price`     | yes      | decimal | |
//! | `other_charges`  | no       | decimal | Deducted before tax |
//! | `cgst_rate`      | no       | decimal | Percent, e.g. `9` |
//! | `sgst_rate`      | no       | decimal | Percent |
//! | `igst_rate`      | no       | decimal | Percent |
//! | `other_tax_rate` | no       | decimal | Percent |
//!
//! ```csv
//! line_number,description,item_code,quantity,unit_price,other_charges,cgst_rate,sgst_rate,igst_rate,other_tax_rate
//! 1,Laptop,LAPTOP,2,45000.00,500,9,9,,
//! 2,Wireless mouse,MOUSE,10,450.00,,,,18,
//! ```
//!
//! ## Purchase order lines
//!
//! | Column              | Required | Type    |
//! |---------------------|----------|---------|
//! | `item_code`         | yes      | string  |
//! | `ordered_quantity`  | yes      | decimal |
//! | `invoiced_quantity` | no       | decimal |

use std::io::Read;
use std::path::{Path, PathBuf};

use invoice_core::{InvoiceLine, LineItemInput, PurchaseOrderLine};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct LineRow {
    line_number: Option<u32>,
    description: String,
    item_code: Option<String>,
    quantity: Decimal,
    unit_price: Decimal,
    other_charges: Option<Decimal>,
    cgst_rate: Option<Decimal>,
    sgst_rate: Option<Decimal>,
    igst_rate: Option<Decimal>,
    other_tax_rate: Option<Decimal>,
}

#[derive(Debug, Deserialize)]
struct PoLineRow {
    item_code: String,
    ordered_quantity: Decimal,
    invoiced_quantity: Option<Decimal>,
}

/// Errors that can occur while loading CSV data.
#[derive(Debug, thiserror::Error)]
pub enum CsvLoadError {
    /// Bad structure, missing required column, type mismatch, etc.
    #[error("CSV parse error: {0}")]
    Parse(#[from] csv::Error),

    #[error("cannot read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// `row` is 1-based, header excluded.
    #[error("row {row}: description must not be blank")]
    MissingDescription { row: usize },

    #[error("row {row}: item code must not be blank")]
    MissingItemCode { row: usize },
}

fn reader<R: Read>(input: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(false)
        .from_reader(input)
}

fn convert_line_row(
    row: LineRow,
    row_number: usize,
) -> Result<InvoiceLine, CsvLoadError> {
    if row.description.is_empty() {
        return Err(CsvLoadError::MissingDescription { row: row_number });
    }

    let line_number = match row.line_number {
        Some(n) => n,
        None => u32::try_from(row_number).unwrap_or(u32::MAX),
    };

    Ok(InvoiceLine {
        line_number,
        description: row.description,
        item_code: row.item_code.filter(|code| !code.is_empty()),
        input: LineItemInput {
            quantity: row.quantity,
            unit_price: row.unit_price,
            other_charges: row.other_charges,
            cgst_rate: row.cgst_rate,
            sgst_rate: row.sgst_rate,
            igst_rate: row.igst_rate,
            other_tax_rate: row.other_tax_rate,
        },
    })
}

/// Parses invoice lines from any reader. Rows are returned in file order.
///
/// # Errors
///
/// * [`CsvLoadError::Parse`] if the CSV is structurally invalid or a
///   required field cannot be deserialised.
/// * [`CsvLoadError::MissingDescription`] if a row has a blank description.
pub fn load_lines<R: Read>(input: R) -> Result<Vec<InvoiceLine>, CsvLoadError> {
    let lines = reader(input)
        .deserialize::<LineRow>()
        .enumerate()
        .map(|(idx, result)| convert_line_row(result?, idx + 1))
        .collect::<Result<Vec<_>, _>>()?;

    debug!(count = lines.len(), "loaded invoice lines");
    Ok(lines)
}

/// Parses invoice lines from CSV text.
pub fn load_lines_from_str(input: &str) -> Result<Vec<InvoiceLine>, CsvLoadError> {
    load_lines(input.as_bytes())
}

/// Reads a file from disk and delegates to [`load_lines`].
pub fn load_lines_from_file(path: &Path) -> Result<Vec<InvoiceLine>, CsvLoadError> {
    let file = open(path)?;
    load_lines(file)
}

/// Parses purchase order lines from any reader.
///
/// A missing `invoiced_quantity` means nothing has been invoiced yet.
pub fn load_po_lines<R: Read>(input: R) -> Result<Vec<PurchaseOrderLine>, CsvLoadError> {
    let lines = reader(input)
        .deserialize::<PoLineRow>()
        .enumerate()
        .map(|(idx, result)| {
            let row = result?;
            if row.item_code.is_empty() {
                return Err(CsvLoadError::MissingItemCode { row: idx + 1 });
            }
            Ok(PurchaseOrderLine {
                item_code: row.item_code,
                ordered_quantity: row.ordered_quantity,
                invoiced_quantity: row.invoiced_quantity.unwrap_or(Decimal::ZERO),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    debug!(count = lines.len(), "loaded purchase order lines");
    Ok(lines)
}

/// Parses purchase order lines from CSV text.
pub fn load_po_lines_from_str(input: &str) -> Result<Vec<PurchaseOrderLine>, CsvLoadError> {
    load_po_lines(input.as_bytes())
}

/// Reads a file from disk and delegates to [`load_po_lines`].
pub fn load_po_lines_from_file(path: &Path) -> Result<Vec<PurchaseOrderLine>, CsvLoadError> {
    let file = open(path)?;
    load_po_lines(file)
}

fn open(path: &Path) -> Result<std::fs::File, CsvLoadError> {
    std::fs::File::open(path).map_err(|source| CsvLoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}
