//! Command-line definition for `invoice-calc` and its merge with the config
//! file.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Parser;
use invoice_core::display::parse_decimal;
use invoice_core::{InvoiceAdjustments, InvoiceKind, UnknownInvoiceKind};
use rust_decimal::Decimal;

use crate::app::{PurchaseOrderSource, RunOptions};
use crate::config::AppConfig;
use crate::report::OutputFormat;

/// Invoice line-item tax and total calculator.
///
/// Loads line items from CSV, validates them (and, for PO-based invoices,
/// checks them against the purchase order), then prints the CGST/SGST/IGST
/// breakdown and invoice totals.
#[derive(Debug, Parser)]
#[command(name = "invoice-calc", version, about)]
pub struct Cli {
    /// CSV file with the invoice lines.
    #[arg(short, long)]
    pub lines: PathBuf,

    /// Invoice kind: `po` or `direct`. Defaults to the config value.
    #[arg(short, long, value_parser = parse_kind)]
    pub kind: Option<InvoiceKind>,

    /// CSV file with the purchase order lines (PO-based invoices).
    #[arg(long, requires_all = ["po_number", "po_date"])]
    pub po_lines: Option<PathBuf>,

    /// Purchase order number.
    #[arg(long)]
    pub po_number: Option<String>,

    /// Purchase order date (YYYY-MM-DD).
    #[arg(long)]
    pub po_date: Option<NaiveDate>,

    /// Invoice number shown on the report.
    #[arg(long, default_value = "DRAFT")]
    pub invoice_number: String,

    /// Invoice date (YYYY-MM-DD). Defaults to today.
    #[arg(long)]
    pub invoice_date: Option<NaiveDate>,

    /// Header-level freight charges, e.g. `1,250.00`.
    #[arg(long, value_parser = parse_decimal)]
    pub freight: Option<Decimal>,

    /// Header-level discount amount.
    #[arg(long, value_parser = parse_decimal)]
    pub discount: Option<Decimal>,

    /// Output format. Defaults to the config value.
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Config file. Without it `invoice-calc.toml` is used when present.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Log level or filter directive; overrides RUST_LOG and the config.
    #[arg(long)]
    pub log_level: Option<String>,

    /// Also append log output to this file.
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

fn parse_kind(s: &str) -> Result<InvoiceKind, UnknownInvoiceKind> {
    InvoiceKind::try_from(s.to_string())
}

impl Cli {
    /// Merges flags over `config`. A flag always wins; a missing flag falls
    /// back to the config value. `today` is used when no invoice date is
    /// given.
    pub fn run_options(
        &self,
        config: &AppConfig,
        today: NaiveDate,
    ) -> RunOptions {
        let defaults = config.invoice.adjustments();
        let adjustments = InvoiceAdjustments::new(
            self.freight.unwrap_or(defaults.freight_charges),
            self.discount.unwrap_or(defaults.discount_amount),
        );

        // Handing over PO lines implies a PO-based invoice
        let kind = match (self.kind, &self.po_lines) {
            (Some(kind), _) => kind,
            (None, Some(_)) => InvoiceKind::PoBased,
            (None, None) => config.invoice.default_kind,
        };

        let purchase_order = match (&self.po_lines, &self.po_number, self.po_date) {
            (Some(lines_path), Some(po_number), Some(po_date)) => Some(PurchaseOrderSource {
                po_number: po_number.clone(),
                po_date,
                lines_path: lines_path.clone(),
            }),
            _ => None,
        };

        RunOptions {
            lines_path: self.lines.clone(),
            kind,
            purchase_order,
            invoice_number: self.invoice_number.clone(),
            invoice_date: self.invoice_date.unwrap_or(today),
            adjustments,
            format: self.format.unwrap_or(config.output.format),
        }
    }
}
