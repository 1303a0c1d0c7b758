//! Glue between the command line, the loaders and the calculator.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use invoice_core::validation::validate_draft;
use invoice_core::{
    InvoiceAdjustments, InvoiceDraft, InvoiceKind, InvoiceLineCalculator, PurchaseOrder,
    ValidationErrors,
};
use tracing::{debug, info};

use crate::csv_loader;
use crate::report::{self, OutputFormat};

/// Where to find the purchase order for a PO-based invoice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurchaseOrderSource {
    pub po_number: String,
    pub po_date: NaiveDate,
    pub lines_path: PathBuf,
}

/// Everything needed to build and compute one invoice, after flags and
/// config have been merged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    pub lines_path: PathBuf,
    pub kind: InvoiceKind,
    pub purchase_order: Option<PurchaseOrderSource>,
    pub invoice_number: String,
    pub invoice_date: NaiveDate,
    pub adjustments: InvoiceAdjustments,
    pub format: OutputFormat,
}

/// Loads the CSV inputs and assembles an invoice draft.
pub fn build_draft(options: &RunOptions) -> Result<InvoiceDraft> {
    let lines = csv_loader::load_lines_from_file(&options.lines_path)
        .with_context(|| format!("failed to load lines from {}", options.lines_path.display()))?;

    let purchase_order = match (&options.purchase_order, options.kind) {
        (Some(source), _) => {
            let po_lines = csv_loader::load_po_lines_from_file(&source.lines_path)
                .with_context(|| {
                    format!(
                        "failed to load purchase order lines from {}",
                        source.lines_path.display()
                    )
                })?;
            Some(PurchaseOrder {
                po_number: source.po_number.clone(),
                po_date: source.po_date,
                lines: po_lines,
            })
        }
        (None, InvoiceKind::PoBased) => {
            bail!("PO-based invoices need --po-lines, --po-number and --po-date")
        }
        (None, InvoiceKind::Direct) => None,
    };

    debug!(
        lines = lines.len(),
        kind = options.kind.as_str(),
        "assembled invoice draft"
    );

    Ok(InvoiceDraft {
        invoice_number: options.invoice_number.clone(),
        kind: options.kind,
        invoice_date: options.invoice_date,
        purchase_order,
        lines,
        adjustments: options.adjustments,
    })
}

/// Outcome of [`process`].
#[derive(Debug)]
pub enum Outcome {
    Rendered(String),
    Invalid(ValidationErrors),
}

/// Validates and computes a draft, rendering it in the requested format.
pub fn process(
    draft: &InvoiceDraft,
    format: OutputFormat,
) -> Result<Outcome> {
    if let Err(errors) = validate_draft(draft) {
        return Ok(Outcome::Invalid(errors));
    }

    let invoice = InvoiceLineCalculator::compute_invoice(&draft.lines, &draft.adjustments);
    info!(
        invoice = %draft.invoice_number,
        lines = invoice.lines.len(),
        grand_total = %invoice.totals.grand_total,
        "computed invoice"
    );

    let rendered = match format {
        OutputFormat::Table => report::render_table(draft, &invoice),
        OutputFormat::Csv => {
            let mut buf = Vec::new();
            report::write_csv(&invoice, &mut buf).context("failed to write CSV output")?;
            String::from_utf8(buf).context("CSV output was not valid UTF-8")?
        }
    };

    Ok(Outcome::Rendered(rendered))
}

/// Formats validation failures for the terminal: a summary line followed by
/// one indented line per failure.
pub fn describe_failures(errors: &ValidationErrors) -> String {
    let mut out = format!("error: {errors}\n");
    for e in errors.iter() {
        out.push_str("  - ");
        out.push_str(&e.to_string());
        out.push('\n');
    }
    out
}

/// Builds, validates and renders in one step.
pub fn run(options: &RunOptions) -> Result<Outcome> {
    let draft = build_draft(options)?;
    process(&draft, options.format)
}
