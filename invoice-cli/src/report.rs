//! Rendering of computed invoices.
//!
//! The table format is for people: amounts are rounded and formatted as
//! INR. The CSV format is for other tools: amounts keep full precision.

use std::fmt::Write as _;
use std::io;

use clap::ValueEnum;
use invoice_core::display::{format_inr, format_rate};
use invoice_core::{ComputedInvoice, InvoiceDraft};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Csv,
}

#[derive(Debug, Serialize)]
struct CsvOutputRow<'a> {
    line_number: u32,
    description: &'a str,
    item_code: &'a str,
    base_amount: Decimal,
    taxable_amount: Decimal,
    cgst_amount: Decimal,
    sgst_amount: Decimal,
    igst_amount: Decimal,
    other_tax_amount: Decimal,
    total_tax_amount: Decimal,
    total_amount: Decimal,
}

/// Writes one CSV record per computed line, with a header row.
pub fn write_csv<W: io::Write>(
    invoice: &ComputedInvoice<'_>,
    writer: W,
) -> Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    for computed in &invoice.lines {
        let result = &computed.result;
        csv_writer.serialize(CsvOutputRow {
            line_number: computed.line.line_number,
            description: &computed.line.description,
            item_code: computed.line.item_code.as_deref().unwrap_or(""),
            base_amount: result.base_amount,
            taxable_amount: result.taxable_amount,
            cgst_amount: result.cgst_amount,
            sgst_amount: result.sgst_amount,
            igst_amount: result.igst_amount,
            other_tax_amount: result.other_tax_amount,
            total_tax_amount: result.total_tax_amount,
            total_amount: result.total_amount,
        })?;
    }

    csv_writer.flush()?;
    Ok(())
}

fn tax_label(
    name: &str,
    rate: Option<Decimal>,
) -> String {
    match rate {
        Some(rate) if !rate.is_zero() => format!("{name} {}", format_rate(rate)),
        _ => name.to_string(),
    }
}

/// Renders a human-readable breakdown of the invoice.
pub fn render_table(
    draft: &InvoiceDraft,
    invoice: &ComputedInvoice<'_>,
) -> String {
    let mut out = String::new();

    // Writing to a String cannot fail
    let _ = writeln!(out, "Invoice {} ({})", draft.invoice_number, draft.kind.as_str());
    let _ = writeln!(out, "Date: {}", draft.invoice_date);
    if let Some(po) = &draft.purchase_order {
        let _ = writeln!(out, "Purchase order: {} dated {}", po.po_number, po.po_date);
    }
    let _ = writeln!(out);

    let _ = writeln!(
        out,
        "{:>4}  {:<24} {:>16} {:>16} {:>14} {:>16}",
        "#", "Description", "Base", "Taxable", "Tax", "Total"
    );
    let _ = writeln!(out, "{}", "-".repeat(96));

    for computed in &invoice.lines {
        let line = computed.line;
        let result = computed.result;
        let _ = writeln!(
            out,
            "{:>4}  {:<24} {:>16} {:>16} {:>14} {:>16}",
            line.line_number,
            truncate(&line.description, 24),
            format_inr(result.base_amount),
            format_inr(result.taxable_amount),
            format_inr(result.total_tax_amount),
            format_inr(result.total_amount),
        );

        let components = [
            (tax_label("CGST", line.input.cgst_rate), result.cgst_amount),
            (tax_label("SGST", line.input.sgst_rate), result.sgst_amount),
            (tax_label("IGST", line.input.igst_rate), result.igst_amount),
            (tax_label("Other", line.input.other_tax_rate), result.other_tax_amount),
        ];
        for (label, amount) in components {
            if !amount.is_zero() {
                let _ = writeln!(out, "{:>6}{:<58} {:>14}", "", label, format_inr(amount));
            }
        }
    }

    let totals = &invoice.totals;
    let breakdown = &totals.tax_breakdown;
    let _ = writeln!(out, "{}", "-".repeat(96));

    let summary = [
        ("Sub total", Some(totals.sub_total)),
        ("CGST", nonzero(breakdown.cgst_amount)),
        ("SGST", nonzero(breakdown.sgst_amount)),
        ("IGST", nonzero(breakdown.igst_amount)),
        ("Other tax", nonzero(breakdown.other_tax_amount)),
        ("Tax amount", Some(totals.tax_amount)),
        ("Freight charges", Some(invoice.adjustments.freight_charges)),
        ("Discount", Some(invoice.adjustments.discount_amount)),
        ("Grand total", Some(totals.grand_total)),
    ];
    for (label, amount) in summary {
        if let Some(amount) = amount {
            let _ = writeln!(out, "{:>78} {:>16}", label, format_inr(amount));
        }
    }

    out
}

fn nonzero(amount: Decimal) -> Option<Decimal> {
    (!amount.is_zero()).then_some(amount)
}

fn truncate(
    text: &str,
    width: usize,
) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
        cut.push('…');
        cut
    }
}
