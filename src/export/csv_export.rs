use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::NaiveDate;

use crate::error::Result;
use crate::export::format_total;
use crate::planner::IngredientSummary;

pub const CSV_HEADERS: [&str; 4] = ["item name", "total amount", "unit", "detail breakdown"];

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Write the aggregated order list as CSV, prefixed with a UTF-8 BOM so
/// spreadsheet tools pick the right encoding.
pub fn write_csv<W: Write>(mut out: W, summaries: &[IngredientSummary]) -> Result<()> {
    out.write_all(UTF8_BOM)?;

    let mut wtr = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(out);

    wtr.write_record(CSV_HEADERS)?;
    for summary in summaries {
        let total = format_total(summary.total_amount);
        let breakdown = breakdown_text(summary);
        wtr.write_record([
            summary.name.as_str(),
            total.as_str(),
            summary.unit.as_str(),
            breakdown.as_str(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// The CSV document as a string (BOM included).
pub fn csv_string(summaries: &[IngredientSummary]) -> Result<String> {
    let mut buf = Vec::new();
    write_csv(&mut buf, summaries)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

pub fn export_csv<P: AsRef<Path>>(path: P, summaries: &[IngredientSummary]) -> Result<()> {
    let file = File::create(path.as_ref())?;
    write_csv(BufWriter::new(file), summaries)?;
    tracing::info!(path = %path.as_ref().display(), rows = summaries.len(), "csv exported");
    Ok(())
}

pub fn default_csv_name(date: NaiveDate) -> String {
    format!("ingredient_order_{}.csv", date)
}

/// `date(meal time) menu:amount` per contributing meal, joined with ` | `.
fn breakdown_text(summary: &IngredientSummary) -> String {
    summary
        .breakdown
        .iter()
        .map(|b| format!("{}({}) {}:{}", b.date, b.meal_time, b.menu_name, b.amount))
        .collect::<Vec<_>>()
        .join(" | ")
}
