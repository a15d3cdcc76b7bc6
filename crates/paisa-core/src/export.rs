//! Expense report export and import
//!
//! The export is a plain CSV file with the header `Date,Category,Amount,Description`
//! and one row per expense in store order. Amounts are written as raw numbers
//! (no currency symbol or grouping), so an export can be read back losslessly.

use std::io::{Read, Write};

use csv::{ReaderBuilder, WriterBuilder};
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::Expense;

/// Header row of an exported report
pub const CSV_HEADER: [&str; 4] = ["Date", "Category", "Amount", "Description"];

/// Suggested file name for a downloaded report
pub const DEFAULT_EXPORT_FILE: &str = "expense_report.csv";

/// Export expenses to CSV text
pub fn export_csv(records: &[Expense]) -> Result<String> {
    let mut buf = Vec::new();
    write_csv(&mut buf, records)?;
    String::from_utf8(buf).map_err(|e| Error::InvalidData(format!("CSV is not UTF-8: {}", e)))
}

/// Write expenses as CSV to any writer
///
/// The header is always written, even for an empty store.
pub fn write_csv<W: Write>(writer: W, records: &[Expense]) -> Result<()> {
    let mut wtr = WriterBuilder::new().has_headers(false).from_writer(writer);
    wtr.write_record(CSV_HEADER)?;
    for record in records {
        wtr.serialize(record)?;
    }
    wtr.flush()?;

    debug!(rows = records.len(), "Wrote expense CSV");
    Ok(())
}

/// Parse an exported report back into expenses, preserving row order
pub fn import_csv<R: Read>(reader: R) -> Result<Vec<Expense>> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_reader(reader);

    let headers = rdr.headers()?.clone();
    let found: Vec<&str> = headers.iter().map(str::trim).collect();
    if found != CSV_HEADER {
        return Err(Error::InvalidData(format!(
            "Unexpected CSV header: {} (expected {})",
            found.join(","),
            CSV_HEADER.join(",")
        )));
    }

    let mut expenses = Vec::new();
    for row in rdr.deserialize() {
        let expense: Expense = row?;
        expenses.push(expense);
    }

    debug!(rows = expenses.len(), "Read expense CSV");
    Ok(expenses)
}
