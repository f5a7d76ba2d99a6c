//! Read and write the ledger file format.
//!
//! One header row followed by one row per record, in append order:
//! Date,Description,Amount,Category,Kind
//!
//! Dates are YYYY-MM-DD, amounts plain integers, category/kind the fixed labels.

use std::io::{Read, Write};

use tally_core::{ExpenseRecord, LedgerError};

use crate::Ledger;

pub const HEADER: [&str; 5] = ["Date", "Description", "Amount", "Category", "Kind"];

/// Parse a whole ledger. Any malformed row aborts the read; nothing is skipped.
pub fn read_ledger<R: Read>(reader: R, location: &str) -> Result<Ledger, LedgerError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(reader);

    let headers = rdr
        .headers()
        .map_err(|e| LedgerError::unreadable(location, e))?;
    if headers.is_empty() {
        return Err(LedgerError::unreadable(location, "missing header row"));
    }
    if headers.iter().ne(HEADER) {
        return Err(LedgerError::unreadable(
            location,
            format!("unexpected header {:?}", headers.iter().collect::<Vec<_>>()),
        ));
    }

    let mut records = Vec::new();
    for (i, row) in rdr.deserialize::<ExpenseRecord>().enumerate() {
        // Row 1 is the header
        let line = i + 2;
        let record = row.map_err(|e| LedgerError::unreadable(location, format!("row {line}: {e}")))?;
        record
            .validate()
            .map_err(|e| LedgerError::unreadable(location, format!("row {line}: {e}")))?;
        records.push(record);
    }

    Ledger::from_records(records).map_err(|e| LedgerError::unreadable(location, e))
}

/// Write the header and every record. The header is written even for an
/// empty ledger so the file always carries the schema.
pub fn write_ledger<W: Write>(writer: W, ledger: &Ledger, location: &str) -> Result<(), LedgerError> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    wtr.write_record(HEADER)
        .map_err(|e| LedgerError::unwritable(location, e))?;
    for record in ledger {
        wtr.serialize(record)
            .map_err(|e| LedgerError::unwritable(location, e))?;
    }
    wtr.flush().map_err(|e| LedgerError::unwritable(location, e))?;
    Ok(())
}
