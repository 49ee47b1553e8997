//! CSV export of reconciliation outcomes
//!
//! Serializes result lists back to CSV text: the known columns first, then
//! the sorted union of pass-through columns seen across the exported
//! records. Pass-through values are re-emitted exactly as ingested.

use std::collections::BTreeSet;

use crate::types::*;

const KNOWN_COLUMNS: [&str; 6] = [
    "transaction_reference",
    "amount",
    "status",
    "date",
    "counterparty",
    "currency",
];

/// Column header used for the flattened difference descriptions
const DIFFERENCES_COLUMN: &str = "differences";

/// Separator joining difference descriptions in the flattened projection
const DIFFERENCES_SEPARATOR: &str = "; ";

/// Serialize records to CSV text
pub fn records_to_csv(records: &[TransactionRecord]) -> ReconResult<String> {
    let extras = extra_columns(records.iter());

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(header_row(&extras, false))
        .map_err(|e| ReconError::Csv(e.to_string()))?;

    for record in records {
        writer
            .write_record(record_row(record, &extras))
            .map_err(|e| ReconError::Csv(e.to_string()))?;
    }

    finish(writer)
}

/// Serialize mismatched pairs as a flattened projection: each internal
/// record's columns plus one `differences` column with the descriptions
/// joined by `"; "`.
pub fn mismatches_to_csv(mismatches: &[Mismatch]) -> ReconResult<String> {
    let extras = extra_columns(mismatches.iter().map(|m| &m.internal));

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(header_row(&extras, true))
        .map_err(|e| ReconError::Csv(e.to_string()))?;

    for mismatch in mismatches {
        let mut row = record_row(&mismatch.internal, &extras);
        row.push(mismatch.differences.join(DIFFERENCES_SEPARATOR));
        writer
            .write_record(row)
            .map_err(|e| ReconError::Csv(e.to_string()))?;
    }

    finish(writer)
}

/// Sorted union of pass-through column names across the exported records
fn extra_columns<'a>(records: impl Iterator<Item = &'a TransactionRecord>) -> Vec<String> {
    let mut columns = BTreeSet::new();
    for record in records {
        for key in record.extra.keys() {
            columns.insert(key.clone());
        }
    }
    columns.into_iter().collect()
}

fn header_row(extras: &[String], with_differences: bool) -> Vec<String> {
    let mut header: Vec<String> = KNOWN_COLUMNS.iter().map(|c| c.to_string()).collect();
    header.extend(extras.iter().cloned());
    if with_differences {
        header.push(DIFFERENCES_COLUMN.to_string());
    }
    header
}

fn record_row(record: &TransactionRecord, extras: &[String]) -> Vec<String> {
    let mut row = vec![
        record.transaction_reference.clone(),
        record.amount.to_string(),
        record.status.clone(),
        record.date.clone(),
        record.counterparty.clone().unwrap_or_default(),
        record.currency.clone().unwrap_or_default(),
    ];
    for column in extras {
        row.push(record.extra.get(column).cloned().unwrap_or_default());
    }
    row
}

fn finish(writer: csv::Writer<Vec<u8>>) -> ReconResult<String> {
    let bytes = writer
        .into_inner()
        .map_err(|e| ReconError::Csv(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| ReconError::Csv(e.to_string()))
}
