//! CSV ingestion of transaction record collections
//!
//! Parses CSV text into typed records: the four required columns map to
//! typed fields, `counterparty` and `currency` are recognized as optional,
//! and every other column is carried in the record's pass-through map.

use std::collections::BTreeMap;
use std::path::PathBuf;

use async_trait::async_trait;
use bigdecimal::BigDecimal;

use crate::traits::RecordSource;
use crate::types::*;
use crate::utils::validation::REQUIRED_FIELDS;

const COUNTERPARTY_COLUMN: &str = "counterparty";
const CURRENCY_COLUMN: &str = "currency";

/// Parse CSV text into an uploaded collection for the given side.
///
/// The header row must contain all required columns. Amount coercion happens
/// here: an empty amount cell is a missing required field, and a non-empty
/// cell that is not a decimal number is an invalid amount.
pub fn parse_csv_records(
    name: &str,
    side: RecordSide,
    csv_text: &str,
) -> ReconResult<UploadedCollection> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(csv_text.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| ReconError::Csv(e.to_string()))?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let index_of = |column: &str| -> ReconResult<usize> {
        headers
            .iter()
            .position(|h| h == column)
            .ok_or_else(|| ReconError::MissingColumn {
                side,
                column: column.to_string(),
            })
    };

    let [reference_idx, amount_idx, status_idx, date_idx] = [
        index_of(REQUIRED_FIELDS[0])?,
        index_of(REQUIRED_FIELDS[1])?,
        index_of(REQUIRED_FIELDS[2])?,
        index_of(REQUIRED_FIELDS[3])?,
    ];
    let counterparty_idx = headers.iter().position(|h| h == COUNTERPARTY_COLUMN);
    let currency_idx = headers.iter().position(|h| h == CURRENCY_COLUMN);

    let mut claimed = vec![reference_idx, amount_idx, status_idx, date_idx];
    claimed.extend(counterparty_idx);
    claimed.extend(currency_idx);

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row.map_err(|e| ReconError::Csv(e.to_string()))?;

        let transaction_reference = row.get(reference_idx).unwrap_or("").to_string();

        let amount_text = row.get(amount_idx).unwrap_or("");
        if amount_text.trim().is_empty() {
            return Err(ReconError::MissingRequiredFields {
                side,
                fields: "amount".to_string(),
            });
        }
        let amount: BigDecimal =
            amount_text
                .trim()
                .parse()
                .map_err(|_| ReconError::InvalidAmount {
                    side,
                    reference: transaction_reference.clone(),
                    value: amount_text.to_string(),
                })?;

        let mut extra = BTreeMap::new();
        for (idx, header) in headers.iter().enumerate() {
            if claimed.contains(&idx) {
                continue;
            }
            if let Some(value) = row.get(idx) {
                extra.insert(header.clone(), value.to_string());
            }
        }

        records.push(TransactionRecord {
            transaction_reference,
            amount,
            status: row.get(status_idx).unwrap_or("").to_string(),
            date: row.get(date_idx).unwrap_or("").to_string(),
            counterparty: optional_cell(&row, counterparty_idx),
            currency: optional_cell(&row, currency_idx),
            extra,
        });
    }

    tracing::debug!(
        "parsed {} {} record(s) from '{}'",
        records.len(),
        side,
        name
    );

    Ok(UploadedCollection::new(name.to_string(), side, records))
}

fn optional_cell(row: &csv::StringRecord, idx: Option<usize>) -> Option<String> {
    idx.and_then(|i| row.get(i))
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

/// Record source backed by a CSV file on disk
pub struct CsvFileSource {
    path: PathBuf,
    side: RecordSide,
}

impl CsvFileSource {
    pub fn new(path: impl Into<PathBuf>, side: RecordSide) -> Self {
        Self {
            path: path.into(),
            side,
        }
    }
}

#[async_trait]
impl RecordSource for CsvFileSource {
    async fn load(&self) -> ReconResult<UploadedCollection> {
        let csv_text =
            std::fs::read_to_string(&self.path).map_err(|e| ReconError::Io(e.to_string()))?;
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string());
        parse_csv_records(&name, self.side, &csv_text)
    }
}
