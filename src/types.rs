//! Core types and data structures for the reconciliation system

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Which side of the reconciliation a collection was reported by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordSide {
    /// The platform's own transaction export
    Internal,
    /// The payment provider's statement
    Provider,
}

impl std::fmt::Display for RecordSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Internal => write!(f, "internal"),
            Self::Provider => write!(f, "provider"),
        }
    }
}

/// One financial transaction as reported by one side
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Matching key across the two sides; compared trimmed, case-sensitive
    pub transaction_reference: String,
    /// Transaction amount in the record's own currency
    pub amount: BigDecimal,
    /// Reported transaction status
    pub status: String,
    /// Raw date text as reported; never parsed or normalized
    pub date: String,
    /// Counterparty name, when the source reports one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub counterparty: Option<String>,
    /// Currency code, when the source reports one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    /// Unrecognized source columns, carried through opaquely
    #[serde(flatten)]
    pub extra: BTreeMap<String, String>,
}

impl TransactionRecord {
    /// Create a new record from the four required fields
    pub fn new(
        transaction_reference: String,
        amount: BigDecimal,
        status: String,
        date: String,
    ) -> Self {
        Self {
            transaction_reference,
            amount,
            status,
            date,
            counterparty: None,
            currency: None,
            extra: BTreeMap::new(),
        }
    }

    /// Whether the record carries a non-empty value for the named field.
    ///
    /// `amount` is typed and always present once the record exists; a zero
    /// amount counts as populated. Unknown names are looked up in the
    /// pass-through field map.
    pub fn field_is_populated(&self, field: &str) -> bool {
        match field {
            "transaction_reference" => !self.transaction_reference.trim().is_empty(),
            "amount" => true,
            "status" => !self.status.trim().is_empty(),
            "date" => !self.date.trim().is_empty(),
            "counterparty" => self
                .counterparty
                .as_deref()
                .is_some_and(|value| !value.trim().is_empty()),
            "currency" => self
                .currency
                .as_deref()
                .is_some_and(|value| !value.trim().is_empty()),
            other => self
                .extra
                .get(other)
                .is_some_and(|value| !value.trim().is_empty()),
        }
    }
}

/// A named, side-tagged set of records produced by one ingestion event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadedCollection {
    /// Source name, usually the uploaded file name
    pub name: String,
    /// Which side reported these records
    pub side: RecordSide,
    /// Records in source order
    pub records: Vec<TransactionRecord>,
    /// Identifier of the ingestion event that produced this collection
    pub ingestion_id: Uuid,
}

impl UploadedCollection {
    /// Create a collection for a fresh ingestion event
    pub fn new(name: String, side: RecordSide, records: Vec<TransactionRecord>) -> Self {
        Self {
            name,
            side,
            records,
            ingestion_id: Uuid::new_v4(),
        }
    }
}

/// A collection that has passed the validation gate.
///
/// Only `validate` can produce one, so `reconcile` cannot be handed an
/// unvalidated collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidatedCollection(pub(crate) UploadedCollection);

impl ValidatedCollection {
    /// The validated records, in their original order
    pub fn records(&self) -> &[TransactionRecord] {
        &self.0.records
    }

    /// Which side reported this collection
    pub fn side(&self) -> RecordSide {
        self.0.side
    }

    /// Source name of the underlying collection
    pub fn name(&self) -> &str {
        &self.0.name
    }

    /// Give back the underlying collection, dropping the validated tag
    pub fn into_inner(self) -> UploadedCollection {
        self.0
    }
}

/// A reference present on both sides whose compared fields disagree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mismatch {
    /// The internal side's record
    pub internal: TransactionRecord,
    /// The provider side's record
    pub provider: TransactionRecord,
    /// Human-readable difference descriptions, in comparison order
    pub differences: Vec<String>,
}

/// Four-way partition of two record collections
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconciliationResult {
    /// Internal records whose reference exists on both sides with no
    /// field differences
    pub matched: Vec<TransactionRecord>,
    /// Record pairs whose reference exists on both sides but disagree on
    /// at least one compared field
    pub mismatched: Vec<Mismatch>,
    /// Internal records with no provider counterpart
    pub internal_only: Vec<TransactionRecord>,
    /// Provider records with no internal counterpart
    pub provider_only: Vec<TransactionRecord>,
}

impl ReconciliationResult {
    /// Per-class counts for reporting
    pub fn summary(&self) -> ReconciliationSummary {
        ReconciliationSummary {
            matched: self.matched.len(),
            mismatched: self.mismatched.len(),
            internal_only: self.internal_only.len(),
            provider_only: self.provider_only.len(),
            total_internal: self.matched.len() + self.mismatched.len() + self.internal_only.len(),
            total_provider: self.matched.len() + self.mismatched.len() + self.provider_only.len(),
        }
    }
}

/// Counts per outcome class, plus per-side totals
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconciliationSummary {
    pub matched: usize,
    pub mismatched: usize,
    pub internal_only: usize,
    pub provider_only: usize,
    pub total_internal: usize,
    pub total_provider: usize,
}

/// Errors that can occur while ingesting or validating record collections
#[derive(Debug, thiserror::Error)]
pub enum ReconError {
    #[error("{side} collection is empty")]
    EmptyCollection { side: RecordSide },
    #[error("{side} collection missing required fields: {fields}")]
    MissingRequiredFields { side: RecordSide, fields: String },
    #[error("{side} file missing required column '{column}'")]
    MissingColumn { side: RecordSide, column: String },
    #[error("{side} record '{reference}': cannot parse amount '{value}'")]
    InvalidAmount {
        side: RecordSide,
        reference: String,
        value: String,
    },
    #[error("CSV error: {0}")]
    Csv(String),
    #[error("IO error: {0}")]
    Io(String),
}

/// Result type for reconciliation operations
pub type ReconResult<T> = Result<T, ReconError>;
