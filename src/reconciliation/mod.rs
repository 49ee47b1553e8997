//! Reconciliation engine for internal exports and provider statements
//!
//! Classifies two validated record collections into a four-way partition:
//! matched, mismatched, internal-only, and provider-only.

use std::collections::HashMap;

use bigdecimal::BigDecimal;

use crate::types::*;

/// Engine that partitions two validated collections by transaction reference.
///
/// Pure and stateless: every call builds its own lookups, runs to completion
/// synchronously, and returns a result owned entirely by the caller.
pub struct ReconciliationEngine;

impl Default for ReconciliationEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ReconciliationEngine {
    pub fn new() -> Self {
        Self
    }

    /// Partition the two collections into the four outcome classes.
    ///
    /// Records are matched on their trimmed `transaction_reference`. When a
    /// side contains duplicate references, the later record wins the lookup
    /// entry used by the other side's pass; this is a documented property of
    /// the inputs, not an error. The engine itself has no failure path:
    /// absent counterparts become classification outcomes.
    pub fn reconcile(
        &self,
        internal: &ValidatedCollection,
        provider: &ValidatedCollection,
    ) -> ReconciliationResult {
        let internal_lookup = build_lookup(internal.records());
        let provider_lookup = build_lookup(provider.records());

        let mut matched = Vec::new();
        let mut mismatched = Vec::new();
        let mut internal_only = Vec::new();
        let mut provider_only = Vec::new();

        for record in internal.records() {
            match provider_lookup.get(record.transaction_reference.trim()) {
                Some(counterpart) => {
                    let differences = compare_fields(record, counterpart);
                    if differences.is_empty() {
                        matched.push(record.clone());
                    } else {
                        mismatched.push(Mismatch {
                            internal: record.clone(),
                            provider: (*counterpart).clone(),
                            differences,
                        });
                    }
                }
                None => internal_only.push(record.clone()),
            }
        }

        for record in provider.records() {
            if !internal_lookup.contains_key(record.transaction_reference.trim()) {
                provider_only.push(record.clone());
            }
        }

        ReconciliationResult {
            matched,
            mismatched,
            internal_only,
            provider_only,
        }
    }
}

/// Map trimmed references to records; later duplicates overwrite earlier ones
fn build_lookup(records: &[TransactionRecord]) -> HashMap<&str, &TransactionRecord> {
    let mut lookup = HashMap::new();
    for record in records {
        lookup.insert(record.transaction_reference.trim(), record);
    }
    lookup
}

/// Absolute amount difference below which two amounts are considered equal
fn amount_tolerance() -> BigDecimal {
    BigDecimal::from(1) / BigDecimal::from(100)
}

/// Compare the fields of a reference-matched pair, in fixed order:
/// amount, then status, then date.
fn compare_fields(internal: &TransactionRecord, provider: &TransactionRecord) -> Vec<String> {
    let mut differences = Vec::new();

    if (&internal.amount - &provider.amount).abs() > amount_tolerance() {
        differences.push(format!(
            "Amount: {} vs {}",
            internal.amount, provider.amount
        ));
    }

    if internal.status != provider.status {
        differences.push(format!(
            "Status: {} vs {}",
            internal.status, provider.status
        ));
    }

    if internal.date != provider.date {
        differences.push(format!("Date: {} vs {}", internal.date, provider.date));
    }

    differences
}
