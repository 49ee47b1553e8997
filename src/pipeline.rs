//! Pipeline orchestrating ingestion, validation, and reconciliation

use crate::reconciliation::ReconciliationEngine;
use crate::traits::*;
use crate::types::*;
use crate::utils::validation::REQUIRED_FIELDS;

/// End-to-end reconciliation runner.
///
/// Loads both sides from their sources, gates them through validation, and
/// invokes the engine once. A validation failure on either side blocks
/// reconciliation entirely; there is no partial result. The async boundary
/// lives here so callers can schedule the run as a deferred task — the
/// engine invocation itself is synchronous.
pub struct ReconciliationPipeline {
    validator: Box<dyn CollectionValidator>,
    engine: ReconciliationEngine,
}

impl Default for ReconciliationPipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl ReconciliationPipeline {
    /// Create a pipeline with the default validation gate
    pub fn new() -> Self {
        Self {
            validator: Box::new(DefaultCollectionValidator),
            engine: ReconciliationEngine::new(),
        }
    }

    /// Create a pipeline with a custom validator
    pub fn with_validator(validator: Box<dyn CollectionValidator>) -> Self {
        Self {
            validator,
            engine: ReconciliationEngine::new(),
        }
    }

    /// Load, validate, and reconcile one internal and one provider source
    pub async fn run(
        &self,
        internal: &dyn RecordSource,
        provider: &dyn RecordSource,
    ) -> ReconResult<ReconciliationResult> {
        let internal = internal.load().await?;
        let provider = provider.load().await?;
        tracing::info!(
            "loaded {} internal record(s) from '{}' and {} provider record(s) from '{}'",
            internal.records.len(),
            internal.name,
            provider.records.len(),
            provider.name
        );

        let internal = self
            .validator
            .validate_collection(internal, &REQUIRED_FIELDS)?;
        let provider = self
            .validator
            .validate_collection(provider, &REQUIRED_FIELDS)?;

        let result = self.engine.reconcile(&internal, &provider);

        let summary = result.summary();
        tracing::info!(
            "reconciled: {} matched, {} mismatched, {} internal-only, {} provider-only",
            summary.matched,
            summary.mismatched,
            summary.internal_only,
            summary.provider_only
        );

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::memory_source::MemorySource;
    use crate::utils::validation::validate;
    use bigdecimal::BigDecimal;

    fn record(reference: &str, amount: i64) -> TransactionRecord {
        TransactionRecord::new(
            reference.to_string(),
            BigDecimal::from(amount),
            "SUCCESS".to_string(),
            "2024-01-01".to_string(),
        )
    }

    #[tokio::test]
    async fn runs_the_full_flow() {
        let internal = MemorySource::from_records(
            "internal.csv".to_string(),
            RecordSide::Internal,
            vec![record("A1", 100), record("A2", 200)],
        );
        let provider = MemorySource::from_records(
            "provider.csv".to_string(),
            RecordSide::Provider,
            vec![record("A1", 100)],
        );

        let result = ReconciliationPipeline::new()
            .run(&internal, &provider)
            .await
            .unwrap();

        assert_eq!(result.matched.len(), 1);
        assert_eq!(result.internal_only.len(), 1);
    }

    #[tokio::test]
    async fn validation_failure_blocks_reconciliation() {
        let internal = MemorySource::from_records(
            "internal.csv".to_string(),
            RecordSide::Internal,
            vec![],
        );
        let provider = MemorySource::from_records(
            "provider.csv".to_string(),
            RecordSide::Provider,
            vec![record("A1", 100)],
        );

        let error = ReconciliationPipeline::new()
            .run(&internal, &provider)
            .await
            .unwrap_err();

        assert!(matches!(
            error,
            ReconError::EmptyCollection {
                side: RecordSide::Internal
            }
        ));
    }

    #[tokio::test]
    async fn custom_validator_is_applied() {
        /// Additionally requires every record to carry a currency
        struct RequireCurrencyValidator;

        impl CollectionValidator for RequireCurrencyValidator {
            fn validate_collection(
                &self,
                collection: UploadedCollection,
                required_fields: &[&str],
            ) -> ReconResult<ValidatedCollection> {
                let mut fields = required_fields.to_vec();
                fields.push("currency");
                validate(collection, &fields)
            }
        }

        let internal = MemorySource::from_records(
            "internal.csv".to_string(),
            RecordSide::Internal,
            vec![record("A1", 100)],
        );
        let provider = MemorySource::from_records(
            "provider.csv".to_string(),
            RecordSide::Provider,
            vec![record("A1", 100)],
        );

        let pipeline =
            ReconciliationPipeline::with_validator(Box::new(RequireCurrencyValidator));
        let error = pipeline.run(&internal, &provider).await.unwrap_err();
        match error {
            ReconError::MissingRequiredFields { fields, .. } => assert_eq!(fields, "currency"),
            other => panic!("unexpected error: {other}"),
        }
    }
}
