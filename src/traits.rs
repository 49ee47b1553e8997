//! Traits for record sourcing and validation extensibility

use async_trait::async_trait;

use crate::types::*;
use crate::utils::validation::validate;

/// Record-producing collaborator abstraction.
///
/// This trait lets the reconciliation pipeline work with any ingestion
/// backend (CSV files, in-memory fixtures, an upload endpoint, etc.) by
/// implementing one load method. The engine itself never touches a source;
/// it only ever sees validated collections.
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Produce one uploaded collection for this source's side
    async fn load(&self) -> ReconResult<UploadedCollection>;
}

/// Trait for implementing custom collection validation rules.
///
/// Implementations add their own checks and then delegate to [`validate`],
/// which is the only way to obtain a [`ValidatedCollection`].
pub trait CollectionValidator: Send + Sync {
    /// Validate a collection before it may enter reconciliation
    fn validate_collection(
        &self,
        collection: UploadedCollection,
        required_fields: &[&str],
    ) -> ReconResult<ValidatedCollection>;
}

/// Default collection validator applying the standard required-field gate
pub struct DefaultCollectionValidator;

impl CollectionValidator for DefaultCollectionValidator {
    fn validate_collection(
        &self,
        collection: UploadedCollection,
        required_fields: &[&str],
    ) -> ReconResult<ValidatedCollection> {
        validate(collection, required_fields)
    }
}
