//! In-memory record source for testing

use async_trait::async_trait;

use crate::traits::RecordSource;
use crate::types::*;

/// Record source serving a pre-built collection, for testing and development
#[derive(Debug, Clone)]
pub struct MemorySource {
    collection: UploadedCollection,
}

impl MemorySource {
    /// Create a source around an already-built collection
    pub fn new(collection: UploadedCollection) -> Self {
        Self { collection }
    }

    /// Convenience constructor from bare records
    pub fn from_records(
        name: String,
        side: RecordSide,
        records: Vec<TransactionRecord>,
    ) -> Self {
        Self::new(UploadedCollection::new(name, side, records))
    }
}

#[async_trait]
impl RecordSource for MemorySource {
    async fn load(&self) -> ReconResult<UploadedCollection> {
        Ok(self.collection.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bigdecimal::BigDecimal;

    #[tokio::test]
    async fn serves_the_same_collection_on_every_load() {
        let source = MemorySource::from_records(
            "fixture".to_string(),
            RecordSide::Internal,
            vec![TransactionRecord::new(
                "A1".to_string(),
                BigDecimal::from(10),
                "OK".to_string(),
                "2024-01-01".to_string(),
            )],
        );

        let first = source.load().await.unwrap();
        let second = source.load().await.unwrap();

        assert_eq!(first, second);
        assert_eq!(first.ingestion_id, second.ingestion_id);
    }
}
