//! Validation gate for uploaded record collections

use crate::types::*;

/// Fields every record must populate before reconciliation
pub const REQUIRED_FIELDS: [&str; 4] = ["transaction_reference", "amount", "status", "date"];

/// Validate a collection against a set of required field names.
///
/// Fails with [`ReconError::EmptyCollection`] when the collection has no
/// records, and with [`ReconError::MissingRequiredFields`] when any record
/// lacks a non-empty value for a required field. On success the records are
/// returned unchanged, tagged as validated; nothing is copied or rewritten.
pub fn validate(
    collection: UploadedCollection,
    required_fields: &[&str],
) -> ReconResult<ValidatedCollection> {
    if collection.records.is_empty() {
        return Err(ReconError::EmptyCollection {
            side: collection.side,
        });
    }

    let mut missing: Vec<&str> = Vec::new();
    for record in &collection.records {
        for &field in required_fields {
            if !record.field_is_populated(field) && !missing.contains(&field) {
                missing.push(field);
            }
        }
    }

    if !missing.is_empty() {
        return Err(ReconError::MissingRequiredFields {
            side: collection.side,
            fields: missing.join(", "),
        });
    }

    Ok(ValidatedCollection(collection))
}

#[cfg(test)]
mod tests {
    use super::*;
    use bigdecimal::BigDecimal;

    fn record(reference: &str, status: &str, date: &str) -> TransactionRecord {
        TransactionRecord::new(
            reference.to_string(),
            BigDecimal::from(100),
            status.to_string(),
            date.to_string(),
        )
    }

    #[test]
    fn empty_collection_rejected() {
        let collection =
            UploadedCollection::new("empty.csv".to_string(), RecordSide::Internal, vec![]);

        let error = validate(collection, &REQUIRED_FIELDS).unwrap_err();
        assert!(matches!(
            error,
            ReconError::EmptyCollection {
                side: RecordSide::Internal
            }
        ));
    }

    #[test]
    fn missing_status_rejected() {
        let collection = UploadedCollection::new(
            "internal.csv".to_string(),
            RecordSide::Internal,
            vec![record("A1", "", "2024-01-01")],
        );

        let error = validate(collection, &REQUIRED_FIELDS).unwrap_err();
        match error {
            ReconError::MissingRequiredFields { side, fields } => {
                assert_eq!(side, RecordSide::Internal);
                assert_eq!(fields, "status");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn whitespace_only_reference_rejected() {
        let collection = UploadedCollection::new(
            "internal.csv".to_string(),
            RecordSide::Internal,
            vec![record("   ", "OK", "2024-01-01")],
        );

        let error = validate(collection, &REQUIRED_FIELDS).unwrap_err();
        match error {
            ReconError::MissingRequiredFields { fields, .. } => {
                assert_eq!(fields, "transaction_reference");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn zero_amount_is_valid() {
        let mut zero = record("A1", "OK", "2024-01-01");
        zero.amount = BigDecimal::from(0);
        let collection = UploadedCollection::new(
            "internal.csv".to_string(),
            RecordSide::Internal,
            vec![zero],
        );

        assert!(validate(collection, &REQUIRED_FIELDS).is_ok());
    }

    #[test]
    fn missing_fields_reported_once_across_records() {
        let collection = UploadedCollection::new(
            "provider.csv".to_string(),
            RecordSide::Provider,
            vec![
                record("A1", "", ""),
                record("A2", "", "2024-01-02"),
                record("A3", "OK", "2024-01-03"),
            ],
        );

        let error = validate(collection, &REQUIRED_FIELDS).unwrap_err();
        match error {
            ReconError::MissingRequiredFields { side, fields } => {
                assert_eq!(side, RecordSide::Provider);
                assert_eq!(fields, "status, date");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn valid_collection_passes_records_through_untouched() {
        let records = vec![record(" A1 ", "OK", "2024-01-01"), record("A2", "OK", "2024-01-02")];
        let collection = UploadedCollection::new(
            "internal.csv".to_string(),
            RecordSide::Internal,
            records.clone(),
        );

        let validated = validate(collection, &REQUIRED_FIELDS).unwrap();
        assert_eq!(validated.records(), records.as_slice());
        assert_eq!(validated.side(), RecordSide::Internal);
        assert_eq!(validated.name(), "internal.csv");
    }

    #[test]
    fn custom_required_set_checks_extra_fields() {
        let mut with_channel = record("A1", "OK", "2024-01-01");
        with_channel
            .extra
            .insert("channel".to_string(), "mobile".to_string());
        let collection = UploadedCollection::new(
            "internal.csv".to_string(),
            RecordSide::Internal,
            vec![with_channel, record("A2", "OK", "2024-01-02")],
        );

        let error = validate(collection, &["transaction_reference", "channel"]).unwrap_err();
        match error {
            ReconError::MissingRequiredFields { fields, .. } => assert_eq!(fields, "channel"),
            other => panic!("unexpected error: {other}"),
        }
    }
}
