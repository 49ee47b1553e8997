//! # Recon Core
//!
//! A transaction reconciliation library that compares a platform's internal
//! transaction export against a payment provider's statement and classifies
//! every record into one of four outcome classes.
//!
//! ## Features
//!
//! - **Four-way classification**: matched, mismatched (with per-field
//!   difference descriptions), internal-only, and provider-only
//! - **Validation gate**: collections must pass a required-field check
//!   before they can enter reconciliation
//! - **Exact amount tolerance**: decimal arithmetic with a fixed 0.01
//!   absolute tolerance on amount comparison
//! - **CSV ingestion and export**: typed required columns plus opaque
//!   pass-through of unrecognized columns
//! - **Source abstraction**: trait-based record sources (files, in-memory
//!   fixtures) behind an async pipeline boundary
//!
//! ## Quick Start
//!
//! ```rust
//! use bigdecimal::BigDecimal;
//! use recon_core::{
//!     validate, ReconciliationEngine, RecordSide, TransactionRecord, UploadedCollection,
//!     REQUIRED_FIELDS,
//! };
//!
//! let record = TransactionRecord::new(
//!     "TXN-1001".to_string(),
//!     BigDecimal::from(250),
//!     "SUCCESS".to_string(),
//!     "2024-01-15".to_string(),
//! );
//!
//! let internal = UploadedCollection::new(
//!     "internal.csv".to_string(),
//!     RecordSide::Internal,
//!     vec![record.clone()],
//! );
//! let provider = UploadedCollection::new(
//!     "provider.csv".to_string(),
//!     RecordSide::Provider,
//!     vec![record],
//! );
//!
//! let internal = validate(internal, &REQUIRED_FIELDS).unwrap();
//! let provider = validate(provider, &REQUIRED_FIELDS).unwrap();
//!
//! let result = ReconciliationEngine::new().reconcile(&internal, &provider);
//! assert_eq!(result.matched.len(), 1);
//! ```

pub mod export;
pub mod ingest;
pub mod pipeline;
pub mod reconciliation;
pub mod traits;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use pipeline::*;
pub use reconciliation::*;
pub use traits::*;
pub use types::*;

// Re-export the validation gate for convenience
pub use utils::validation::{validate, REQUIRED_FIELDS};
