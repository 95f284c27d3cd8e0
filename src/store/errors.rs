//! Store error types
//!
//! Error codes:
//! - AERO_KV_EMPTY_KEY
//! - AERO_KV_EMPTY_FIELD
//! - AERO_KV_EMPTY_RECORD
//! - AERO_KV_NEGATIVE_TIMESTAMP
//! - AERO_KV_DUPLICATE_TIMESTAMP
//!
//! Every store error is a rejection: the store state is exactly as it was
//! before the call.

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Insert rejections
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("Key must not be empty")]
    EmptyKey,

    #[error("Field must not be empty")]
    EmptyField,

    #[error("Record must not be empty")]
    EmptyRecord,

    #[error("Timestamp must not be negative: {0}")]
    NegativeTimestamp(i64),

    #[error("Field '{field}' of key '{key}' already has a version at timestamp {timestamp}")]
    DuplicateTimestamp {
        key: String,
        field: String,
        timestamp: i64,
    },
}

impl StoreError {
    /// Create a duplicate timestamp error
    pub fn duplicate(key: &str, field: &str, timestamp: i64) -> Self {
        StoreError::DuplicateTimestamp {
            key: key.to_string(),
            field: field.to_string(),
            timestamp,
        }
    }

    /// Returns the stable error code string
    pub fn code(&self) -> &'static str {
        match self {
            StoreError::EmptyKey => "AERO_KV_EMPTY_KEY",
            StoreError::EmptyField => "AERO_KV_EMPTY_FIELD",
            StoreError::EmptyRecord => "AERO_KV_EMPTY_RECORD",
            StoreError::NegativeTimestamp(_) => "AERO_KV_NEGATIVE_TIMESTAMP",
            StoreError::DuplicateTimestamp { .. } => "AERO_KV_DUPLICATE_TIMESTAMP",
        }
    }

    /// Returns true for input validation failures, false for conflicts
    /// with existing state.
    pub fn is_validation(&self) -> bool {
        !matches!(self, StoreError::DuplicateTimestamp { .. })
    }
}
