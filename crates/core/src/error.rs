//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic, input/invariant failures. Storage
/// concerns belong to the infrastructure layer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Amount is not a finite, non-negative number.
    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    /// Transaction type is neither income nor expense.
    #[error("invalid transaction type: {0}")]
    InvalidType(String),

    /// Date is not an ISO-8601 calendar date.
    #[error("invalid date: {0}")]
    InvalidDate(String),

    /// A value failed validation (e.g. malformed input).
    #[error("validation failed: {0}")]
    Validation(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// Every identifier has been handed out.
    #[error("no transaction identifiers left")]
    IdsExhausted,
}

impl DomainError {
    pub fn invalid_amount(msg: impl Into<String>) -> Self {
        Self::InvalidAmount(msg.into())
    }

    pub fn invalid_type(msg: impl Into<String>) -> Self {
        Self::InvalidType(msg.into())
    }

    pub fn invalid_date(msg: impl Into<String>) -> Self {
        Self::InvalidDate(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }
}
