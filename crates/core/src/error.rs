//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic domain failures (lookup misses, key
/// conflicts, stock shortfalls). The shell decides whether to retry or surface
/// to the user; none of these are fatal to the process.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A lookup missed (item or order).
    #[error("not found: {0}")]
    NotFound(String),

    /// An insert collided with an existing identifier.
    #[error("duplicate key: {0}")]
    DuplicateKey(String),

    /// An update targeted an unknown attribute.
    #[error("invalid field: {0}")]
    InvalidField(String),

    /// Fulfillment shortfall under the all-or-nothing policy.
    #[error("insufficient stock for item: {0}")]
    InsufficientStock(String),

    /// Queue drain with nothing pending.
    #[error("no pending orders")]
    EmptyQueue,

    /// A value failed validation (e.g. malformed input).
    #[error("validation failed: {0}")]
    Validation(String),

    /// I/O failure on load/save, carried up from the persistence layer.
    #[error("persistence failure: {0}")]
    Persistence(String),
}

impl DomainError {
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    pub fn duplicate_key(key: impl Into<String>) -> Self {
        Self::DuplicateKey(key.into())
    }

    pub fn invalid_field(field: impl Into<String>) -> Self {
        Self::InvalidField(field.into())
    }

    pub fn insufficient_stock(item: impl Into<String>) -> Self {
        Self::InsufficientStock(item.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn persistence(msg: impl Into<String>) -> Self {
        Self::Persistence(msg.into())
    }
}
