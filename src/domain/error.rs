//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent violated preconditions in entity or tree handling.
/// These are independent of configuration and CLI concerns.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("income must not be negative: {0}")]
    NegativeIncome(i64),

    #[error("no tax strategy bound to {entity}")]
    MissingStrategy { entity: &'static str },

    #[error("rate must be between 0 and 10000 basis points: {0}")]
    InvalidRate(u32),

    #[error("arithmetic overflow while {0}")]
    Overflow(&'static str),

    #[error("tree depth {depth} exceeds limit {limit}")]
    TooDeep { depth: usize, limit: usize },
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
