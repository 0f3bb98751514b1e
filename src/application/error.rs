//! Application-level errors (wraps domain errors)

use thiserror::Error;

use crate::domain::DomainError;

/// Application errors wrap domain errors and add application-level context.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("config error: {message}")]
    Config { message: String },

    #[error("scenario '{scenario}' diverged: expected {expected}, got {actual}")]
    ScenarioMismatch {
        scenario: String,
        expected: String,
        actual: String,
    },

    #[error("strategy '{strategy}' cannot be bound to a {entity}")]
    StrategyNotApplicable {
        strategy: String,
        entity: &'static str,
    },
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
