use thiserror::Error;

/// Errors produced when a submitted record fails validation.
///
/// A record that fails validation is rejected before any mutation is
/// attempted.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("invalid record id: {0}")]
    InvalidId(String),
}

/// Result alias for validation.
pub type ValidationResult<T> = Result<T, ValidationError>;
