use crate::error::{ValidationError, ValidationResult};

/// Records and payloads that can be checked before they are applied.
pub trait Validate {
    /// Return the first problem found, if any.
    fn validate(&self) -> ValidationResult<()>;
}

pub(crate) fn require_text(field: &'static str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::MissingField(field));
    }
    Ok(())
}

pub(crate) fn require_non_negative(field: &'static str, value: f64) -> ValidationResult<()> {
    if !value.is_finite() {
        return Err(ValidationError::InvalidValue {
            field,
            reason: "must be a finite number".into(),
        });
    }
    if value < 0.0 {
        return Err(ValidationError::InvalidValue {
            field,
            reason: format!("must not be negative (got {value})"),
        });
    }
    Ok(())
}

/// Treat `None` and whitespace-only strings alike.
pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
