//! Request-boundary checks. Handlers run these before any service logic; the
//! services themselves assume range-checked input.

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("{field} 必须在 {min} 到 {max} 之间")]
    OutOfRange {
        field: &'static str,
        min: f64,
        max: f64,
    },
    #[error("{field} 必须大于 0")]
    NotPositive { field: &'static str },
    #[error("{field} 不能为空")]
    Empty { field: &'static str },
    #[error("{field} 必须是 {allowed}")]
    InvalidChoice {
        field: &'static str,
        allowed: &'static str,
    },
}

pub fn unit_interval(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ValidationError::OutOfRange {
            field,
            min: 0.0,
            max: 1.0,
        })
    }
}

pub fn positive(field: &'static str, value: i64) -> Result<(), ValidationError> {
    if value > 0 {
        Ok(())
    } else {
        Err(ValidationError::NotPositive { field })
    }
}

pub fn not_blank(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::Empty { field })
    } else {
        Ok(())
    }
}
