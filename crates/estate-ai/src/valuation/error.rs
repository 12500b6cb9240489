use std::fmt;

/// Rule a request field failed to satisfy.
#[derive(Debug, Clone, PartialEq)]
pub enum InputConstraint {
    OutOfRange { min: f64, max: f64, found: f64 },
    NotHalfStep { found: f64 },
    NotWholeNumber { found: f64 },
    NotPositive { found: f64 },
    Negative { found: f64 },
    UnknownVariant { found: String, expected: &'static [&'static str] },
    ZeroDenominator,
    NonFiniteResult,
    Empty,
}

impl fmt::Display for InputConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputConstraint::OutOfRange { min, max, found } => {
                write!(f, "{found} is outside the allowed range {min}..={max}")
            }
            InputConstraint::NotHalfStep { found } => {
                write!(f, "{found} is not a multiple of 0.5")
            }
            InputConstraint::NotWholeNumber { found } => {
                write!(f, "{found} is not a whole number")
            }
            InputConstraint::NotPositive { found } => {
                write!(f, "{found} must be greater than zero")
            }
            InputConstraint::Negative { found } => write!(f, "{found} must not be negative"),
            InputConstraint::UnknownVariant { found, expected } => write!(
                f,
                "'{found}' is not one of {}",
                expected.join(", ")
            ),
            InputConstraint::ZeroDenominator => {
                write!(f, "value is used as a divisor and must not be zero")
            }
            InputConstraint::NonFiniteResult => {
                write!(f, "value produces a result too large to represent")
            }
            InputConstraint::Empty => write!(f, "value must not be empty"),
        }
    }
}

/// Rejection raised before any formula runs.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValuationError {
    #[error("invalid {field}: {constraint}")]
    InvalidInput {
        field: &'static str,
        constraint: InputConstraint,
    },
}

impl ValuationError {
    pub(crate) fn invalid(field: &'static str, constraint: InputConstraint) -> Self {
        Self::InvalidInput { field, constraint }
    }

    pub fn field(&self) -> &'static str {
        match self {
            ValuationError::InvalidInput { field, .. } => field,
        }
    }

    pub fn constraint(&self) -> &InputConstraint {
        match self {
            ValuationError::InvalidInput { constraint, .. } => constraint,
        }
    }
}

pub(crate) fn ensure_range(
    field: &'static str,
    value: f64,
    min: f64,
    max: f64,
) -> Result<(), ValuationError> {
    if value.is_finite() && (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ValuationError::invalid(
            field,
            InputConstraint::OutOfRange {
                min,
                max,
                found: value,
            },
        ))
    }
}

pub(crate) fn ensure_positive(field: &'static str, value: f64) -> Result<(), ValuationError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ValuationError::invalid(
            field,
            InputConstraint::NotPositive { found: value },
        ))
    }
}

/// Largest monetary amount accepted on any request, one trillion.
pub const MAX_AMOUNT: f64 = 1e12;

/// Positive monetary amount no larger than [`MAX_AMOUNT`].
pub(crate) fn ensure_amount(field: &'static str, value: f64) -> Result<(), ValuationError> {
    ensure_positive(field, value)?;
    ensure_range(field, value, 0.0, MAX_AMOUNT)
}

/// Like [`ensure_amount`] but zero is allowed.
pub(crate) fn ensure_optional_amount(
    field: &'static str,
    value: f64,
) -> Result<(), ValuationError> {
    ensure_non_negative(field, value)?;
    ensure_range(field, value, 0.0, MAX_AMOUNT)
}

pub(crate) fn ensure_non_negative(field: &'static str, value: f64) -> Result<(), ValuationError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ValuationError::invalid(
            field,
            InputConstraint::Negative { found: value },
        ))
    }
}
