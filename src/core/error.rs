use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FinanceError {
    #[error("{field} must be {requirement}")]
    InvalidInput {
        field: &'static str,
        requirement: String,
    },

    #[error("Unknown district: {0}")]
    UnknownDistrict(String),

    #[error("Unknown expense id: {0}")]
    UnknownExpense(String),

    #[error("Unknown language code: {0}")]
    UnknownLanguage(String),

    #[error("Expense name must not be empty")]
    EmptyExpenseName,

    #[error("Account is bankrupt; no further rolls are possible")]
    Bankrupt,

    #[error("Failed to format report: {0}")]
    Format(#[from] std::fmt::Error),
}

impl FinanceError {
    pub fn invalid(field: &'static str, requirement: impl Into<String>) -> Self {
        FinanceError::InvalidInput {
            field,
            requirement: requirement.into(),
        }
    }
}

pub type FinanceResult<T> = Result<T, FinanceError>;

/// Rejects NaN/inf and values outside `min..=max`.
pub fn ensure_in_range(field: &'static str, value: f64, min: f64, max: f64) -> FinanceResult<f64> {
    if !value.is_finite() || value < min || value > max {
        return Err(FinanceError::invalid(
            field,
            format!("between {min} and {max}"),
        ));
    }
    Ok(value)
}

pub fn ensure_non_negative(field: &'static str, value: f64) -> FinanceResult<f64> {
    if !value.is_finite() || value < 0.0 {
        return Err(FinanceError::invalid(field, ">= 0"));
    }
    Ok(value)
}
