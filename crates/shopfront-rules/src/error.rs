//! Rules error types.

use thiserror::Error;

/// Errors raised while evaluating an applicant.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RulesError {
    /// Date of birth is not an ISO `YYYY-MM-DD` date.
    #[error("invalid date of birth: {0}")]
    InvalidDob(String),

    /// A required measurement is missing or not positive.
    #[error("invalid measurement: {0}")]
    InvalidMeasurement(&'static str),
}

impl RulesError {
    /// Stable machine-readable code, used at the HTTP boundary.
    pub fn code(&self) -> &'static str {
        "bad_request"
    }
}
