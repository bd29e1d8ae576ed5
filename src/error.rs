use thiserror::Error;

/// Errors returned when an indicator is configured with invalid
/// parameters.
///
/// Short or empty price series are never an error: indicators pad the
/// output with `None` until enough history is available. Only the
/// parameters themselves are validated.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum IndicatorError {
    /// A window length (`period`, `fast`, `slow`, `signal`) is zero.
    #[error("invalid parameter `{name}`: {value} (must be at least 1)")]
    InvalidPeriod { name: &'static str, value: usize },

    /// A band multiplier is NaN, infinite, zero or negative.
    #[error("invalid parameter `{name}`: {value} (must be finite and positive)")]
    InvalidMultiplier { name: &'static str, value: f64 },
}
