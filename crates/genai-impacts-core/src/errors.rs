use crate::units::{ConversionError, ParseError};
use thiserror::Error;

/// Error type for invalid formatting or equivalence operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ImpactError {
    #[error("Unit mismatch: cannot convert '{from}' to '{to}'")]
    UnitMismatch { from: String, to: String },
    #[error("Invalid range: expected min <= mean <= max, got min={min}, mean={mean}, max={max}")]
    InvalidRange { min: f64, mean: f64, max: f64 },
    #[error("Unsupported dimension: {0}")]
    UnsupportedDimension(String),
    #[error("Impact bundle mixes point and range estimates ({points} point, {ranges} range)")]
    MixedEstimates { points: usize, ranges: usize },
    #[error("Invalid magnitude for {criterion}: {value} (must be finite and non-negative)")]
    InvalidMagnitude { criterion: String, value: f64 },
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<ConversionError> for ImpactError {
    fn from(e: ConversionError) -> Self {
        match e {
            ConversionError::IncompatibleDimensions {
                from_unit, to_unit, ..
            } => Self::UnitMismatch {
                from: from_unit,
                to: to_unit,
            },
            ConversionError::ParseError(e) => e.into(),
        }
    }
}

impl From<ParseError> for ImpactError {
    fn from(e: ParseError) -> Self {
        Self::UnsupportedDimension(e.to_string())
    }
}

/// Convenience type for `Result<T, ImpactError>`.
pub type ImpactResult<T> = Result<T, ImpactError>;
