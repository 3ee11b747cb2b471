//! Error types for ranking parameters
//!
//! Numeric degeneracies (zero denominators) are never errors; they are
//! absorbed by ignore-zero division. Only caller-supplied parameters that
//! would poison every attribute are rejected here.

use thiserror::Error;

/// Errors raised when a ranking operation is given unusable parameters
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RankError {
    /// Damping factor outside [0, 1] or not a finite number
    #[error("Invalid damping factor {0}: must be within [0, 1]")]
    InvalidDampingFactor(f64),

    /// Central target weight outside [0, 1] or not a finite number
    #[error("Invalid target central weight {0}: must be within [0, 1]")]
    InvalidTargetWeight(f64),

    /// Edge inflation magnitude not a finite number
    #[error("Invalid inflation magnitude {0}: must be finite")]
    InvalidMagnitude(f64),

    /// Edge scaling multiplier not a finite number
    #[error("Invalid edge multiplier {0}: must be finite")]
    InvalidMultiplier(f64),
}

pub type RankResult<T> = Result<T, RankError>;
