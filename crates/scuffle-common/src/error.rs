//! Error types for Scuffle.

use thiserror::Error;

/// Top-level error type for Scuffle operations.
#[derive(Debug, Error)]
pub enum ScuffleError {
    /// Tuning table errors
    #[error("tuning error: {0}")]
    Tuning(#[from] TuningError),

    /// Serialization errors
    #[error("serialization error: {0}")]
    Serialization(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while loading or validating a fighter tuning table.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TuningError {
    /// The table text could not be parsed
    #[error("failed to parse tuning table: {0}")]
    Parse(String),

    /// A value is outside its allowed range
    #[error("invalid tuning value `{field}`: {reason}")]
    InvalidValue {
        /// Dotted path of the offending field
        field: String,
        /// What is wrong with it
        reason: String,
    },

    /// A move has no frames
    #[error("move `{0}` has no frames")]
    EmptyMove(String),

    /// The table was written for an incompatible schema
    #[error("unsupported tuning schema {found}, this build reads {supported}")]
    UnsupportedVersion {
        /// Version found in the table
        found: String,
        /// Version this build understands
        supported: String,
    },
}

impl TuningError {
    /// Shorthand for an out-of-range field.
    #[must_use]
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for Scuffle operations.
pub type ScuffleResult<T> = Result<T, ScuffleError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tuning_error_converts() {
        let err: ScuffleError = TuningError::EmptyMove("stand_punch".into()).into();
        assert_eq!(
            err.to_string(),
            "tuning error: move `stand_punch` has no frames"
        );
    }

    #[test]
    fn test_invalid_value_message() {
        let err = TuningError::invalid("physics.gravity", "must be positive");
        assert_eq!(
            err.to_string(),
            "invalid tuning value `physics.gravity`: must be positive"
        );
    }
}
