use thiserror::Error;

/// Error types for the Shapley computation
#[derive(Debug, Error, PartialEq)]
pub enum ShapleyError {
    /// A player count or similar argument outside its domain
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Characteristic values not aligned with the coalition index
    #[error(
        "Expected {expected} characteristic values (one per non-empty coalition), got {actual}."
    )]
    DimensionMismatch { expected: usize, actual: usize },

    /// Too many players
    #[error("There are too many players ({count}); we limit to {limit} to keep enumeration tractable.")]
    TooManyPlayers { count: usize, limit: usize },

    /// A coalition expected in the canonical index was not found
    #[error("Coalition index invariant violated: {0}")]
    InvariantViolation(String),

    /// Malformed tabular input
    #[error("CSV error: {0}")]
    Csv(String),
}

/// Result type alias for Shapley operations
pub type Result<T> = std::result::Result<T, ShapleyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ShapleyError::InvalidArgument("player count must be at least 1".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid argument: player count must be at least 1"
        );

        let err = ShapleyError::DimensionMismatch {
            expected: 7,
            actual: 6,
        };
        assert_eq!(
            err.to_string(),
            "Expected 7 characteristic values (one per non-empty coalition), got 6."
        );

        let err = ShapleyError::TooManyPlayers {
            count: 21,
            limit: 20,
        };
        assert_eq!(
            err.to_string(),
            "There are too many players (21); we limit to 20 to keep enumeration tractable."
        );

        let err = ShapleyError::InvariantViolation("coalition {0, 1} missing".to_string());
        assert_eq!(
            err.to_string(),
            "Coalition index invariant violated: coalition {0, 1} missing"
        );
    }
}
