use crate::{
    error::{Result, ShapleyError},
    utils::coalition_count,
};

/// Hard limit on players; the index holds 2^n - 1 coalitions
pub const MAX_PLAYERS: usize = 20;

/// Reject player counts the enumerator cannot represent
pub(crate) fn check_player_limit(n_players: usize) -> Result<()> {
    if n_players > MAX_PLAYERS {
        return Err(ShapleyError::TooManyPlayers {
            count: n_players,
            limit: MAX_PLAYERS,
        });
    }
    Ok(())
}

/// Check that the characteristic values line up with the coalition index
pub(crate) fn check_dimensions(n_players: usize, n_values: usize) -> Result<()> {
    let expected = coalition_count(n_players);
    if n_values != expected {
        return Err(ShapleyError::DimensionMismatch {
            expected,
            actual: n_values,
        });
    }
    Ok(())
}

/// Validate all inputs for a Shapley computation
pub(crate) fn check_inputs(n_players: usize, characteristic_values: &[f64]) -> Result<()> {
    if n_players == 0 {
        return Err(ShapleyError::InvalidArgument(
            "Shapley values require at least one player.".to_string(),
        ));
    }
    check_player_limit(n_players)?;
    check_dimensions(n_players, characteristic_values.len())?;

    if let Some(i) = characteristic_values.iter().position(|v| !v.is_finite()) {
        return Err(ShapleyError::InvalidArgument(format!(
            "characteristic value at position {i} is not a finite number"
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_inputs() {
        assert!(check_inputs(1, &[100.0]).is_ok());
        assert!(check_inputs(2, &[98.0, 240.0, 495.0]).is_ok());
    }

    #[test]
    fn test_zero_players() {
        assert!(matches!(
            check_inputs(0, &[]),
            Err(ShapleyError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_too_many_players() {
        let result = check_inputs(MAX_PLAYERS + 1, &[]);
        assert_eq!(
            result,
            Err(ShapleyError::TooManyPlayers {
                count: 21,
                limit: 20
            })
        );
    }

    #[test]
    fn test_dimension_mismatch() {
        let result = check_inputs(3, &[1.0; 6]);
        assert_eq!(
            result,
            Err(ShapleyError::DimensionMismatch {
                expected: 7,
                actual: 6
            })
        );
    }

    #[test]
    fn test_non_finite_value() {
        let result = check_inputs(2, &[1.0, f64::NAN, 3.0]);
        assert!(matches!(result, Err(ShapleyError::InvalidArgument(msg)) if msg.contains("position 1")));
    }
}
