use crate::{
    characteristic::CharacteristicValues,
    coalition::{CoalitionIndex, enumerate_coalitions},
    error::{Result, ShapleyError},
    types::{Coalition, Player, ShapleyOutput, ShapleyValue},
    utils::ordering_weight,
    validation::check_inputs,
};
use rayon::prelude::*;
use tracing::{debug, trace};

/// Games above this size spread the per-player passes over rayon's pool
const PARALLEL_THRESHOLD: usize = 8;

/// Input parameters for Shapley computation
#[derive(Debug, Clone, PartialEq)]
pub struct ShapleyInput {
    pub n_players: usize,
    /// One value per non-empty coalition, in `enumerate_coalitions` order
    pub characteristic_values: Vec<f64>,
}

impl ShapleyInput {
    pub fn new(n_players: usize, characteristic_values: Vec<f64>) -> Self {
        Self {
            n_players,
            characteristic_values,
        }
    }

    /// Compute labelled Shapley values with each player's share of the total
    pub fn compute(&self) -> Result<ShapleyOutput> {
        let values = compute_shapley_values(self.n_players, &self.characteristic_values)?;

        let total_value: f64 = values.iter().map(|v| v.max(0.0)).sum();

        let output = values
            .into_iter()
            .enumerate()
            .map(|(index, value)| {
                let proportion = if total_value > 0.0 {
                    value.max(0.0) / total_value
                } else {
                    0.0
                };

                ShapleyValue {
                    player: Player::new(index),
                    value,
                    proportion,
                }
            })
            .collect();

        Ok(output)
    }
}

impl From<CharacteristicValues> for ShapleyInput {
    fn from(values: CharacteristicValues) -> Self {
        Self {
            n_players: values.n_players(),
            characteristic_values: values.into_vec(),
        }
    }
}

/// Compute the Shapley value of every player.
///
/// `characteristic_values[i]` is the payoff of the coalition at position `i`
/// of [`enumerate_coalitions`]; the empty coalition is worth 0. Inputs are
/// validated before any arithmetic. Results are in ascending player order.
pub fn compute_shapley_values(n_players: usize, characteristic_values: &[f64]) -> Result<Vec<f64>> {
    check_inputs(n_players, characteristic_values)?;

    let (players, index) = enumerate_coalitions(n_players)?;

    debug!(
        n_players,
        n_coalitions = index.len(),
        parallel = n_players > PARALLEL_THRESHOLD,
        "computing shapley values"
    );

    let shapley_values = if n_players > PARALLEL_THRESHOLD {
        players
            .par_iter()
            .map(|&player| player_shapley_value(player, &index, characteristic_values))
            .collect::<Result<Vec<f64>>>()?
    } else {
        players
            .iter()
            .map(|&player| player_shapley_value(player, &index, characteristic_values))
            .collect::<Result<Vec<f64>>>()?
    };

    Ok(shapley_values)
}

/// Weighted sum of `player`'s marginal contributions to every coalition of
/// the other players, the empty coalition included
fn player_shapley_value(player: Player, index: &CoalitionIndex, values: &[f64]) -> Result<f64> {
    let n_players = index.n_players();
    let mut value = 0.0;

    for (without_idx, coalition) in index.iter().enumerate() {
        if coalition.contains(player) {
            continue;
        }

        let with_idx = locate(index, &coalition.with_player(player))?;
        let weight = ordering_weight(coalition.len(), n_players);

        value += (values[with_idx] - values[without_idx]) * weight;
    }

    // Joining the empty coalition, whose value is 0
    let alone_idx = locate(index, &Coalition::singleton(player))?;
    value += values[alone_idx] * ordering_weight(0, n_players);

    trace!(player = %player, value, "player shapley value");

    Ok(value)
}

fn locate(index: &CoalitionIndex, coalition: &Coalition) -> Result<usize> {
    index.position(coalition).ok_or_else(|| {
        ShapleyError::InvariantViolation(format!(
            "coalition {coalition} is missing from the index of {} players",
            index.n_players()
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: &[f64], expected: &[f64]) {
        assert_eq!(actual.len(), expected.len());
        for (i, (val, exp)) in actual.iter().zip(expected).enumerate() {
            assert!(
                (val - exp).abs() < 1e-6,
                "Mismatch at index {i}: got {val}, expected {exp}",
            );
        }
    }

    #[test]
    fn test_one_player() {
        let values = compute_shapley_values(1, &[100.0]).unwrap();
        assert_eq!(values, vec![100.0]);
    }

    #[test]
    fn test_two_players() {
        let values = compute_shapley_values(2, &[98.0, 240.0, 495.0]).unwrap();
        assert_close(&values, &[176.5, 318.5]);
    }

    #[test]
    fn test_player_shapley_value_direct() {
        let (_, index) = enumerate_coalitions(2).unwrap();
        let values = [98.0, 240.0, 495.0];
        // {1} first: 0.5 * (495 - 240); 0 first: 0.5 * 98
        let value = player_shapley_value(Player::new(0), &index, &values).unwrap();
        assert!((value - 176.5).abs() < 1e-12);
    }

    #[test]
    fn test_parallel_and_sequential_agree() {
        // 9 players goes through rayon; compare against the sequential pass
        let n = PARALLEL_THRESHOLD + 1;
        let (players, index) = enumerate_coalitions(n).unwrap();
        let values: Vec<f64> = index
            .iter()
            .map(|c| (c.len() * c.len()) as f64 + c.mask() as f64 * 0.001)
            .collect();

        let parallel = compute_shapley_values(n, &values).unwrap();
        let sequential: Vec<f64> = players
            .iter()
            .map(|&p| player_shapley_value(p, &index, &values).unwrap())
            .collect();

        assert_eq!(parallel, sequential);
    }

    #[test]
    fn test_input_compute_proportions() {
        let output = ShapleyInput::new(2, vec![98.0, 240.0, 495.0])
            .compute()
            .unwrap();

        assert_eq!(output.len(), 2);
        assert_eq!(output[0].player, Player::new(0));
        assert!((output[0].proportion - 176.5 / 495.0).abs() < 1e-12);
        let total: f64 = output.iter().map(|sv| sv.proportion).sum();
        assert!((total - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_input_compute_all_zero() {
        let output = ShapleyInput::new(2, vec![0.0; 3]).compute().unwrap();
        assert!(output.iter().all(|sv| sv.value == 0.0 && sv.proportion == 0.0));
    }

    #[test]
    fn test_missing_coalition_is_invariant_violation() {
        let (_, index) = enumerate_coalitions(2).unwrap();
        let outsider = Coalition::singleton(Player::new(5));
        assert!(matches!(
            locate(&index, &outsider),
            Err(ShapleyError::InvariantViolation(_))
        ));
    }
}
