//! Building characteristic values aligned to the canonical coalition order.

use crate::{
    coalition::{Combinations, CoalitionIndex, enumerate_coalitions},
    error::{Result, ShapleyError},
    types::{Coalition, Player},
    validation::check_dimensions,
};

/// Characteristic values of a game, tied to the coalition index they align with
#[derive(Debug, Clone, PartialEq)]
pub struct CharacteristicValues {
    index: CoalitionIndex,
    values: Vec<f64>,
}

impl CharacteristicValues {
    /// Wrap values given in canonical order
    pub fn new(n_players: usize, values: Vec<f64>) -> Result<Self> {
        let (_, index) = enumerate_coalitions(n_players)?;
        check_dimensions(n_players, values.len())?;
        Ok(Self { index, values })
    }

    /// Evaluate `payoff` on every non-empty coalition in canonical order
    pub fn from_fn<F>(n_players: usize, payoff: F) -> Result<Self>
    where
        F: FnMut(&Coalition) -> f64,
    {
        let (_, index) = enumerate_coalitions(n_players)?;
        let values = index.iter().map(payoff).collect();
        Ok(Self { index, values })
    }

    /// Additive game: each coalition is worth the sum of its members' attributes
    pub fn additive(attributes: &[f64]) -> Result<Self> {
        Self::from_fn(attributes.len(), |coalition| {
            coalition.players().map(|p| attributes[p.index()]).sum()
        })
    }

    pub fn n_players(&self) -> usize {
        self.index.n_players()
    }

    pub fn index(&self) -> &CoalitionIndex {
        &self.index
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    pub fn into_vec(self) -> Vec<f64> {
        self.values
    }

    /// Value of `coalition`; the empty coalition is worth 0
    pub fn value_of(&self, coalition: &Coalition) -> Result<f64> {
        if coalition.is_empty() {
            return Ok(0.0);
        }
        self.index
            .position(coalition)
            .map(|position| self.values[position])
            .ok_or_else(|| {
                ShapleyError::InvalidArgument(format!(
                    "coalition {coalition} is not part of a {}-player game",
                    self.n_players()
                ))
            })
    }

    /// Value of the coalition of all players
    pub fn grand_coalition_value(&self) -> f64 {
        self.values.last().copied().unwrap_or(0.0)
    }

    /// Values of every coalition, paired, in canonical order
    pub fn iter(&self) -> impl Iterator<Item = (&Coalition, f64)> + '_ {
        self.index.iter().zip(self.values.iter().copied())
    }

    /// Whether swapping `a` and `b` in every coalition leaves all values unchanged
    pub fn are_interchangeable(&self, a: Player, b: Player) -> bool {
        self.iter().all(|(coalition, value)| {
            let swapped = swap_members(coalition, a, b);
            self.value_of(&swapped)
                .is_ok_and(|other| other == value)
        })
    }

    /// Whether `player` never changes the value of a coalition it joins
    pub fn is_null_player(&self, player: Player) -> bool {
        self.iter()
            .filter(|(coalition, _)| coalition.contains(player))
            .all(|(coalition, value)| {
                self.value_of(&coalition.without_player(player))
                    .is_ok_and(|without| without == value)
            })
    }
}

fn swap_members(coalition: &Coalition, a: Player, b: Player) -> Coalition {
    match (coalition.contains(a), coalition.contains(b)) {
        (true, false) => coalition.without_player(a).with_player(b),
        (false, true) => coalition.without_player(b).with_player(a),
        _ => *coalition,
    }
}

/// Every non-empty combination of `actors`, by increasing size and then in
/// the order the actors were given
pub fn generate_coalitions<T: Clone>(actors: &[T]) -> Vec<Vec<T>> {
    (1..=actors.len())
        .flat_map(|size| Combinations::new(actors.len(), size))
        .map(|members| members.into_iter().map(|i| actors[i].clone()).collect())
        .collect()
}

#[cfg(feature = "serde")]
mod csv_support {
    use super::*;
    use serde::Deserialize;
    use std::{io::Read, path::Path};

    #[derive(Debug, Deserialize)]
    struct ValueRecord {
        #[serde(rename = "Value")]
        value: f64,
    }

    #[derive(Debug, Deserialize)]
    struct AttributeRecord {
        #[serde(rename = "Player")]
        player: String,
        #[serde(rename = "Value")]
        value: f64,
    }

    fn csv_error(e: csv::Error) -> ShapleyError {
        ShapleyError::Csv(e.to_string())
    }

    impl CharacteristicValues {
        /// Read a single `Value` column, one row per coalition in canonical order
        pub fn from_csv<P: AsRef<Path>>(path: P, n_players: usize) -> Result<Self> {
            let reader = csv::Reader::from_path(path).map_err(csv_error)?;
            Self::read_values(reader, n_players)
        }

        pub fn from_csv_reader<R: Read>(reader: R, n_players: usize) -> Result<Self> {
            Self::read_values(csv::Reader::from_reader(reader), n_players)
        }

        fn read_values<R: Read>(mut reader: csv::Reader<R>, n_players: usize) -> Result<Self> {
            let values = reader
                .deserialize()
                .map(|record| record.map(|r: ValueRecord| r.value).map_err(csv_error))
                .collect::<Result<Vec<f64>>>()?;

            Self::new(n_players, values)
        }

        /// Read `Player,Value` rows and build the additive game over them.
        ///
        /// Players are indexed in row order; their names are returned alongside.
        pub fn additive_from_csv<P: AsRef<Path>>(path: P) -> Result<(Vec<String>, Self)> {
            let reader = csv::Reader::from_path(path).map_err(csv_error)?;
            Self::read_attributes(reader)
        }

        pub fn additive_from_csv_reader<R: Read>(reader: R) -> Result<(Vec<String>, Self)> {
            Self::read_attributes(csv::Reader::from_reader(reader))
        }

        fn read_attributes<R: Read>(mut reader: csv::Reader<R>) -> Result<(Vec<String>, Self)> {
            let mut names = Vec::new();
            let mut attributes = Vec::new();
            for result in reader.deserialize() {
                let record: AttributeRecord = result.map_err(csv_error)?;
                names.push(record.player);
                attributes.push(record.value);
            }

            Ok((names, Self::additive(&attributes)?))
        }
    }

}
