use crate::{
    error::Result,
    types::{Coalition, Player},
    utils::coalition_count,
    validation::check_player_limit,
};
use std::{collections::HashMap, ops::Index};
use tracing::debug;

/// Every non-empty coalition over `n_players`, in canonical order, with a
/// mask -> position map for constant time lookup
#[derive(Debug, Clone, PartialEq)]
pub struct CoalitionIndex {
    n_players: usize,
    coalitions: Vec<Coalition>,
    positions: HashMap<u32, usize>,
}

impl CoalitionIndex {
    fn from_coalitions(n_players: usize, coalitions: Vec<Coalition>) -> Self {
        let positions = coalitions
            .iter()
            .enumerate()
            .map(|(position, coalition)| (coalition.mask(), position))
            .collect();

        Self {
            n_players,
            coalitions,
            positions,
        }
    }

    pub fn n_players(&self) -> usize {
        self.n_players
    }

    pub fn len(&self) -> usize {
        self.coalitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coalitions.is_empty()
    }

    pub fn get(&self, position: usize) -> Option<&Coalition> {
        self.coalitions.get(position)
    }

    /// Position of `coalition` in the canonical order
    pub fn position(&self, coalition: &Coalition) -> Option<usize> {
        self.positions.get(&coalition.mask()).copied()
    }

    /// The coalition of all players (last in canonical order)
    pub fn grand_coalition(&self) -> Option<&Coalition> {
        self.coalitions.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Coalition> {
        self.coalitions.iter()
    }

    pub fn as_slice(&self) -> &[Coalition] {
        &self.coalitions
    }
}

impl Index<usize> for CoalitionIndex {
    type Output = Coalition;

    fn index(&self, position: usize) -> &Self::Output {
        &self.coalitions[position]
    }
}

impl<'a> IntoIterator for &'a CoalitionIndex {
    type Item = &'a Coalition;
    type IntoIter = std::slice::Iter<'a, Coalition>;

    fn into_iter(self) -> Self::IntoIter {
        self.coalitions.iter()
    }
}

/// k-combinations of `0..n` in ascending lexicographic order
pub(crate) struct Combinations {
    n: usize,
    indices: Vec<usize>,
    exhausted: bool,
}

impl Combinations {
    pub(crate) fn new(n: usize, k: usize) -> Self {
        Self {
            n,
            indices: (0..k).collect(),
            exhausted: k > n,
        }
    }
}

impl Iterator for Combinations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }
        let current = self.indices.clone();

        // Advance the rightmost index that still has room
        let k = self.indices.len();
        match (0..k).rev().find(|&i| self.indices[i] < self.n - k + i) {
            Some(i) => {
                self.indices[i] += 1;
                for j in i + 1..k {
                    self.indices[j] = self.indices[j - 1] + 1;
                }
            }
            None => self.exhausted = true,
        }

        Some(current)
    }
}

/// Enumerate the players and every non-empty coalition over them.
///
/// Coalitions come by increasing size, and within a size in lexicographic
/// order of member indices. This order binds a coalition to its position in
/// the characteristic value array. `n_players == 0` yields empty sequences.
pub fn enumerate_coalitions(n_players: usize) -> Result<(Vec<Player>, CoalitionIndex)> {
    check_player_limit(n_players)?;

    let players: Vec<Player> = (0..n_players).map(Player::new).collect();

    let mut coalitions = Vec::with_capacity(coalition_count(n_players));
    for size in 1..=n_players {
        coalitions.extend(
            Combinations::new(n_players, size)
                .map(|members| Coalition::from_players(members.into_iter().map(Player::new))),
        );
    }

    debug!(
        n_players,
        n_coalitions = coalitions.len(),
        "enumerated coalitions"
    );

    Ok((players, CoalitionIndex::from_coalitions(n_players, coalitions)))
}
