use crate::{
    error::{Result, ShapleyError},
    validation::{MAX_PLAYERS, check_player_limit},
};
use std::{
    cmp::Ordering,
    fmt::{Display, Formatter},
};

#[cfg(feature = "borsh")]
use borsh::{BorshDeserialize, BorshSerialize};

#[cfg(feature = "serde")]
use {
    serde::{Deserialize, Serialize},
    tabled::Tabled,
};

/// A player, identified by its zero-based index.
///
/// Indices are below `MAX_PLAYERS`; build one from outside the crate with
/// `Player::try_from`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "usize", into = "usize"))]
#[cfg_attr(feature = "borsh", derive(BorshSerialize))]
pub struct Player(usize);

impl Player {
    /// Callers guarantee `index < MAX_PLAYERS`
    pub(crate) fn new(index: usize) -> Self {
        debug_assert!(index < MAX_PLAYERS);
        Player(index)
    }

    pub fn index(&self) -> usize {
        self.0
    }

    /// Canonical label ("0", "1", ...)
    pub fn label(&self) -> String {
        self.0.to_string()
    }

    pub(crate) fn bit(&self) -> u32 {
        1 << self.0
    }
}

impl TryFrom<usize> for Player {
    type Error = ShapleyError;

    fn try_from(index: usize) -> Result<Self> {
        if index >= MAX_PLAYERS {
            return Err(ShapleyError::InvalidArgument(format!(
                "player index {index} is out of range; games have at most {MAX_PLAYERS} players"
            )));
        }
        Ok(Player(index))
    }
}

impl From<Player> for usize {
    fn from(player: Player) -> Self {
        player.0
    }
}

#[cfg(feature = "borsh")]
impl BorshDeserialize for Player {
    fn deserialize_reader<R: std::io::Read>(reader: &mut R) -> std::io::Result<Self> {
        let index = usize::deserialize_reader(reader)?;
        Player::try_from(index)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))
    }
}

impl Display for Player {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validated number of players in a game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerCount(usize);

impl PlayerCount {
    pub fn get(&self) -> usize {
        self.0
    }
}

impl TryFrom<usize> for PlayerCount {
    type Error = ShapleyError;

    fn try_from(n: usize) -> Result<Self> {
        check_player_limit(n)?;
        Ok(PlayerCount(n))
    }
}

impl TryFrom<i64> for PlayerCount {
    type Error = ShapleyError;

    fn try_from(n: i64) -> Result<Self> {
        let n = usize::try_from(n).map_err(|_| {
            ShapleyError::InvalidArgument(format!("player count must not be negative, got {n}"))
        })?;
        PlayerCount::try_from(n)
    }
}

/// A set of players stored as a bitmask over player indices.
///
/// Members are always yielded in ascending index order, so two coalitions
/// with the same players are equal however they were built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Coalition {
    mask: u32,
}

impl Coalition {
    /// The empty coalition (never part of an enumeration)
    pub fn empty() -> Self {
        Coalition { mask: 0 }
    }

    pub fn singleton(player: Player) -> Self {
        Coalition { mask: player.bit() }
    }

    pub fn from_players<I: IntoIterator<Item = Player>>(players: I) -> Self {
        let mask = players.into_iter().fold(0, |mask, p| mask | p.bit());
        Coalition { mask }
    }

    pub fn mask(&self) -> u32 {
        self.mask
    }

    pub fn len(&self) -> usize {
        self.mask.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.mask == 0
    }

    pub fn contains(&self, player: Player) -> bool {
        self.mask & player.bit() != 0
    }

    /// This coalition joined by `player`
    pub fn with_player(&self, player: Player) -> Self {
        Coalition {
            mask: self.mask | player.bit(),
        }
    }

    /// This coalition with `player` removed
    pub fn without_player(&self, player: Player) -> Self {
        Coalition {
            mask: self.mask & !player.bit(),
        }
    }

    /// Members in ascending index order
    pub fn players(&self) -> impl Iterator<Item = Player> + '_ {
        let mask = self.mask;
        (0..u32::BITS as usize)
            .filter(move |&i| mask & (1 << i) != 0)
            .map(Player::new)
    }
}

/// Canonical order: by size, then lexicographically by member indices
impl Ord for Coalition {
    fn cmp(&self, other: &Self) -> Ordering {
        self.len()
            .cmp(&other.len())
            .then_with(|| self.players().cmp(other.players()))
    }
}

impl PartialOrd for Coalition {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Display for Coalition {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let members: Vec<String> = self.players().map(|p| p.label()).collect();
        write!(f, "{{{}}}", members.join(", "))
    }
}

/// Individual Shapley value for a player
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize, Tabled))]
#[cfg_attr(feature = "borsh", derive(BorshSerialize, BorshDeserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct ShapleyValue {
    pub player: Player,
    pub value: f64,
    #[cfg_attr(feature = "serde", tabled(display = "display_as_percent"))]
    pub proportion: f64,
}

/// Render a proportion as a percentage with two decimals
#[cfg(feature = "serde")]
pub fn display_as_percent(proportion: &f64) -> String {
    format!("{:.2}%", proportion * 100.0)
}

impl Display for ShapleyValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "player: {}, value: {}, proportion: {}",
            self.player, self.value, self.proportion
        )
    }
}

/// Shapley values in ascending player order
pub type ShapleyOutput = Vec<ShapleyValue>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coalition_is_canonical() {
        let a = Coalition::from_players([Player::new(2), Player::new(0)]);
        let b = Coalition::singleton(Player::new(0)).with_player(Player::new(2));
        assert_eq!(a, b);
        assert_eq!(a.to_string(), "{0, 2}");
        assert_eq!(a.players().collect::<Vec<_>>(), vec![Player::new(0), Player::new(2)]);
    }

    #[test]
    fn test_coalition_membership() {
        let c = Coalition::from_players([Player::new(1), Player::new(3)]);
        assert!(c.contains(Player::new(3)));
        assert!(!c.contains(Player::new(0)));
        assert_eq!(c.len(), 2);
        assert_eq!(c.without_player(Player::new(1)), Coalition::singleton(Player::new(3)));
        assert!(Coalition::empty().is_empty());
    }

    #[test]
    fn test_canonical_order() {
        let p = Player::new;
        let mut coalitions = vec![
            Coalition::from_players([p(1), p(2)]),
            Coalition::singleton(p(2)),
            Coalition::from_players([p(0), p(3)]),
            Coalition::from_players([p(0), p(2)]),
            Coalition::singleton(p(0)),
        ];
        coalitions.sort();
        let labels: Vec<String> = coalitions.iter().map(|c| c.to_string()).collect();
        assert_eq!(labels, vec!["{0}", "{2}", "{0, 2}", "{0, 3}", "{1, 2}"]);
    }

    #[test]
    fn test_player_labels_order_numerically() {
        assert!(Player::new(9) < Player::new(10));
        assert_eq!(Player::new(10).label(), "10");
    }

    #[test]
    fn test_player_index_is_bounded() {
        assert_eq!(Player::try_from(3usize).unwrap(), Player::new(3));
        assert_eq!(
            Player::try_from(MAX_PLAYERS - 1).unwrap().index(),
            MAX_PLAYERS - 1
        );
        for index in [MAX_PLAYERS, 32, 40] {
            assert!(matches!(
                Player::try_from(index),
                Err(ShapleyError::InvalidArgument(msg)) if msg.contains(&index.to_string())
            ));
        }
    }

    #[test]
    fn test_player_count_conversion() {
        assert_eq!(PlayerCount::try_from(3i64).unwrap().get(), 3);
        assert_eq!(PlayerCount::try_from(0i64).unwrap().get(), 0);
        assert!(matches!(
            PlayerCount::try_from(-1i64),
            Err(ShapleyError::InvalidArgument(_))
        ));
        assert!(matches!(
            PlayerCount::try_from(MAX_PLAYERS + 1),
            Err(ShapleyError::TooManyPlayers { .. })
        ));
    }
}
