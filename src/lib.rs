//! Shapley value computation for cooperative games
//!
//! Given the characteristic value of every non-empty coalition, this library
//! distributes the value of the grand coalition among the players according
//! to their average marginal contribution over all arrival orders.

pub mod characteristic;
pub mod coalition;
pub mod error;
pub mod shapley;
pub mod types;
mod utils;
pub mod validation;

// Re-export main types and functions
pub use characteristic::{CharacteristicValues, generate_coalitions};
pub use coalition::{CoalitionIndex, enumerate_coalitions};
pub use error::{Result, ShapleyError};
pub use shapley::{ShapleyInput, compute_shapley_values};
pub use types::{Coalition, Player, PlayerCount, ShapleyOutput, ShapleyValue};
pub use validation::MAX_PLAYERS;
