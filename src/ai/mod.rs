//! The automated opponent: the agent seam, a uniform random player, the
//! exhaustive minimax player, and the difficulty-tiered selector over both.

mod agent;
pub mod minimax;
mod random;
mod selector;

pub use agent::Agent;
pub use minimax::{best_move, minimax, MinimaxAgent};
pub use random::{random_move, RandomAgent};
pub use selector::{Difficulty, MoveSelector, Strategy, TieredAgent, DEFAULT_MINIMAX_PROBABILITY};
