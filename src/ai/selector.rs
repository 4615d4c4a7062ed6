use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, warn};

use crate::config::BotConfig;
use crate::error::MoveSelectorError;
use crate::game::Board;

use super::agent::Agent;
use super::minimax::best_move;
use super::random::random_move;

/// Chance that a Medium bot plays the minimax move on a given turn.
pub const DEFAULT_MINIMAX_PROBABILITY: f64 = 0.5;

/// How hard the automated opponent plays.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    #[default]
    Hard,
}

impl Difficulty {
    pub fn name(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    /// Cycle Easy -> Medium -> Hard -> Easy
    pub fn next(self) -> Difficulty {
        match self {
            Difficulty::Easy => Difficulty::Medium,
            Difficulty::Medium => Difficulty::Hard,
            Difficulty::Hard => Difficulty::Easy,
        }
    }
}

/// The policy used for one bot turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Random,
    Minimax,
}

/// Picks the bot's cell for a board and a difficulty.
///
/// Generic over the random source so tests can seed it. The coin flip for
/// Medium is made fresh on every call.
pub struct MoveSelector<R = StdRng> {
    rng: R,
    minimax_probability: f64,
}

impl MoveSelector {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    /// Build from `[bot]` settings. A probability that `AppConfig::validate`
    /// would reject is not an error here: it goes through
    /// [`with_minimax_probability`](MoveSelector::with_minimax_probability)
    /// and the adjustment is logged.
    pub fn from_config(config: &BotConfig) -> Self {
        let selector = match config.seed {
            Some(seed) => Self::with_seed(seed),
            None => Self::new(),
        };
        let requested = config.medium_minimax_probability;
        let selector = selector.with_minimax_probability(requested);
        if !(0.0..=1.0).contains(&requested) {
            warn!(
                requested,
                used = selector.minimax_probability(),
                "medium_minimax_probability outside [0, 1]"
            );
        }
        selector
    }
}

impl Default for MoveSelector {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> MoveSelector<R> {
    pub fn with_rng(rng: R) -> Self {
        MoveSelector {
            rng,
            minimax_probability: DEFAULT_MINIMAX_PROBABILITY,
        }
    }

    /// Set the Medium coin bias. Values are clamped into [0, 1]; NaN keeps
    /// the current value.
    pub fn with_minimax_probability(mut self, probability: f64) -> Self {
        if !probability.is_nan() {
            self.minimax_probability = probability.clamp(0.0, 1.0);
        }
        self
    }

    pub fn minimax_probability(&self) -> f64 {
        self.minimax_probability
    }

    /// Decide which policy plays this turn. Only Medium draws from the RNG.
    pub fn strategy_for(&mut self, difficulty: Difficulty) -> Strategy {
        match difficulty {
            Difficulty::Easy => Strategy::Random,
            Difficulty::Hard => Strategy::Minimax,
            Difficulty::Medium => {
                if self.rng.random_bool(self.minimax_probability) {
                    Strategy::Minimax
                } else {
                    Strategy::Random
                }
            }
        }
    }

    /// Choose the bot's cell. Fails with `NoLegalMove` on a full board.
    pub fn choose_move(
        &mut self,
        board: &Board,
        difficulty: Difficulty,
    ) -> Result<usize, MoveSelectorError> {
        if board.is_full() {
            return Err(MoveSelectorError::NoLegalMove);
        }

        let strategy = self.strategy_for(difficulty);
        let index = match strategy {
            Strategy::Random => random_move(board, &mut self.rng)?,
            Strategy::Minimax => best_move(board)?,
        };

        debug!(difficulty = difficulty.name(), ?strategy, index, "bot move chosen");
        Ok(index)
    }
}

/// A selector pinned to one difficulty, usable wherever an [`Agent`] is.
pub struct TieredAgent<R = StdRng> {
    selector: MoveSelector<R>,
    difficulty: Difficulty,
    name: String,
}

impl<R: Rng> TieredAgent<R> {
    pub fn new(selector: MoveSelector<R>, difficulty: Difficulty) -> Self {
        TieredAgent {
            selector,
            difficulty,
            name: format!("Bot ({})", difficulty.name()),
        }
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }
}

impl<R: Rng> Agent for TieredAgent<R> {
    fn select_action(&mut self, board: &Board) -> Result<usize, MoveSelectorError> {
        self.selector.choose_move(board, self.difficulty)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
