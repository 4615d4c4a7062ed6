use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::MoveSelectorError;
use crate::game::Board;

use super::agent::Agent;

/// Pick an empty cell uniformly at random.
pub fn random_move<R: Rng>(board: &Board, rng: &mut R) -> Result<usize, MoveSelectorError> {
    let empty: Vec<usize> = board.empty_cells().collect();
    if empty.is_empty() {
        return Err(MoveSelectorError::NoLegalMove);
    }
    Ok(empty[rng.random_range(0..empty.len())])
}

/// An agent that selects uniformly at random from the empty cells.
pub struct RandomAgent<R = StdRng> {
    rng: R,
}

impl RandomAgent {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RandomAgent<R> {
    pub fn with_rng(rng: R) -> Self {
        RandomAgent { rng }
    }
}

impl Default for RandomAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> Agent for RandomAgent<R> {
    fn select_action(&mut self, board: &Board) -> Result<usize, MoveSelectorError> {
        random_move(board, &mut self.rng)
    }

    fn name(&self) -> &str {
        "Random"
    }
}
