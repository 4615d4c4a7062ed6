use crate::error::MoveSelectorError;
use crate::game::Board;

/// Universal interface for automated players.
pub trait Agent {
    /// Select a cell index given the current board.
    fn select_action(&mut self, board: &Board) -> Result<usize, MoveSelectorError>;

    /// Return the agent's display name.
    fn name(&self) -> &str;
}
