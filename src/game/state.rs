use tracing::debug;

use super::board::PlaceError;
use super::{Board, Player};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    Won(Player),
    Draw,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("cell index {0} is outside the board")]
    OutOfRange(usize),
    #[error("cell {0} is already occupied")]
    CellOccupied(usize),
    #[error("the game is already over")]
    GameOver,
    #[error("it is not {0}'s turn")]
    WrongTurn(Player),
}

impl From<PlaceError> for MoveError {
    fn from(err: PlaceError) -> Self {
        match err {
            PlaceError::OutOfRange(index) => MoveError::OutOfRange(index),
            PlaceError::Occupied(index) => MoveError::CellOccupied(index),
        }
    }
}

/// A game in progress. Cheap to copy, so callers and search can hold
/// snapshots freely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    current_player: Player,
    status: GameStatus,
}

impl GameState {
    /// Create initial game state
    pub fn initial() -> Self {
        GameState {
            board: Board::new(),
            current_player: Player::X, // X starts
            status: GameStatus::InProgress,
        }
    }

    /// Put this game back to its initial state
    pub fn reset(&mut self) {
        *self = GameState::initial();
    }

    pub fn current_player(&self) -> Player {
        self.current_player
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Check if game is over
    pub fn is_terminal(&self) -> bool {
        self.status != GameStatus::InProgress
    }

    /// Empty cells, or nothing once the game is over
    pub fn legal_moves(&self) -> Vec<usize> {
        if self.is_terminal() {
            return Vec::new();
        }
        self.board.empty_cells().collect()
    }

    pub fn check_win(&self, player: Player) -> bool {
        self.board.check_win(player)
    }

    /// True when no cell is empty. Only meaningful once `check_win` is false
    /// for the player who just moved.
    pub fn check_draw(&self) -> bool {
        self.board.is_full()
    }

    /// Apply a move and return new state (immutable).
    ///
    /// Errors are checked in order: index range, occupied cell, finished
    /// game, then turn.
    pub fn apply_move(&self, index: usize, player: Player) -> Result<GameState, MoveError> {
        let mut board = self.board;
        // Range and occupancy come from the board itself.
        board.place(index, player.to_cell())?;

        if self.is_terminal() {
            return Err(MoveError::GameOver);
        }
        if player != self.current_player {
            return Err(MoveError::WrongTurn(player));
        }

        let mut next = GameState {
            board,
            current_player: self.current_player,
            status: GameStatus::InProgress,
        };

        if next.check_win(player) {
            next.status = GameStatus::Won(player);
        } else if next.check_draw() {
            next.status = GameStatus::Draw;
        } else {
            next.current_player = player.other();
        }

        debug!(player = %player, index, status = ?next.status, "move applied");
        Ok(next)
    }

    /// Apply move mutably (for UI efficiency). The state is untouched on error.
    pub fn apply_move_mut(&mut self, index: usize, player: Player) -> Result<(), MoveError> {
        *self = self.apply_move(index, player)?;
        Ok(())
    }

    /// One-line status text for display
    pub fn status_message(&self) -> String {
        match self.status {
            GameStatus::InProgress => format!("Player {}'s turn", self.current_player),
            GameStatus::Won(player) => format!("{player} wins!"),
            GameStatus::Draw => "It's a draw!".to_string(),
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::initial()
    }
}
