//! Core Tic-Tac-Toe game logic: board representation, player types, and the
//! game state machine with immutable transitions.

mod board;
mod player;
mod state;

pub use board::{Board, BoardParseError, Cell, PlaceError, CELLS, SIZE, WIN_LINES};
pub use player::Player;
pub use state::{GameState, GameStatus, MoveError};
