use tracing::trace;

use crate::error::MoveSelectorError;
use crate::game::{Board, Player};

use super::agent::Agent;

/// Score of a win found at depth 0. Deeper wins score less, deeper losses
/// score more, so the search prefers quick wins and slow losses.
const WIN_SCORE: i32 = 10;

/// Exhaustive minimax score of `board` from O's point of view.
///
/// `maximizing` is true when O is to move. Terminal positions are checked in
/// order: O has won, X has won, board full. There is no pruning; the full tree
/// from any 3x3 position is small. Every branch gets its own board copy.
pub fn minimax(board: &Board, depth: i32, maximizing: bool) -> i32 {
    if board.check_win(Player::O) {
        return WIN_SCORE - depth;
    }
    if board.check_win(Player::X) {
        return depth - WIN_SCORE;
    }
    if board.is_full() {
        return 0;
    }

    let mover = if maximizing { Player::O } else { Player::X };
    let scores = board
        .empty_cells()
        .filter_map(|index| board.with(index, mover.to_cell()))
        .map(|next| minimax(&next, depth + 1, !maximizing));

    if maximizing {
        scores.max().unwrap_or(0)
    } else {
        scores.min().unwrap_or(0)
    }
}

/// Best cell for O. Candidates are tried 0 to 8 and only a strictly greater
/// score replaces the current pick, so ties go to the lowest index.
pub fn best_move(board: &Board) -> Result<usize, MoveSelectorError> {
    let mut best: Option<(usize, i32)> = None;

    for index in board.empty_cells() {
        let Some(next) = board.with(index, Player::O.to_cell()) else {
            continue;
        };
        let score = minimax(&next, 0, false);
        trace!(index, score, "minimax candidate");
        if best.is_none_or(|(_, best_score)| score > best_score) {
            best = Some((index, score));
        }
    }

    best.map(|(index, _)| index)
        .ok_or(MoveSelectorError::NoLegalMove)
}

/// Always plays the minimax move for O.
#[derive(Debug, Clone, Copy, Default)]
pub struct MinimaxAgent;

impl MinimaxAgent {
    pub fn new() -> Self {
        MinimaxAgent
    }
}

impl Agent for MinimaxAgent {
    fn select_action(&mut self, board: &Board) -> Result<usize, MoveSelectorError> {
        best_move(board)
    }

    fn name(&self) -> &str {
        "Minimax"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::RandomAgent;
    use crate::game::{GameState, GameStatus};

    fn board(s: &str) -> Board {
        s.parse().unwrap()
    }

    // --- Scoring tests ---

    #[test]
    fn terminal_scores() {
        assert_eq!(minimax(&board("OOO XX. X.."), 0, false), 10);
        assert_eq!(minimax(&board("OOO XX. X.."), 3, false), 7);
        assert_eq!(minimax(&board("XXX OO. ..."), 2, true), -8);
        assert_eq!(minimax(&board("XOX XOO OXX"), 4, true), 0);
    }

    #[test]
    fn o_win_checked_before_x_win() {
        // Unreachable in play, but the order is fixed
        assert_eq!(minimax(&board("OOO XXX ..."), 0, true), 10);
    }

    #[test]
    fn immediate_win_scores_nine() {
        // O to move can complete the top row
        assert_eq!(minimax(&board("OO. XX. X.."), 0, true), 9);
    }

    #[test]
    fn empty_board_is_a_draw() {
        assert_eq!(minimax(&Board::new(), 0, false), 0);
    }

    // --- Move choice tests ---

    #[test]
    fn opening_is_corner_or_center() {
        let index = best_move(&Board::new()).unwrap();
        assert!(
            [0, 2, 4, 6, 8].contains(&index),
            "opening on edge {index}"
        );
        // Every opening draws, so the lowest index wins the tie
        assert_eq!(index, 0);
    }

    #[test]
    fn blocks_row() {
        assert_eq!(best_move(&board("XX. ... ...")), Ok(2));
    }

    #[test]
    fn takes_winning_move() {
        assert_eq!(best_move(&board("OO. XX. X..")), Ok(2));
    }

    #[test]
    fn prefers_win_over_block() {
        // X threatens 5, O can win at 2
        assert_eq!(best_move(&board("OO. XX. ..X")), Ok(2));
    }

    #[test]
    fn answers_center_with_corner() {
        let mut state = GameState::initial();
        state = state.apply_move(4, Player::X).unwrap();
        let index = best_move(state.board()).unwrap();
        assert!([0, 2, 6, 8].contains(&index), "edge reply {index} loses");
    }

    #[test]
    fn full_board_has_no_move() {
        assert_eq!(
            best_move(&board("XOX XOO OXX")),
            Err(MoveSelectorError::NoLegalMove)
        );
    }

    // --- Exhaustive play ---

    /// Walk every X line against the minimax O and return how many games
    /// finished, failing on any X win.
    fn replay_all(state: GameState) -> usize {
        let mut finished = 0;
        for index in state.legal_moves() {
            let after_x = state.apply_move(index, Player::X).unwrap();
            assert_ne!(
                after_x.status(),
                GameStatus::Won(Player::X),
                "X found a win:\n{}",
                after_x.board()
            );
            if after_x.is_terminal() {
                finished += 1;
                continue;
            }

            let reply = best_move(after_x.board()).unwrap();
            let after_o = after_x.apply_move(reply, Player::O).unwrap();
            if after_o.is_terminal() {
                finished += 1;
            } else {
                finished += replay_all(after_o);
            }
        }
        finished
    }

    #[test]
    fn never_loses_to_any_sequence() {
        let games = replay_all(GameState::initial());
        assert!(games > 0);
    }

    #[test]
    fn beats_or_draws_random_agent() {
        for seed in 0..20 {
            let mut bot = MinimaxAgent::new();
            let mut random = RandomAgent::with_seed(seed);
            let mut state = GameState::initial();

            while !state.is_terminal() {
                let player = state.current_player();
                let index = match player {
                    Player::X => random.select_action(state.board()),
                    Player::O => bot.select_action(state.board()),
                }
                .unwrap();
                state = state.apply_move(index, player).unwrap();
            }

            assert_ne!(state.status(), GameStatus::Won(Player::X), "seed {seed}");
        }
    }

    #[test]
    fn name_is_minimax() {
        assert_eq!(MinimaxAgent::new().name(), "Minimax");
    }
}
