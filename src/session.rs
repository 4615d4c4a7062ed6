//! The boundary between the game core and whatever presents it.
//!
//! A [`GameSession`] owns one game. The presentation layer forwards human
//! clicks to [`GameSession::on_human_intent`], asks for the reply with
//! [`GameSession::request_bot_move`] when [`GameSession::bot_to_move`] says so,
//! and redraws whenever its [`StateObserver`] fires. Any delay before the bot
//! reply is the caller's business.

use rand::Rng;
use tracing::{debug, warn};

use crate::ai::{Difficulty, MoveSelector};
use crate::error::{MoveSelectorError, SessionError};
use crate::game::{GameState, MoveError, Player};

/// Seat played from the keyboard.
pub const HUMAN: Player = Player::X;
/// Seat played by the selector.
pub const BOT: Player = Player::O;

/// Receives every state the session moves into.
pub trait StateObserver {
    fn on_state_changed(&mut self, state: &GameState);
}

pub struct GameSession<O> {
    state: GameState,
    observer: O,
}

impl<O: StateObserver> GameSession<O> {
    pub fn new(observer: O) -> Self {
        Self::with_state(GameState::initial(), observer)
    }

    /// Continue from an existing position.
    pub fn with_state(state: GameState, observer: O) -> Self {
        GameSession { state, observer }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    /// True when the game is live and waiting on the bot.
    pub fn bot_to_move(&self) -> bool {
        !self.state.is_terminal() && self.state.current_player() == BOT
    }

    /// Apply the human's click. An error leaves the game as it was; callers
    /// treat it as an ignored click.
    pub fn on_human_intent(&mut self, index: usize) -> Result<&GameState, SessionError> {
        self.apply(index, HUMAN)?;
        Ok(&self.state)
    }

    /// Let the bot play one move and return the cell it took.
    ///
    /// The selector is only consulted while the game is live and it is the
    /// bot's turn; otherwise the matching [`MoveError`] comes back.
    pub fn request_bot_move<R: Rng>(
        &mut self,
        selector: &mut MoveSelector<R>,
        difficulty: Difficulty,
    ) -> Result<usize, SessionError> {
        if self.state.is_terminal() {
            return Err(MoveError::GameOver.into());
        }
        if self.state.current_player() != BOT {
            return Err(MoveError::WrongTurn(BOT).into());
        }

        let index = selector
            .choose_move(self.state.board(), difficulty)
            .inspect_err(|err: &MoveSelectorError| {
                warn!(error = %err, board = %self.state.board(), "bot asked to move with no legal move");
            })?;
        self.apply(index, BOT)?;
        Ok(index)
    }

    /// Start a fresh game in this session.
    pub fn reset(&mut self) {
        self.state.reset();
        debug!("game reset");
        self.observer.on_state_changed(&self.state);
    }

    fn apply(&mut self, index: usize, player: Player) -> Result<(), MoveError> {
        self.state.apply_move_mut(index, player)?;
        self.observer.on_state_changed(&self.state);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::{Agent, RandomAgent};
    use crate::game::{Cell, GameStatus};

    #[derive(Default)]
    struct Recorder {
        states: Vec<GameState>,
    }

    impl StateObserver for Recorder {
        fn on_state_changed(&mut self, state: &GameState) {
            self.states.push(*state);
        }
    }

    fn play(moves: &[usize]) -> GameState {
        let mut state = GameState::initial();
        for &index in moves {
            state = state.apply_move(index, state.current_player()).unwrap();
        }
        state
    }

    #[test]
    fn human_then_bot() {
        let mut session = GameSession::new(Recorder::default());
        let mut selector = MoveSelector::with_seed(1);

        assert!(!session.bot_to_move());
        session.on_human_intent(4).unwrap();
        assert!(session.bot_to_move());

        let reply = session
            .request_bot_move(&mut selector, Difficulty::Hard)
            .unwrap();
        assert_ne!(reply, 4);
        assert_eq!(session.state().board().get(reply), Some(Cell::O));
        assert_eq!(session.state().current_player(), HUMAN);

        let states = &session.observer().states;
        assert_eq!(states.len(), 2);
        assert_eq!(states[0].board().get(4), Some(Cell::X));
        assert_eq!(states[0].board().get(reply), Some(Cell::Empty));
        assert_eq!(states[1].board().get(reply), Some(Cell::O));
    }

    #[test]
    fn bot_cannot_move_before_human() {
        let mut session = GameSession::new(Recorder::default());
        let mut selector = MoveSelector::with_seed(1);

        assert_eq!(
            session.request_bot_move(&mut selector, Difficulty::Easy),
            Err(SessionError::Move(MoveError::WrongTurn(BOT)))
        );
        assert!(session.observer().states.is_empty());
    }

    #[test]
    fn rejected_click_is_a_no_op() {
        let mut session = GameSession::new(Recorder::default());
        session.on_human_intent(0).unwrap();
        let before = *session.state();

        assert_eq!(
            session.on_human_intent(0).unwrap_err(),
            SessionError::Move(MoveError::CellOccupied(0))
        );
        assert_eq!(
            session.on_human_intent(1).unwrap_err(),
            SessionError::Move(MoveError::WrongTurn(HUMAN))
        );
        assert_eq!(
            session.on_human_intent(12).unwrap_err(),
            SessionError::Move(MoveError::OutOfRange(12))
        );
        assert_eq!(*session.state(), before);
        assert_eq!(session.observer().states.len(), 1);
    }

    #[test]
    fn human_move_that_draws_never_asks_the_bot() {
        // Eight moves in, X's last move fills the board: X O X / X O O / O X X
        let state = play(&[0, 1, 2, 4, 3, 5, 7, 6]);
        let mut session = GameSession::with_state(state, Recorder::default());
        let mut selector = MoveSelector::with_seed(1);

        session.on_human_intent(8).unwrap();
        assert_eq!(session.state().status(), GameStatus::Draw);
        assert!(!session.bot_to_move());

        // The selector would answer NoLegalMove; the session stops first.
        assert_eq!(
            session.request_bot_move(&mut selector, Difficulty::Hard),
            Err(SessionError::Move(MoveError::GameOver))
        );
        assert_eq!(session.state().status_message(), "It's a draw!");
    }

    #[test]
    fn bot_win_ends_the_game() {
        // O O . / X X . / X . .  with O to move
        let state = play(&[3, 0, 4, 1, 6]);
        let mut session = GameSession::with_state(state, Recorder::default());
        let mut selector = MoveSelector::with_seed(1);

        assert_eq!(
            session.request_bot_move(&mut selector, Difficulty::Hard),
            Ok(2)
        );
        assert!(session.state().check_win(Player::O));
        assert_eq!(session.state().status(), GameStatus::Won(Player::O));
        assert_eq!(session.state().status_message(), "O wins!");
        assert!(session.on_human_intent(8).is_err());
    }

    #[test]
    fn reset_starts_over_and_notifies() {
        let mut session = GameSession::new(Recorder::default());
        session.on_human_intent(0).unwrap();
        session.reset();

        assert_eq!(*session.state(), GameState::initial());
        let states = &session.observer().states;
        assert_eq!(states.last(), Some(&GameState::initial()));
    }

    #[test]
    fn hard_bot_never_loses_a_session() {
        for seed in 0..10 {
            let mut session = GameSession::new(Recorder::default());
            let mut selector = MoveSelector::with_seed(seed);
            let mut human = RandomAgent::with_seed(seed + 100);

            while !session.state().is_terminal() {
                let index = human.select_action(session.state().board()).unwrap();
                session.on_human_intent(index).unwrap();
                if session.bot_to_move() {
                    session
                        .request_bot_move(&mut selector, Difficulty::Hard)
                        .unwrap();
                }
            }

            assert_ne!(session.state().status(), GameStatus::Won(HUMAN));
        }
    }

    #[test]
    fn independent_sessions_do_not_share_state() {
        let mut a = GameSession::new(Recorder::default());
        let b = GameSession::new(Recorder::default());
        a.on_human_intent(4).unwrap();
        assert_eq!(b.state().board().get(4), Some(Cell::Empty));
    }
}
