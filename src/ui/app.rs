use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{backend::Backend, Terminal};
use tracing::{error, info};

use crate::ai::{Difficulty, MoveSelector};
use crate::config::BotConfig;
use crate::error::SessionError;
use crate::game::{GameState, MoveError, SIZE};
use crate::session::{GameSession, StateObserver};

use super::game_view::{self, View};

/// Keeps the status line in sync with the session.
pub struct StatusLine {
    text: String,
}

impl StatusLine {
    fn new() -> Self {
        StatusLine {
            text: GameState::initial().status_message(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl StateObserver for StatusLine {
    fn on_state_changed(&mut self, state: &GameState) {
        self.text = state.status_message();
    }
}

pub struct App {
    session: GameSession<StatusLine>,
    selector: MoveSelector,
    difficulty: Difficulty,
    think_delay: Duration,
    cursor: usize,
    /// When the scheduled bot reply is due. Cleared by reset.
    bot_due: Option<Instant>,
    should_quit: bool,
    message: Option<String>,
}

impl App {
    pub fn new(config: &BotConfig) -> Self {
        App {
            session: GameSession::new(StatusLine::new()),
            selector: MoveSelector::from_config(config),
            difficulty: config.difficulty,
            think_delay: Duration::from_millis(config.think_delay_ms),
            cursor: 4, // Start in the centre
            bot_due: None,
            should_quit: false,
            message: None,
        }
    }

    /// Main application loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            self.handle_events()?;
            self.tick(Instant::now());
        }
        Ok(())
    }

    /// Handle keyboard events
    fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key, Instant::now());
                }
            }
        }
        Ok(())
    }

    /// Handle key press
    fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        // Clear message on any key press
        self.message = None;

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Left if self.cursor % SIZE > 0 => self.cursor -= 1,
            KeyCode::Right if self.cursor % SIZE < SIZE - 1 => self.cursor += 1,
            KeyCode::Up if self.cursor >= SIZE => self.cursor -= SIZE,
            KeyCode::Down if self.cursor < SIZE * (SIZE - 1) => self.cursor += SIZE,
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.place(self.cursor, now);
            }
            KeyCode::Char(c @ '1'..='9') => {
                let index = c as usize - '1' as usize;
                self.cursor = index;
                self.place(index, now);
            }
            KeyCode::Char('d') => {
                self.difficulty = self.difficulty.next();
                info!(difficulty = self.difficulty.name(), "difficulty changed");
                self.message = Some(format!("Difficulty: {}", self.difficulty.name()));
            }
            KeyCode::Char('r') => {
                // Reset game, dropping any scheduled bot reply
                self.bot_due = None;
                self.session.reset();
                self.cursor = 4;
                self.message = Some("New game started!".to_string());
            }
            _ => {}
        }
    }

    /// Place X at `index` and schedule the bot's answer
    fn place(&mut self, index: usize, now: Instant) {
        if self.bot_due.is_some() {
            self.message = Some("Wait for O to move.".to_string());
            return;
        }
        if self.session.state().is_terminal() {
            self.message = Some("Game over! Press 'r' to restart.".to_string());
            return;
        }

        match self.session.on_human_intent(index) {
            Ok(_) => {
                if self.session.bot_to_move() {
                    self.bot_due = Some(now + self.think_delay);
                }
            }
            Err(SessionError::Move(MoveError::CellOccupied(_))) => {
                self.message = Some("Cell is taken!".to_string());
            }
            Err(err) => {
                self.message = Some(err.to_string());
            }
        }
    }

    /// Run the bot once its thinking pause has elapsed
    fn tick(&mut self, now: Instant) {
        let Some(due) = self.bot_due else {
            return;
        };
        if now < due {
            return;
        }
        self.bot_due = None;

        match self
            .session
            .request_bot_move(&mut self.selector, self.difficulty)
        {
            Ok(index) => info!(index, difficulty = self.difficulty.name(), "bot moved"),
            Err(err) => {
                error!(error = %err, "bot move failed");
                self.message = Some(err.to_string());
            }
        }
    }

    /// Render the UI
    fn render(&self, frame: &mut ratatui::Frame) {
        let view = View {
            state: self.session.state(),
            cursor: self.cursor,
            status: self.session.observer().text(),
            message: self.message.as_deref(),
            difficulty: self.difficulty,
            thinking: self.bot_due.is_some(),
        };
        game_view::render(frame, &view);
    }
}
