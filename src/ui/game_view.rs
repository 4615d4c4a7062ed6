use crate::ai::Difficulty;
use crate::game::{Cell, GameState, GameStatus, Player, SIZE};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Everything the view needs for one frame.
pub struct View<'a> {
    pub state: &'a GameState,
    pub cursor: usize,
    pub status: &'a str,
    pub message: Option<&'a str>,
    pub difficulty: Difficulty,
    pub thinking: bool,
}

pub fn render(frame: &mut Frame, view: &View) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(9),    // Board
            Constraint::Length(3), // Message
            Constraint::Length(4), // Controls
        ])
        .split(frame.area());

    render_header(frame, view, chunks[0]);
    render_board(frame, view.state, view.cursor, chunks[1]);
    render_message(frame, view.message, chunks[2]);
    render_controls(frame, chunks[3]);
}

fn player_color(player: Player) -> Color {
    match player {
        Player::X => Color::Cyan,
        Player::O => Color::Magenta,
    }
}

fn render_header(frame: &mut Frame, view: &View, area: Rect) {
    let color = match view.state.status() {
        GameStatus::InProgress => player_color(view.state.current_player()),
        GameStatus::Won(player) => player_color(player),
        GameStatus::Draw => Color::Yellow,
    };

    let status = if view.thinking {
        "O is thinking...".to_string()
    } else {
        view.status.to_string()
    };

    let header = Paragraph::new(format!("{status}  |  {}", view.difficulty.name()))
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Tic-Tac-Toe"));

    frame.render_widget(header, area);
}

fn render_board(frame: &mut Frame, state: &GameState, cursor: usize, area: Rect) {
    let mut lines = Vec::new();
    let cells = state.board().cells();

    lines.push(Line::from("╔═══╦═══╦═══╗"));
    for (row, chunk) in cells.chunks(SIZE).enumerate() {
        if row > 0 {
            lines.push(Line::from("╠═══╬═══╬═══╣"));
        }

        let mut spans = vec![Span::raw("║")];
        for (col, &cell) in chunk.iter().enumerate() {
            let index = row * SIZE + col;
            let (symbol, mut style) = match cell {
                Cell::Empty => (format!(" {} ", index + 1), Style::default().fg(Color::DarkGray)),
                Cell::X => (" X ".to_string(), Style::default().fg(player_color(Player::X))),
                Cell::O => (" O ".to_string(), Style::default().fg(player_color(Player::O))),
            };
            if index == cursor && !state.is_terminal() {
                style = style.add_modifier(Modifier::REVERSED | Modifier::BOLD);
            }
            spans.push(Span::styled(symbol, style));
            spans.push(Span::raw("║"));
        }
        lines.push(Line::from(spans));
    }
    lines.push(Line::from("╚═══╩═══╩═══╝"));

    let board_widget = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(board_widget, area);
}

fn render_message(frame: &mut Frame, message: Option<&str>, area: Rect) {
    let msg_widget = Paragraph::new(message.unwrap_or(""))
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(msg_widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let line1 = Line::from("Arrows: Move  |  Enter or 1-9: Place X");
    let line2 = Line::from("D: Difficulty  |  R: Restart  |  Q: Quit");

    let controls = Paragraph::new(vec![line1, line2])
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Controls"));

    frame.render_widget(controls, area);
}
