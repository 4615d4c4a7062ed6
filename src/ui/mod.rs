//! Terminal UI: a 3x3 board driven from the keyboard, with the bot reply
//! scheduled after a short thinking pause.

mod app;
mod game_view;

pub use app::{App, StatusLine};
