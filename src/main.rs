use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tic_tac_toe::ai::Difficulty;
use tic_tac_toe::config::{AppConfig, LogConfig};
use tic_tac_toe::ui::App;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Play Tic-Tac-Toe against a minimax bot in the terminal.
#[derive(Parser)]
#[command(name = "tic_tac_toe", about = "Play Tic-Tac-Toe against a minimax bot")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "tic_tac_toe.toml")]
    config: PathBuf,

    /// Override the starting difficulty
    #[arg(long, value_enum)]
    difficulty: Option<Difficulty>,

    /// Override the RNG seed for reproducible bot moves
    #[arg(long)]
    seed: Option<u64>,

    /// Print the default configuration as TOML and exit
    #[arg(long)]
    print_config: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.print_config {
        print!("{}", AppConfig::default_toml()?);
        return Ok(());
    }

    // Load configuration
    let mut app_config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    // Apply CLI overrides
    if let Some(difficulty) = cli.difficulty {
        app_config.bot.difficulty = difficulty;
    }
    if cli.seed.is_some() {
        app_config.bot.seed = cli.seed;
    }

    init_logging(&app_config.log)?;
    info!(
        difficulty = app_config.bot.difficulty.name(),
        seed = ?app_config.bot.seed,
        "starting game"
    );

    run(&app_config).context("running terminal UI")
}

/// Send `tracing` output to the configured log file. `RUST_LOG` overrides the
/// configured filter.
fn init_logging(config: &LogConfig) -> Result<()> {
    let file = File::create(&config.file)
        .with_context(|| format!("creating log file {}", config.file.display()))?;
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.filter))
        .with_context(|| format!("parsing log filter '{}'", config.filter))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn run(config: &AppConfig) -> io::Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app and run
    let mut app = App::new(&config.bot);
    let res = app.run(&mut terminal);

    // Restore terminal, even on error
    let _ = disable_raw_mode();
    let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen);
    let _ = terminal.show_cursor();

    res
}
