use std::io;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use minimax_connect_four::cli::ConfigArgs;
use minimax_connect_four::config::AppConfig;
use minimax_connect_four::logging::initialize_file_logging;
use minimax_connect_four::ui::{App, DEFAULT_MOVE_DELAY};

/// Play Connect Four in the terminal against search, random or learned opponents.
#[derive(Parser)]
#[command(name = "connect-four", about = "Play Connect Four in the terminal")]
struct Cli {
    #[command(flatten)]
    args: ConfigArgs,

    /// Milliseconds an automated seat waits before moving
    #[arg(long)]
    move_delay_ms: Option<u64>,

    /// Write logs to this file (the terminal is taken by the game)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        initialize_file_logging(cli.args.log_level, path)
            .with_context(|| format!("opening log file {}", path.display()))?;
    }

    let mut config = AppConfig::load_or_default(&cli.args.config)
        .with_context(|| format!("loading config from {}", cli.args.config.display()))?;
    cli.args.apply(&mut config);
    config.validate().context("invalid configuration")?;

    let delay = cli
        .move_delay_ms
        .map_or(DEFAULT_MOVE_DELAY, Duration::from_millis);
    let mut app = App::from_config(&config)
        .context("setting up players")?
        .with_move_delay(delay);

    run(&mut app).context("terminal error")
}

fn run(app: &mut App) -> io::Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = app.run(&mut terminal);

    // Restore terminal, even on error
    let _ = disable_raw_mode();
    let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen);
    let _ = terminal.show_cursor();

    res
}
