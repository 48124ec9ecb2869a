use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::info;

use minimax_connect_four::cli::ConfigArgs;
use minimax_connect_four::config::AppConfig;
use minimax_connect_four::logging::initialize_logging;
use minimax_connect_four::session::{seats_from_config, simulate, SampleRecorder};

/// Play a batch of automated games and print win statistics.
#[derive(Parser)]
#[command(name = "simulate", about = "Run a headless Connect Four simulation")]
struct Cli {
    #[command(flatten)]
    args: ConfigArgs,

    /// How many games to play
    #[arg(short = 'n', long)]
    games: Option<usize>,

    /// Record search moves as training samples into this directory
    #[arg(long)]
    samples_dir: Option<PathBuf>,

    /// Print the report as JSON instead of text
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    initialize_logging(cli.args.log_level);

    let mut config = AppConfig::load_or_default(&cli.args.config)
        .with_context(|| format!("loading config from {}", cli.args.config.display()))?;
    cli.args.apply(&mut config);
    if let Some(games) = cli.games {
        config.simulation.games = games;
    }
    if let Some(dir) = cli.samples_dir {
        config.simulation.samples_dir = Some(dir);
    }
    config.validate().context("invalid configuration")?;

    let mut seats = seats_from_config(&config).context("setting up players")?;
    if seats.iter().any(|seat| seat.strategy.is_human()) {
        bail!("simulations need two automated players; pass --player-one/--player-two");
    }

    let recorder = match &config.simulation.samples_dir {
        Some(dir) => {
            let depth = seats
                .iter()
                .filter_map(|seat| seat.strategy.search_depth())
                .max();
            match depth {
                Some(depth) => Some(
                    SampleRecorder::new(dir, depth)
                        .with_context(|| format!("creating {}", dir.display()))?,
                ),
                None => {
                    info!("no search player, so no samples are recorded");
                    None
                }
            }
        }
        None => None,
    };

    let report = simulate(&mut seats, config.simulation.games, recorder.as_ref())
        .context("simulation failed")?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{report}");
    }
    Ok(())
}
