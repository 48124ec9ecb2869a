use std::time::{Duration, Instant};

use tracing::{info, warn};

use crate::ai::Strategy;
use crate::config::AppConfig;
use crate::error::{ConfigError, MatchError, StrategyError};
use crate::game::{GameOutcome, GameState, Move, Player};

use super::report::SimulationReport;
use super::samples::{GameSamples, SampleRecorder};

/// Consecutive illegal proposals tolerated from one strategy before the game is aborted.
pub const MAX_MOVE_ATTEMPTS: usize = 3;

/// A player and the strategy that moves for it.
#[derive(Debug)]
pub struct Seat {
    pub player: Player,
    pub strategy: Strategy,
}

impl Seat {
    pub fn new(player: Player, strategy: Strategy) -> Self {
        Seat { player, strategy }
    }
}

/// Build both seats from configuration: player one plays Red, player two Yellow.
///
/// Headless callers drop the human input senders, so human seats here are
/// only useful for validation errors downstream.
pub fn seats_from_config(config: &AppConfig) -> Result<[Seat; 2], ConfigError> {
    let seed = config.simulation.seed;
    let (red, _) = Strategy::from_seat(&config.player_one, config, seed)?;
    let (yellow, _) =
        Strategy::from_seat(&config.player_two, config, seed.map(|s| s.wrapping_add(1)))?;
    Ok([Seat::new(Player::Red, red), Seat::new(Player::Yellow, yellow)])
}

/// A finished game.
#[derive(Debug, Clone, PartialEq)]
pub struct GameRecord {
    pub first: Player,
    pub outcome: GameOutcome,
    pub moves: Vec<Move>,
    /// Moves made by each player, indexed by [`Player::index`].
    pub moves_by: [usize; 2],
    pub duration: Duration,
}

impl GameRecord {
    pub fn winner(&self) -> Option<Player> {
        match self.outcome {
            GameOutcome::Winner(player) => Some(player),
            GameOutcome::Draw => None,
        }
    }
}

fn check_seats(seats: &[Seat; 2]) -> Result<(), MatchError> {
    if seats[0].player == seats[1].player {
        return Err(MatchError::DuplicateSeat(seats[0].player));
    }
    if seats.iter().any(|seat| seat.strategy.is_human()) {
        return Err(MatchError::HumanSeat);
    }
    Ok(())
}

/// Ask `strategy` for the current player's move and apply it to `state`.
///
/// Illegal proposals are asked again, up to [`MAX_MOVE_ATTEMPTS`] in a row.
fn next_move(strategy: &mut Strategy, state: &mut GameState) -> Result<Move, MatchError> {
    let player = state.current_player();
    let board = *state.board();

    let mut attempts = 0;
    loop {
        attempts += 1;
        let applied = match strategy.choose_move(&board, player) {
            Ok(proposed) => state.apply_move(proposed.column),
            Err(StrategyError::Illegal(source)) => Err(source),
            Err(source) => return Err(MatchError::Strategy { player, source }),
        };
        match applied {
            Ok(mv) => return Ok(mv),
            Err(source) if attempts >= MAX_MOVE_ATTEMPTS => {
                return Err(MatchError::IllegalMove {
                    player,
                    attempts,
                    source,
                });
            }
            Err(source) => {
                warn!(%player, %source, attempts, "illegal move, asking again");
            }
        }
    }
}

/// Play one game to completion without a front end.
///
/// Moves proposed by search strategies are written to `samples` together with
/// the board they were chosen on.
pub fn play_game(
    seats: &mut [Seat; 2],
    first: Player,
    mut samples: Option<&mut GameSamples>,
) -> Result<GameRecord, MatchError> {
    check_seats(seats)?;

    let started = Instant::now();
    let mut state = GameState::initial(first);
    let mut moves = Vec::new();
    let mut moves_by = [0; 2];

    let outcome = loop {
        if let Some(outcome) = state.outcome() {
            break outcome;
        }

        let player = state.current_player();
        let seat = if seats[0].player == player {
            &mut seats[0]
        } else {
            &mut seats[1]
        };
        let before = *state.board();

        let mv = next_move(&mut seat.strategy, &mut state)?;

        if seat.strategy.is_search() {
            if let Some(samples) = samples.as_deref_mut() {
                samples.record(&before, mv.column)?;
            }
        }
        moves.push(mv);
        moves_by[player.index()] += 1;
    };

    let record = GameRecord {
        first,
        outcome,
        moves,
        moves_by,
        duration: started.elapsed(),
    };
    info!(
        first = %first,
        winner = record.winner().map_or("draw", Player::name),
        moves = record.moves.len(),
        "game finished"
    );
    Ok(record)
}

/// Play `games` games, alternating the starting player, and aggregate the results.
pub fn simulate(
    seats: &mut [Seat; 2],
    games: usize,
    recorder: Option<&SampleRecorder>,
) -> Result<SimulationReport, MatchError> {
    check_seats(seats)?;

    let mut names = [String::new(), String::new()];
    for seat in seats.iter() {
        names[seat.player.index()] = seat.strategy.name();
    }
    let mut report = SimulationReport::new(names);
    let started = Instant::now();

    for game in 1..=games {
        let first = if game % 2 == 1 {
            Player::Red
        } else {
            Player::Yellow
        };

        let record = match recorder {
            Some(recorder) => {
                let mut samples = recorder.start_game(game)?;
                let record = play_game(seats, first, Some(&mut samples))?;
                samples.finish()?;
                record
            }
            None => play_game(seats, first, None)?,
        };
        report.record(&record);
    }
    report.elapsed = started.elapsed();

    info!(
        games = report.games,
        red_wins = report.wins[Player::Red.index()],
        yellow_wins = report.wins[Player::Yellow.index()],
        draws = report.draws,
        "simulation finished"
    );
    Ok(report)
}
