use std::fmt;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};

use tracing::warn;

use crate::ai::model::PolicyModel;
use crate::ai::random::RandomMover;
use crate::ai::search::{search, SearchConfig, DEEP_SEARCH_DEPTH};
use crate::config::{AppConfig, SeatConfig};
use crate::error::{ConfigError, MoveError, StrategyError};
use crate::game::{Board, Move, Player, COLS};

/// Strategy selector as written in config files and on the command line.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum StrategyKind {
    Random,
    Minimax,
    MinimaxAlphaBeta,
    Human,
    NeuralNetwork,
}

impl StrategyKind {
    pub fn label(self) -> &'static str {
        match self {
            StrategyKind::Random => "Random",
            StrategyKind::Minimax => "Minimax",
            StrategyKind::MinimaxAlphaBeta => "Minimax (alpha-beta)",
            StrategyKind::Human => "Human",
            StrategyKind::NeuralNetwork => "Neural network",
        }
    }

    /// Strategies driven by the game-tree search; only these use a depth.
    pub fn is_search(self) -> bool {
        matches!(self, StrategyKind::Minimax | StrategyKind::MinimaxAlphaBeta)
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How a seat decides its moves.
#[derive(Debug)]
pub enum Strategy {
    Random(RandomMover),
    Minimax {
        depth: usize,
        evaluate_deep_cutoffs: bool,
    },
    MinimaxAlphaBeta {
        depth: usize,
        evaluate_deep_cutoffs: bool,
    },
    LearnedModel(Box<PolicyModel>),
    /// Columns arrive from the front end through this channel.
    HumanInput(Receiver<usize>),
}

impl Strategy {
    /// Search strategy at `depth`, with or without pruning.
    pub fn search(
        depth: usize,
        alpha_beta: bool,
        evaluate_deep_cutoffs: bool,
    ) -> Result<Self, ConfigError> {
        if depth == 0 {
            return Err(ConfigError::Validation(
                "search depth must be >= 1".into(),
            ));
        }
        if depth > DEEP_SEARCH_DEPTH {
            warn!(depth, "search depth above {DEEP_SEARCH_DEPTH} may take minutes per move");
        }
        Ok(if alpha_beta {
            Strategy::MinimaxAlphaBeta {
                depth,
                evaluate_deep_cutoffs,
            }
        } else {
            Strategy::Minimax {
                depth,
                evaluate_deep_cutoffs,
            }
        })
    }

    /// Human seat plus the sender the front end feeds columns into.
    pub fn human() -> (Self, Sender<usize>) {
        let (tx, rx) = mpsc::channel();
        (Strategy::HumanInput(rx), tx)
    }

    /// Build the strategy for one configured seat. `seed` makes random seats
    /// reproducible. The sender is present only for human seats.
    pub fn from_seat(
        seat: &SeatConfig,
        config: &AppConfig,
        seed: Option<u64>,
    ) -> Result<(Self, Option<Sender<usize>>), ConfigError> {
        let evaluate_deep_cutoffs = config.search.evaluate_deep_cutoffs;
        let strategy = match seat.strategy {
            StrategyKind::Random => Strategy::Random(match seed {
                Some(seed) => RandomMover::seeded(seed),
                None => RandomMover::new(),
            }),
            StrategyKind::Minimax => Strategy::search(seat.depth, false, evaluate_deep_cutoffs)?,
            StrategyKind::MinimaxAlphaBeta => {
                Strategy::search(seat.depth, true, evaluate_deep_cutoffs)?
            }
            StrategyKind::NeuralNetwork => {
                let path = config.model.weights_path.as_deref().ok_or_else(|| {
                    ConfigError::Validation(
                        "neural-network seats require model.weights_path".into(),
                    )
                })?;
                Strategy::LearnedModel(Box::new(PolicyModel::load(path)?))
            }
            StrategyKind::Human => {
                let (strategy, tx) = Strategy::human();
                return Ok((strategy, Some(tx)));
            }
        };
        Ok((strategy, None))
    }

    /// Propose a move for `player` on `board`. The caller validates and applies it.
    pub fn choose_move(&mut self, board: &Board, player: Player) -> Result<Move, StrategyError> {
        let column = match self {
            Strategy::Random(mover) => mover.choose_column(board),
            Strategy::Minimax {
                depth,
                evaluate_deep_cutoffs,
            } => run_search(board, player, *depth, false, *evaluate_deep_cutoffs),
            Strategy::MinimaxAlphaBeta {
                depth,
                evaluate_deep_cutoffs,
            } => run_search(board, player, *depth, true, *evaluate_deep_cutoffs),
            Strategy::LearnedModel(model) => model.preferred_column(board)?,
            Strategy::HumanInput(rx) => match rx.try_recv() {
                Ok(column) => Some(column),
                Err(TryRecvError::Empty) => return Err(StrategyError::AwaitingInput),
                Err(TryRecvError::Disconnected) => return Err(StrategyError::InputClosed),
            },
        };

        let column = column.ok_or(StrategyError::NoMoveAvailable)?;
        Ok(resolve(board, column)?)
    }

    pub fn kind(&self) -> StrategyKind {
        match self {
            Strategy::Random(_) => StrategyKind::Random,
            Strategy::Minimax { .. } => StrategyKind::Minimax,
            Strategy::MinimaxAlphaBeta { .. } => StrategyKind::MinimaxAlphaBeta,
            Strategy::LearnedModel(_) => StrategyKind::NeuralNetwork,
            Strategy::HumanInput(_) => StrategyKind::Human,
        }
    }

    pub fn search_depth(&self) -> Option<usize> {
        match self {
            Strategy::Minimax { depth, .. } | Strategy::MinimaxAlphaBeta { depth, .. } => {
                Some(*depth)
            }
            _ => None,
        }
    }

    pub fn is_search(&self) -> bool {
        self.kind().is_search()
    }

    pub fn is_human(&self) -> bool {
        matches!(self, Strategy::HumanInput(_))
    }

    /// Display name, including the depth for search strategies.
    pub fn name(&self) -> String {
        match self.search_depth() {
            Some(depth) => format!("{} (depth {depth})", self.kind().label()),
            None => self.kind().label().to_string(),
        }
    }
}

fn run_search(
    board: &Board,
    player: Player,
    depth: usize,
    alpha_beta: bool,
    evaluate_deep_cutoffs: bool,
) -> Option<usize> {
    let config = SearchConfig {
        depth,
        alpha_beta,
        evaluate_deep_cutoffs,
    };
    search(board, player, config).map(|outcome| outcome.column)
}

/// Resolve a column to its landing cell without placing anything.
fn resolve(board: &Board, column: usize) -> Result<Move, MoveError> {
    if column >= COLS {
        return Err(MoveError::InvalidColumn(column));
    }
    let row = board
        .lowest_empty_row(column)
        .ok_or(MoveError::ColumnFull(column))?;
    Ok(Move { row, column })
}
