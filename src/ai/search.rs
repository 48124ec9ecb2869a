use tracing::debug;

use crate::game::terminal::{self, connects_four};
use crate::game::{Board, Player, CENTER_COLUMN, COLUMN_ORDER};

use super::heuristic;

pub type Score = i32;

/// Proven win for the maximizing player. No heuristic value comes close.
pub const WIN_SCORE: Score = 1_000_000;

/// Deepest selectable search depth. Searches configured at exactly this depth
/// score pure depth cutoffs as 0 unless `evaluate_deep_cutoffs` is set.
pub const DEEP_SEARCH_DEPTH: usize = 8;

/// Parameters of a single search call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    pub depth: usize,
    pub alpha_beta: bool,
    pub evaluate_deep_cutoffs: bool,
}

impl SearchConfig {
    pub fn minimax(depth: usize) -> Self {
        SearchConfig {
            depth,
            alpha_beta: false,
            evaluate_deep_cutoffs: false,
        }
    }

    pub fn alpha_beta(depth: usize) -> Self {
        SearchConfig {
            alpha_beta: true,
            ..Self::minimax(depth)
        }
    }
}

/// Column chosen by the search with its backed-up score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOutcome {
    pub column: usize,
    pub score: Score,
    /// Nodes visited, root included.
    pub nodes: u64,
}

/// Depth-limited minimax for `player` on `board`.
///
/// Returns `None` when the board is already decided (won or full).
pub fn search(board: &Board, player: Player, config: SearchConfig) -> Option<SearchOutcome> {
    if terminal::outcome(board).is_some() {
        return None;
    }

    let mut searcher = Searcher::new(*board, player, config);
    let (column, score) = searcher.minimax(
        config.depth,
        -WIN_SCORE,
        WIN_SCORE,
        true,
        None,
    );

    debug!(
        player = player.name(),
        depth = config.depth,
        alpha_beta = config.alpha_beta,
        column,
        score,
        nodes = searcher.nodes,
        "search finished"
    );

    Some(SearchOutcome {
        column,
        score,
        nodes: searcher.nodes,
    })
}

/// Search state: one scratch board mutated with place/undo.
struct Searcher {
    board: Board,
    maximizer: Player,
    config: SearchConfig,
    nodes: u64,
}

impl Searcher {
    fn new(board: Board, maximizer: Player, config: SearchConfig) -> Self {
        Searcher {
            board,
            maximizer,
            config,
            nodes: 0,
        }
    }

    /// Score of a node where the depth budget ran out.
    fn cutoff_score(&self) -> Score {
        if self.config.depth == DEEP_SEARCH_DEPTH && !self.config.evaluate_deep_cutoffs {
            0
        } else {
            heuristic::evaluate(&self.board, self.maximizer)
        }
    }

    /// `last` is the placement that produced this node. The parent was not
    /// decided, so only that disc can have completed a line.
    fn minimax(
        &mut self,
        depth: usize,
        mut alpha: Score,
        mut beta: Score,
        maximizing: bool,
        last: Option<(usize, usize)>,
    ) -> (usize, Score) {
        self.nodes += 1;

        if let Some((row, col)) = last {
            if connects_four(&self.board, row, col) {
                // The previous mover is the side not to move here.
                let score = if maximizing { -WIN_SCORE } else { WIN_SCORE };
                return (col, score);
            }
        }
        if self.board.is_full() {
            return (CENTER_COLUMN, 0);
        }
        if depth == 0 {
            return (CENTER_COLUMN, self.cutoff_score());
        }

        let mover = if maximizing {
            self.maximizer
        } else {
            self.maximizer.other()
        };

        let mut best_column = None;
        let mut best_score = if maximizing { -WIN_SCORE } else { WIN_SCORE };

        for col in COLUMN_ORDER {
            let Some(row) = self.board.lowest_empty_row(col) else {
                continue;
            };
            best_column.get_or_insert(col);

            self.board.place(row, col, mover.to_cell());
            let (_, score) = self.minimax(depth - 1, alpha, beta, !maximizing, Some((row, col)));
            self.board.clear(row, col);

            if maximizing {
                if score > best_score {
                    best_score = score;
                    best_column = Some(col);
                }
                if self.config.alpha_beta {
                    alpha = alpha.max(best_score);
                }
            } else {
                if score < best_score {
                    best_score = score;
                    best_column = Some(col);
                }
                if self.config.alpha_beta {
                    beta = beta.min(best_score);
                }
            }

            if self.config.alpha_beta && alpha >= beta {
                break;
            }
        }

        // Not full, so at least one column was expanded.
        (best_column.unwrap_or(CENTER_COLUMN), best_score)
    }
}
