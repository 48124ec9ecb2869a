use crate::error::MoveError;

use super::board::{Board, Move};
use super::player::Player;
use super::terminal::{connects_four, GameOutcome};

/// The authoritative game: board, side to move and outcome once decided.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameState {
    board: Board,
    current_player: Player,
    outcome: Option<GameOutcome>,
    moves_played: usize,
}

impl GameState {
    /// Create initial game state with `first` to move
    pub fn initial(first: Player) -> Self {
        GameState {
            board: Board::new(),
            current_player: first,
            outcome: None,
            moves_played: 0,
        }
    }

    /// Get current player
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// Get reference to board
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Get game outcome if game is over
    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    /// Check if game is over
    pub fn is_terminal(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn moves_played(&self) -> usize {
        self.moves_played
    }

    /// Legal columns in center-out order; empty once the game is decided.
    pub fn legal_columns(&self) -> Vec<usize> {
        if self.is_terminal() {
            return Vec::new();
        }
        self.board.playable_columns()
    }

    /// Validate and apply a move for the current player.
    pub fn apply_move(&mut self, column: usize) -> Result<Move, MoveError> {
        if self.is_terminal() {
            return Err(MoveError::GameOver);
        }

        let row = self
            .board
            .drop_disc(column, self.current_player.to_cell())?;

        if connects_four(&self.board, row, column) {
            self.outcome = Some(GameOutcome::Winner(self.current_player));
        } else if self.board.is_full() {
            self.outcome = Some(GameOutcome::Draw);
        }

        self.current_player = self.current_player.other();
        self.moves_played += 1;

        Ok(Move { row, column })
    }
}
