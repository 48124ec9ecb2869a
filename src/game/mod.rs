//! Core Connect Four game logic: board representation, player identity, win
//! and draw detection, and the validated game state machine.

mod board;
mod player;
mod state;
pub mod terminal;

pub use board::{
    Board, Cell, Move, Window, CELLS, CENTER_COLUMN, COLS, COLUMN_ORDER, ROWS, WINDOWS,
    WINDOW_COUNT,
};
pub use player::Player;
pub use state::GameState;
pub use terminal::{is_draw, is_win, GameOutcome};
