//! Win and draw detection.

use super::board::{Board, Cell, COLS, ROWS, WINDOWS};
use super::player::Player;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    Winner(Player),
    Draw,
}

/// True if `player` owns four contiguous colinear cells anywhere on the board.
pub fn is_win(board: &Board, player: Player) -> bool {
    let cell = player.to_cell();
    WINDOWS
        .iter()
        .any(|window| window.iter().all(|&(row, col)| board.get(row, col) == cell))
}

/// Full board with no four-in-a-row for either side.
pub fn is_draw(board: &Board) -> bool {
    board.is_full() && !is_win(board, Player::Red) && !is_win(board, Player::Yellow)
}

/// Decided result of a board, checking wins before fullness.
pub fn outcome(board: &Board) -> Option<GameOutcome> {
    for player in Player::ALL {
        if is_win(board, player) {
            return Some(GameOutcome::Winner(player));
        }
    }
    if board.is_full() {
        Some(GameOutcome::Draw)
    } else {
        None
    }
}

/// Check if the disc at (row, col) is part of a four-in-a-row.
///
/// Only lines through that cell are scanned, so this is the cheap test after a
/// single placement.
pub fn connects_four(board: &Board, row: usize, col: usize) -> bool {
    let cell = board.get(row, col);
    if cell == Cell::Empty {
        return false;
    }

    const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];
    DIRECTIONS.iter().any(|&(dr, dc)| {
        1 + run_length(board, row, col, dr, dc, cell) + run_length(board, row, col, -dr, -dc, cell)
            >= 4
    })
}

/// Count same-colored cells walking away from (row, col), excluding the start.
fn run_length(board: &Board, row: usize, col: usize, dr: isize, dc: isize, cell: Cell) -> usize {
    let mut count = 0;
    let mut r = row as isize + dr;
    let mut c = col as isize + dc;
    while r >= 0
        && r < ROWS as isize
        && c >= 0
        && c < COLS as isize
        && board.get(r as usize, c as usize) == cell
    {
        count += 1;
        r += dr;
        c += dc;
    }
    count
}
