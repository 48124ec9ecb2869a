use crate::game::{Board, Cell, Player, CENTER_COLUMN, ROWS, WINDOWS};

use super::Score;

/// Bonus per own disc in the center column.
pub const CENTER_WEIGHT: Score = 2;
/// Three own discs and one empty cell in a window.
pub const OWN_THREE: Score = 5;
/// Two own discs and two empty cells in a window.
pub const OWN_TWO: Score = 3;
/// Three opponent discs and one empty cell in a window.
pub const OPPONENT_THREE: Score = -4;
/// Two opponent discs and two empty cells in a window.
pub const OPPONENT_TWO: Score = -2;

/// Score a single window from its composition.
///
/// Offense is weighted slightly above blocking (5/3 against 4/2).
pub fn score_window(own: usize, opp: usize, empty: usize) -> Score {
    if own == 3 && empty == 1 {
        OWN_THREE
    } else if own == 2 && empty == 2 {
        OWN_TWO
    } else if opp == 3 && empty == 1 {
        OPPONENT_THREE
    } else if opp == 2 && empty == 2 {
        OPPONENT_TWO
    } else {
        0
    }
}

/// Static evaluation of a non-terminal board from `player`'s point of view.
pub fn evaluate(board: &Board, player: Player) -> Score {
    let own_cell = player.to_cell();
    let opp_cell = player.other().to_cell();

    let center = (0..ROWS)
        .filter(|&row| board.get(row, CENTER_COLUMN) == own_cell)
        .count() as Score;
    let mut score = center * CENTER_WEIGHT;

    for window in &WINDOWS {
        let mut own = 0;
        let mut opp = 0;
        let mut empty = 0;
        for &(row, col) in window {
            match board.get(row, col) {
                Cell::Empty => empty += 1,
                c if c == own_cell => own += 1,
                c if c == opp_cell => opp += 1,
                _ => {}
            }
        }
        score += score_window(own, opp, empty);
    }

    score
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Cell;

    fn bottom_row(cols: &[usize], cell: Cell) -> Board {
        let mut board = Board::new();
        for &col in cols {
            board.drop_disc(col, cell).unwrap();
        }
        board
    }

    #[test]
    fn test_window_table() {
        assert_eq!(score_window(3, 0, 1), 5);
        assert_eq!(score_window(2, 0, 2), 3);
        assert_eq!(score_window(0, 3, 1), -4);
        assert_eq!(score_window(0, 2, 2), -2);
        assert_eq!(score_window(4, 0, 0), 0);
        assert_eq!(score_window(1, 0, 3), 0);
        assert_eq!(score_window(2, 1, 1), 0);
        assert_eq!(score_window(1, 2, 1), 0);
        assert_eq!(score_window(0, 0, 4), 0);
    }

    #[test]
    fn heuristic_empty_board_is_zero() {
        let board = Board::new();
        assert_eq!(evaluate(&board, Player::Red), 0);
        assert_eq!(evaluate(&board, Player::Yellow), 0);
    }

    #[test]
    fn heuristic_three_in_a_row_off_center() {
        // R R R . . . . on the bottom row
        let board = bottom_row(&[0, 1, 2], Cell::Red);
        // window 0-3 holds three plus an empty: +5
        // window 1-4 holds two plus two empty: +3
        // every other window holds at most one red disc
        assert_eq!(evaluate(&board, Player::Red), OWN_THREE + OWN_TWO);
    }

    #[test]
    fn heuristic_three_in_a_row_through_center() {
        // . R R R . . . on the bottom row
        let board = bottom_row(&[1, 2, 3], Cell::Red);
        // center bonus, windows 0-3 and 1-4 (+5 each), window 2-5 (+3)
        assert_eq!(
            evaluate(&board, Player::Red),
            CENTER_WEIGHT + 2 * OWN_THREE + OWN_TWO
        );
    }

    #[test]
    fn heuristic_opponent_perspective() {
        let board = bottom_row(&[0, 1, 2], Cell::Red);
        assert_eq!(evaluate(&board, Player::Yellow), OPPONENT_THREE + OPPONENT_TWO);
    }

    #[test]
    fn heuristic_center_bonus_counts_only_own_discs() {
        let mut board = Board::new();
        board.drop_disc(3, Cell::Yellow).unwrap();
        board.drop_disc(3, Cell::Red).unwrap();
        board.drop_disc(3, Cell::Red).unwrap();
        // Column 3 reads Y R R from the bottom. Only the vertical window over
        // rows 1-4 (two red, two empty) scores.
        assert_eq!(evaluate(&board, Player::Red), 2 * CENTER_WEIGHT + OWN_TWO);
    }

    #[test]
    fn heuristic_center_preference() {
        let board_center = bottom_row(&[3], Cell::Red);
        let board_edge = bottom_row(&[0], Cell::Red);
        assert!(evaluate(&board_center, Player::Red) > evaluate(&board_edge, Player::Red));
    }
}
