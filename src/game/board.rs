use std::fmt;

use crate::error::MoveError;

use super::player::Player;

pub const ROWS: usize = 6;
pub const COLS: usize = 7;
pub const CELLS: usize = ROWS * COLS;
pub const CENTER_COLUMN: usize = 3;

/// Column ordering: center-first. Search tie-breaks depend on this exact order.
pub const COLUMN_ORDER: [usize; COLS] = [3, 2, 4, 1, 5, 0, 6];

/// A run of four colinear, contiguous cells as `(row, col)` pairs.
pub type Window = [(usize, usize); 4];

pub const WINDOW_COUNT: usize = 69;

/// Every window on the board: horizontal, vertical, then both diagonals.
pub const WINDOWS: [Window; WINDOW_COUNT] = build_windows();

const fn build_windows() -> [Window; WINDOW_COUNT] {
    let mut out = [[(0, 0); 4]; WINDOW_COUNT];
    let mut n = 0;

    // Horizontal
    let mut row = 0;
    while row < ROWS {
        let mut col = 0;
        while col + 3 < COLS {
            out[n] = [(row, col), (row, col + 1), (row, col + 2), (row, col + 3)];
            n += 1;
            col += 1;
        }
        row += 1;
    }

    // Vertical
    let mut col = 0;
    while col < COLS {
        let mut row = 0;
        while row + 3 < ROWS {
            out[n] = [(row, col), (row + 1, col), (row + 2, col), (row + 3, col)];
            n += 1;
            row += 1;
        }
        col += 1;
    }

    // Diagonal (top-left to bottom-right, \)
    let mut row = 0;
    while row + 3 < ROWS {
        let mut col = 0;
        while col + 3 < COLS {
            out[n] = [
                (row, col),
                (row + 1, col + 1),
                (row + 2, col + 2),
                (row + 3, col + 3),
            ];
            n += 1;
            col += 1;
        }
        row += 1;
    }

    // Diagonal (bottom-left to top-right, /)
    let mut row = 3;
    while row < ROWS {
        let mut col = 0;
        while col + 3 < COLS {
            out[n] = [
                (row, col),
                (row - 1, col + 1),
                (row - 2, col + 2),
                (row - 3, col + 3),
            ];
            n += 1;
            col += 1;
        }
        row += 1;
    }

    out
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    Red,
    Yellow,
}

impl Cell {
    /// Numeric code used in snapshots: 0 empty, 1 red, 2 yellow.
    pub fn value(self) -> u8 {
        match self {
            Cell::Empty => 0,
            Cell::Red => 1,
            Cell::Yellow => 2,
        }
    }
}

/// A column choice resolved to the cell it lands in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub row: usize,
    pub column: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [[Cell; COLS]; ROWS],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Board {
            cells: [[Cell::Empty; COLS]; ROWS],
        }
    }

    /// Replay a sequence of columns, alternating players starting with `first`.
    pub fn from_moves(first: Player, columns: &[usize]) -> Result<Self, MoveError> {
        let mut board = Board::new();
        let mut player = first;
        for &col in columns {
            board.drop_disc(col, player.to_cell())?;
            player = player.other();
        }
        Ok(board)
    }

    /// Get the cell at a specific position
    /// Row 0 is the top, row 5 is the bottom
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[row][col]
    }

    /// Write a cell. The caller is trusted to have checked legality.
    pub fn place(&mut self, row: usize, col: usize, cell: Cell) {
        self.cells[row][col] = cell;
    }

    /// Undo a placement made by the search on its scratch board.
    pub(crate) fn clear(&mut self, row: usize, col: usize) {
        self.cells[row][col] = Cell::Empty;
    }

    /// A column is playable iff its top cell is empty.
    pub fn is_playable(&self, col: usize) -> bool {
        col < COLS && self.cells[0][col] == Cell::Empty
    }

    /// Row a disc dropped into `col` would land in, or `None` if the column is
    /// full or out of range.
    pub fn lowest_empty_row(&self, col: usize) -> Option<usize> {
        if !self.is_playable(col) {
            return None;
        }
        match (0..ROWS).find(|&row| self.cells[row][col] != Cell::Empty) {
            Some(top) => Some(top - 1),
            None => Some(ROWS - 1),
        }
    }

    /// Playable columns in center-out priority order.
    pub fn playable_columns(&self) -> Vec<usize> {
        COLUMN_ORDER
            .iter()
            .copied()
            .filter(|&col| self.is_playable(col))
            .collect()
    }

    /// Check if the board is completely full
    pub fn is_full(&self) -> bool {
        (0..COLS).all(|col| !self.is_playable(col))
    }

    /// Validated drop: returns the row where the disc landed.
    pub fn drop_disc(&mut self, col: usize, cell: Cell) -> Result<usize, MoveError> {
        if col >= COLS {
            return Err(MoveError::InvalidColumn(col));
        }
        let row = self
            .lowest_empty_row(col)
            .ok_or(MoveError::ColumnFull(col))?;
        self.place(row, col, cell);
        Ok(row)
    }

    pub fn disc_count(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|&&cell| cell != Cell::Empty)
            .count()
    }

    /// Row-major cell codes, the flattened 6x7 layout shared by the learned
    /// model and the sample files.
    pub fn encode(&self) -> [u8; CELLS] {
        let mut data = [0u8; CELLS];
        for row in 0..ROWS {
            for col in 0..COLS {
                data[row * COLS + col] = self.cells[row][col].value();
            }
        }
        data
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..ROWS {
            for col in 0..COLS {
                let symbol = match self.cells[row][col] {
                    Cell::Empty => '.',
                    Cell::Red => 'R',
                    Cell::Yellow => 'Y',
                };
                write!(f, "{symbol}")?;
            }
            if row + 1 < ROWS {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
