//! Game board representation and collision detection

use crate::piece::Piece;
use crate::tetromino::Kind;

/// Standard board dimensions
pub const BOARD_WIDTH: usize = 10;
pub const BOARD_HEIGHT: usize = 20;

/// A cell on the board - either empty or filled by a locked kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Filled(Kind),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn is_filled(&self) -> bool {
        matches!(self, Cell::Filled(_))
    }

    /// Kind-id stored in this cell (0 = empty)
    pub fn id(&self) -> u8 {
        match self {
            Cell::Empty => 0,
            Cell::Filled(kind) => kind.id(),
        }
    }
}

/// The game board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// Grid stored as [row][col], row 0 is the top, row increases downward
    cells: [[Cell; BOARD_WIDTH]; BOARD_HEIGHT],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [[Cell::Empty; BOARD_WIDTH]; BOARD_HEIGHT],
        }
    }

    /// Get the cell at a position (row, col)
    /// Returns None if out of bounds
    pub fn get(&self, row: i32, col: i32) -> Option<Cell> {
        if row < 0 || col < 0 {
            return None;
        }
        let (row, col) = (row as usize, col as usize);
        if row >= BOARD_HEIGHT || col >= BOARD_WIDTH {
            return None;
        }
        Some(self.cells[row][col])
    }

    /// Set a cell at a position
    /// Returns false if out of bounds
    pub fn set(&mut self, row: i32, col: i32, cell: Cell) -> bool {
        if row < 0 || col < 0 {
            return false;
        }
        let (row, col) = (row as usize, col as usize);
        if row >= BOARD_HEIGHT || col >= BOARD_WIDTH {
            return false;
        }
        self.cells[row][col] = cell;
        true
    }

    /// Whether a cell at (row, col) would stop a piece.
    ///
    /// The side walls and the floor block; rows above the board never do.
    pub fn is_blocked(&self, row: i32, col: i32) -> bool {
        if col < 0 || col >= BOARD_WIDTH as i32 || row >= BOARD_HEIGHT as i32 {
            return true;
        }
        if row < 0 {
            return false;
        }
        self.cells[row as usize][col as usize].is_filled()
    }

    /// Check whether any occupied cell of the piece is blocked
    pub fn collides(&self, piece: &Piece) -> bool {
        piece.cells().any(|(row, col)| self.is_blocked(row, col))
    }

    /// Write the piece's cells into the board.
    /// Only call this once the piece is at its resting position.
    pub fn merge(&mut self, piece: &Piece) {
        let cell = Cell::Filled(piece.kind);
        for (row, col) in piece.cells() {
            // Cells above the board are lost
            self.set(row, col, cell);
        }
    }

    /// Remove full rows and return how many were cleared.
    ///
    /// Rows are scanned from the bottom up to row 1; the top row is never a
    /// candidate. After a removal the same index is checked again because the
    /// rows above have moved down into it.
    pub fn sweep(&mut self) -> usize {
        let mut cleared = 0;
        let mut row = BOARD_HEIGHT - 1;

        while row > 0 {
            if self.is_line_full(row) {
                self.cells.copy_within(0..row, 1);
                self.cells[0] = [Cell::Empty; BOARD_WIDTH];
                cleared += 1;
            } else {
                row -= 1;
            }
        }

        cleared
    }

    /// Check if a line is completely filled
    fn is_line_full(&self, row: usize) -> bool {
        self.cells[row].iter().all(|cell| cell.is_filled())
    }

    /// Check if the board is completely empty
    pub fn is_empty(&self) -> bool {
        self.filled_count() == 0
    }

    /// Number of non-empty cells
    pub fn filled_count(&self) -> usize {
        self.cells
            .iter()
            .map(|row| row.iter().filter(|cell| cell.is_filled()).count())
            .sum()
    }

    /// Iterate rows from top to bottom
    pub fn rows(&self) -> impl Iterator<Item = (usize, &[Cell; BOARD_WIDTH])> {
        self.cells.iter().enumerate()
    }
}
