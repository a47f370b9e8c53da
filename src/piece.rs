//! Active falling piece logic

use crate::board::{Board, BOARD_WIDTH};
use crate::kicks::kick_shifts;
use crate::tetromino::{Kind, Matrix, RotationDirection};

/// A falling piece with its own copy of the shape matrix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    pub kind: Kind,
    /// Current (possibly rotated) shape
    pub matrix: Matrix,
    /// Board column of the matrix origin (top-left corner)
    pub col: i32,
    /// Board row of the matrix origin, row 0 is the top
    pub row: i32,
}

impl Piece {
    /// Create a fresh piece of `kind` at the spawn position:
    /// horizontally centered, top row 0
    pub fn spawn(kind: Kind) -> Self {
        let matrix = kind.shape();
        let width = matrix.size() as i32;
        Self {
            kind,
            matrix,
            col: (BOARD_WIDTH as i32) / 2 - (width + 1) / 2,
            row: 0,
        }
    }

    /// Absolute (row, col) board positions of the occupied cells
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.matrix
            .occupied()
            .map(|(dr, dc)| (self.row + dr, self.col + dc))
    }

    /// Try to translate by (d_row, d_col), returns true if successful
    pub fn try_move(&mut self, d_row: i32, d_col: i32, board: &Board) -> bool {
        self.row += d_row;
        self.col += d_col;
        if board.collides(self) {
            self.row -= d_row;
            self.col -= d_col;
            false
        } else {
            true
        }
    }

    /// Try to rotate, kicking sideways if needed.
    /// On failure matrix and column are restored and false is returned.
    pub fn rotate(&mut self, direction: RotationDirection, board: &Board) -> bool {
        let original_col = self.col;
        self.matrix.rotate(direction);

        if !board.collides(self) {
            return true;
        }

        for shift in kick_shifts(self.matrix.size()) {
            self.col = original_col + shift;
            if !board.collides(self) {
                tracing::trace!(kind = ?self.kind, shift, "rotation kicked");
                return true;
            }
        }

        self.matrix.rotate(direction.reverse());
        self.col = original_col;
        false
    }

    /// Drop straight down as far as possible and return the distance dropped
    pub fn hard_drop(&mut self, board: &Board) -> i32 {
        let mut distance = 0;
        while self.try_move(1, 0, board) {
            distance += 1;
        }
        distance
    }

    /// Row where the piece would come to rest (for the ghost projection)
    pub fn ghost_row(&self, board: &Board) -> i32 {
        let mut ghost = self.clone();
        ghost.hard_drop(board);
        ghost.row
    }

    /// Check if this is the spin-eligible kind
    pub fn is_t_piece(&self) -> bool {
        matches!(self.kind, Kind::T)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Cell, BOARD_HEIGHT};

    #[test]
    fn test_spawn_position() {
        // floor(10 / 2) - ceil(width / 2)
        assert_eq!(Piece::spawn(Kind::I).col, 3);
        assert_eq!(Piece::spawn(Kind::T).col, 3);
        assert_eq!(Piece::spawn(Kind::O).col, 4);
        for kind in Kind::all() {
            assert_eq!(Piece::spawn(kind).row, 0);
        }
    }

    #[test]
    fn test_spawned_matrix_is_a_private_copy() {
        let mut a = Piece::spawn(Kind::L);
        let b = Piece::spawn(Kind::L);
        a.matrix.rotate(RotationDirection::Clockwise);
        assert_ne!(a.matrix, b.matrix);
        assert_eq!(b.matrix, Kind::L.shape());
    }

    #[test]
    fn test_move_reverts_at_wall() {
        let board = Board::new();
        let mut piece = Piece::spawn(Kind::O);
        piece.col = 0;
        assert!(!piece.try_move(0, -1, &board));
        assert_eq!(piece.col, 0);
        assert!(piece.try_move(0, 1, &board));
        assert_eq!(piece.col, 1);
    }

    #[test]
    fn test_four_rotations_round_trip_on_empty_board() {
        let board = Board::new();
        for kind in Kind::all() {
            let mut piece = Piece::spawn(kind);
            piece.row = 5;
            let start = piece.clone();
            for _ in 0..4 {
                assert!(piece.rotate(RotationDirection::Clockwise, &board));
            }
            assert_eq!(piece, start);
        }
    }

    #[test]
    fn test_rotation_kicks_off_left_wall() {
        let board = Board::new();
        let mut piece = Piece::spawn(Kind::I);
        piece.row = 5;
        piece.matrix.rotate(RotationDirection::Clockwise);
        // Vertical bar lives in matrix column 2; push it flush to the wall
        piece.col = -2;
        assert!(!board.collides(&piece));

        assert!(piece.rotate(RotationDirection::CounterClockwise, &board));
        assert_eq!(piece.matrix, Kind::I.shape());
        assert_eq!(piece.col, 0);
    }

    #[test]
    fn test_rotation_abandoned_when_every_kick_fails() {
        let mut board = Board::new();
        // A one-wide well in column 0
        for row in 0..BOARD_HEIGHT as i32 {
            for col in 1..BOARD_WIDTH as i32 {
                board.set(row, col, Cell::Filled(Kind::O));
            }
        }
        let mut piece = Piece::spawn(Kind::I);
        piece.matrix.rotate(RotationDirection::Clockwise);
        piece.col = -2;
        piece.row = 10;
        let before = piece.clone();

        assert!(!piece.rotate(RotationDirection::Clockwise, &board));
        assert_eq!(piece, before);
    }

    #[test]
    fn test_hard_drop_reaches_floor() {
        let board = Board::new();
        let mut piece = Piece::spawn(Kind::I);
        let distance = piece.hard_drop(&board);
        // The bar sits in matrix row 1, so it rests with its origin on row 18
        assert_eq!(distance, 18);
        assert!(piece.cells().all(|(row, _)| row == BOARD_HEIGHT as i32 - 1));
    }

    #[test]
    fn test_ghost_row_matches_hard_drop() {
        let mut board = Board::new();
        board.set(15, 4, Cell::Filled(Kind::J));
        let piece = Piece::spawn(Kind::T);
        let mut dropped = piece.clone();
        dropped.hard_drop(&board);
        assert_eq!(piece.ghost_row(&board), dropped.row);
        assert_eq!(piece.row, 0);
    }
}
