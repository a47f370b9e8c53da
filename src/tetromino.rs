//! Piece kinds with their canonical shapes and colors
//!
//! Shapes are square matrices of kind-ids. Every piece carries its own copy
//! of the matrix, so rotating one piece never touches the table below.

use ratatui::style::Color;

/// Side length of the largest shape (the I piece)
pub const MAX_SIZE: usize = 4;

/// The 7 piece kinds, numbered the way they are stored in the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    I = 1, // Cyan - long bar
    J,     // Blue
    L,     // Orange
    O,     // Yellow - square
    S,     // Green
    T,     // Purple - the only kind eligible for the spin bonus
    Z,     // Red
}

impl Kind {
    /// All kinds in kind-id order
    pub fn all() -> [Kind; 7] {
        [Kind::I, Kind::J, Kind::L, Kind::O, Kind::S, Kind::T, Kind::Z]
    }

    /// Numeric kind-id (1..=7)
    pub fn id(self) -> u8 {
        self as u8
    }

    pub fn from_id(id: u8) -> Option<Kind> {
        match id {
            1..=7 => Some(Kind::all()[id as usize - 1]),
            _ => None,
        }
    }

    /// Get the color for this kind
    pub fn color(self) -> Color {
        match self {
            Kind::I => Color::Rgb(0x00, 0xf0, 0xf0),
            Kind::J => Color::Rgb(0x00, 0x00, 0xf0),
            Kind::L => Color::Rgb(0xf0, 0xa0, 0x00),
            Kind::O => Color::Rgb(0xf0, 0xf0, 0x00),
            Kind::S => Color::Rgb(0x00, 0xf0, 0x00),
            Kind::T => Color::Rgb(0xa0, 0x00, 0xf0),
            Kind::Z => Color::Rgb(0xf0, 0x00, 0x00),
        }
    }

    /// A fresh copy of the canonical shape for this kind
    pub fn shape(self) -> Matrix {
        SHAPES[self as usize - 1]
    }
}

/// Direction for rotation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationDirection {
    Clockwise,
    CounterClockwise,
}

impl RotationDirection {
    pub fn reverse(self) -> RotationDirection {
        match self {
            RotationDirection::Clockwise => RotationDirection::CounterClockwise,
            RotationDirection::CounterClockwise => RotationDirection::Clockwise,
        }
    }
}

/// A square shape matrix of kind-ids (0 = empty).
/// Only the top-left `size`×`size` block is meaningful.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Matrix {
    size: usize,
    cells: [[u8; MAX_SIZE]; MAX_SIZE],
}

impl Matrix {
    /// Side length of the matrix; also its width for kick bounds and centering
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, row: usize, col: usize) -> u8 {
        if row < self.size && col < self.size {
            self.cells[row][col]
        } else {
            0
        }
    }

    /// Occupied cells as (row, col) offsets from the matrix origin
    pub fn occupied(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        (0..self.size).flat_map(move |row| {
            (0..self.size)
                .filter(move |&col| self.cells[row][col] != 0)
                .map(move |col| (row as i32, col as i32))
        })
    }

    /// Return this matrix turned 90°
    pub fn rotated(&self, direction: RotationDirection) -> Matrix {
        let n = self.size;
        let mut out = Matrix {
            size: n,
            cells: [[0; MAX_SIZE]; MAX_SIZE],
        };
        // Transpose, then mirror columns (clockwise) or rows (counter-clockwise)
        for row in 0..n {
            for col in 0..n {
                out.cells[row][col] = match direction {
                    RotationDirection::Clockwise => self.cells[n - 1 - col][row],
                    RotationDirection::CounterClockwise => self.cells[col][n - 1 - row],
                };
            }
        }
        out
    }

    /// Turn this matrix 90° in place
    pub fn rotate(&mut self, direction: RotationDirection) {
        *self = self.rotated(direction);
    }
}

const SHAPES: [Matrix; 7] = [
    // I
    Matrix {
        size: 4,
        cells: [[0, 0, 0, 0], [1, 1, 1, 1], [0, 0, 0, 0], [0, 0, 0, 0]],
    },
    // J
    Matrix {
        size: 3,
        cells: [[2, 0, 0, 0], [2, 2, 2, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
    },
    // L
    Matrix {
        size: 3,
        cells: [[0, 0, 3, 0], [3, 3, 3, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
    },
    // O
    Matrix {
        size: 2,
        cells: [[4, 4, 0, 0], [4, 4, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
    },
    // S
    Matrix {
        size: 3,
        cells: [[0, 5, 5, 0], [5, 5, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
    },
    // T
    Matrix {
        size: 3,
        cells: [[0, 6, 0, 0], [6, 6, 6, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
    },
    // Z
    Matrix {
        size: 3,
        cells: [[7, 7, 0, 0], [0, 7, 7, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_round_trip() {
        for kind in Kind::all() {
            assert_eq!(Kind::from_id(kind.id()), Some(kind));
        }
        assert_eq!(Kind::from_id(0), None);
        assert_eq!(Kind::from_id(8), None);
    }

    #[test]
    fn test_every_shape_has_four_cells_of_its_own_id() {
        for kind in Kind::all() {
            let shape = kind.shape();
            assert_eq!(shape.occupied().count(), 4);
            for (row, col) in shape.occupied() {
                assert_eq!(shape.get(row as usize, col as usize), kind.id());
            }
        }
    }

    #[test]
    fn test_rotate_t_clockwise() {
        let rotated = Kind::T.shape().rotated(RotationDirection::Clockwise);
        let cells: Vec<_> = rotated.occupied().collect();
        // .T.
        // .TT
        // .T.
        assert_eq!(cells, vec![(0, 1), (1, 1), (1, 2), (2, 1)]);
    }

    #[test]
    fn test_rotate_t_counter_clockwise() {
        let rotated = Kind::T.shape().rotated(RotationDirection::CounterClockwise);
        let cells: Vec<_> = rotated.occupied().collect();
        // .T.
        // TT.
        // .T.
        assert_eq!(cells, vec![(0, 1), (1, 0), (1, 1), (2, 1)]);
    }

    #[test]
    fn test_four_rotations_return_to_start() {
        for kind in Kind::all() {
            for direction in [RotationDirection::Clockwise, RotationDirection::CounterClockwise] {
                let mut shape = kind.shape();
                for _ in 0..4 {
                    shape.rotate(direction);
                }
                assert_eq!(shape, kind.shape());
            }
        }
    }

    #[test]
    fn test_o_rotation_is_identity() {
        let shape = Kind::O.shape();
        assert_eq!(shape.rotated(RotationDirection::Clockwise), shape);
    }

    #[test]
    fn test_rotating_a_copy_leaves_canonical_shape_alone() {
        let mut copy = Kind::S.shape();
        copy.rotate(RotationDirection::Clockwise);
        assert_ne!(copy, Kind::S.shape());
        assert_eq!(Kind::S.shape().occupied().next(), Some((0, 1)));
    }
}
