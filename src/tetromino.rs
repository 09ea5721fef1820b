//! Tetromino definitions and shapes
//!
//! All 7 tetrominoes as small occupancy matrices at their spawn orientation.
//! Rotation is a plain 90° clockwise matrix transform, there is no rotation
//! state table and no wall kicks.

use crate::error::ShapeError;
use crate::piece::Position;
use serde::{Deserialize, Serialize};

/// Largest side of any shape matrix
pub const MAX_SHAPE_SIDE: usize = 4;

/// Filled cells in every tetromino
pub const CELLS_PER_PIECE: usize = 4;

/// The 7 tetromino types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TetrominoType {
    I, // Cyan - long bar
    O, // Yellow - square
    T, // Purple - T-shape
    S, // Green - S-shape
    Z, // Red - Z-shape
    J, // Blue - J-shape
    L, // Orange - L-shape
}

impl TetrominoType {
    /// Every type, in the order the random generator indexes them
    pub const ALL: [TetrominoType; 7] = [
        TetrominoType::I,
        TetrominoType::O,
        TetrominoType::T,
        TetrominoType::S,
        TetrominoType::Z,
        TetrominoType::J,
        TetrominoType::L,
    ];

    /// Display color as a `#rrggbb` string. The engine never looks at it.
    pub fn color(&self) -> &'static str {
        match self {
            TetrominoType::I => "#00f0f0",
            TetrominoType::O => "#f0f000",
            TetrominoType::T => "#a000f0",
            TetrominoType::S => "#00f000",
            TetrominoType::Z => "#f00000",
            TetrominoType::J => "#0000f0",
            TetrominoType::L => "#f0a000",
        }
    }

    /// Shape at spawn orientation
    pub fn shape(&self) -> Shape {
        match self {
            TetrominoType::I => SHAPE_I,
            TetrominoType::O => SHAPE_O,
            TetrominoType::T => SHAPE_T,
            TetrominoType::S => SHAPE_S,
            TetrominoType::Z => SHAPE_Z,
            TetrominoType::J => SHAPE_J,
            TetrominoType::L => SHAPE_L,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            TetrominoType::I => "I",
            TetrominoType::O => "O",
            TetrominoType::T => "T",
            TetrominoType::S => "S",
            TetrominoType::Z => "Z",
            TetrominoType::J => "J",
            TetrominoType::L => "L",
        }
    }
}

// I: ████
const SHAPE_I: Shape = Shape::from_const(1, 4, [[1, 1, 1, 1], [0; 4], [0; 4], [0; 4]]);
// O: ██
//    ██
const SHAPE_O: Shape = Shape::from_const(2, 2, [[1, 1, 0, 0], [1, 1, 0, 0], [0; 4], [0; 4]]);
// T: .█.
//    ███
const SHAPE_T: Shape = Shape::from_const(2, 3, [[0, 1, 0, 0], [1, 1, 1, 0], [0; 4], [0; 4]]);
// S: .██
//    ██.
const SHAPE_S: Shape = Shape::from_const(2, 3, [[0, 1, 1, 0], [1, 1, 0, 0], [0; 4], [0; 4]]);
// Z: ██.
//    .██
const SHAPE_Z: Shape = Shape::from_const(2, 3, [[1, 1, 0, 0], [0, 1, 1, 0], [0; 4], [0; 4]]);
// J: █..
//    ███
const SHAPE_J: Shape = Shape::from_const(2, 3, [[1, 0, 0, 0], [1, 1, 1, 0], [0; 4], [0; 4]]);
// L: ..█
//    ███
const SHAPE_L: Shape = Shape::from_const(2, 3, [[0, 0, 1, 0], [1, 1, 1, 0], [0; 4], [0; 4]]);

/// A rectangular 0/1 occupancy matrix of at most 4x4 cells
///
/// Cells outside `rows x cols` are always 0, so two shapes compare equal
/// exactly when their visible matrices are identical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Shape {
    rows: usize,
    cols: usize,
    cells: [[u8; MAX_SHAPE_SIDE]; MAX_SHAPE_SIDE],
}

impl Shape {
    const fn from_const(
        rows: usize,
        cols: usize,
        cells: [[u8; MAX_SHAPE_SIDE]; MAX_SHAPE_SIDE],
    ) -> Self {
        Self { rows, cols, cells }
    }

    /// Build a shape from caller-supplied rows, validating the geometry
    pub fn from_rows(rows: &[&[u8]]) -> Result<Self, ShapeError> {
        let cols = match rows.first() {
            Some(first) if !first.is_empty() => first.len(),
            _ => return Err(ShapeError::Empty),
        };
        if rows.len() > MAX_SHAPE_SIDE || cols > MAX_SHAPE_SIDE {
            return Err(ShapeError::TooLarge {
                rows: rows.len(),
                cols,
            });
        }

        let mut cells = [[0u8; MAX_SHAPE_SIDE]; MAX_SHAPE_SIDE];
        for (r, row) in rows.iter().enumerate() {
            if row.len() != cols {
                return Err(ShapeError::Ragged {
                    row: r,
                    expected: cols,
                    found: row.len(),
                });
            }
            for (c, &value) in row.iter().enumerate() {
                cells[r][c] = u8::from(value != 0);
            }
        }

        let shape = Self {
            rows: rows.len(),
            cols,
            cells,
        };
        let found = shape.filled_count();
        if found != CELLS_PER_PIECE {
            return Err(ShapeError::BadCellCount { found });
        }
        Ok(shape)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Whether the local cell (row, col) is filled
    pub fn is_filled(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols && self.cells[row][col] != 0
    }

    /// The visible matrix, row by row
    pub fn matrix(&self) -> Vec<Vec<u8>> {
        self.cells[..self.rows]
            .iter()
            .map(|row| row[..self.cols].to_vec())
            .collect()
    }

    /// Local offsets (x = column, y = row) of every filled cell
    pub fn filled_offsets(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.rows).flat_map(move |row| {
            (0..self.cols)
                .filter(move |&col| self.cells[row][col] != 0)
                .map(move |col| Position::new(col as i32, row as i32))
        })
    }

    pub fn filled_count(&self) -> usize {
        self.filled_offsets().count()
    }

    /// Rotate 90° clockwise: output row `i` is input column `i` read bottom to top
    pub fn rotate_cw(&self) -> Shape {
        let mut cells = [[0u8; MAX_SHAPE_SIDE]; MAX_SHAPE_SIDE];
        for (r, row) in cells.iter_mut().enumerate().take(self.cols) {
            for (c, cell) in row.iter_mut().enumerate().take(self.rows) {
                *cell = self.cells[self.rows - 1 - c][r];
            }
        }
        Shape {
            rows: self.cols,
            cols: self.rows,
            cells,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_shapes_have_four_cells() {
        for kind in TetrominoType::ALL {
            assert_eq!(kind.shape().filled_count(), CELLS_PER_PIECE, "{:?}", kind);
        }
    }

    #[test]
    fn test_catalog_shapes_round_trip_through_validation() {
        for kind in TetrominoType::ALL {
            let matrix = kind.shape().matrix();
            let rows: Vec<&[u8]> = matrix.iter().map(|row| row.as_slice()).collect();
            assert_eq!(Shape::from_rows(&rows), Ok(kind.shape()));
        }
    }

    #[test]
    fn test_rotate_i_becomes_vertical() {
        let vertical = TetrominoType::I.shape().rotate_cw();
        assert_eq!(vertical.rows(), 4);
        assert_eq!(vertical.cols(), 1);
        assert_eq!(vertical.matrix(), vec![vec![1], vec![1], vec![1], vec![1]]);
    }

    #[test]
    fn test_rotate_t_clockwise() {
        // .█.      █.
        // ███  ->  ██
        //          █.
        let rotated = TetrominoType::T.shape().rotate_cw();
        assert_eq!(rotated.matrix(), vec![vec![1, 0], vec![1, 1], vec![1, 0]]);
    }

    #[test]
    fn test_rotate_o_is_identity() {
        let o = TetrominoType::O.shape();
        assert_eq!(o.rotate_cw(), o);
    }

    #[test]
    fn test_four_rotations_return_to_start() {
        for kind in TetrominoType::ALL {
            let shape = kind.shape();
            let mut rotated = shape;
            for _ in 0..4 {
                rotated = rotated.rotate_cw();
                assert_eq!(rotated.filled_count(), CELLS_PER_PIECE);
            }
            assert_eq!(rotated, shape, "{:?}", kind);
        }
    }

    #[test]
    fn test_from_rows_rejects_bad_geometry() {
        assert_eq!(Shape::from_rows(&[]), Err(ShapeError::Empty));
        assert_eq!(Shape::from_rows(&[&[]]), Err(ShapeError::Empty));
        assert_eq!(
            Shape::from_rows(&[&[1, 1, 1], &[1]]),
            Err(ShapeError::Ragged {
                row: 1,
                expected: 3,
                found: 1
            })
        );
        assert_eq!(
            Shape::from_rows(&[&[1, 1, 1, 1, 0]]),
            Err(ShapeError::TooLarge { rows: 1, cols: 5 })
        );
        assert_eq!(
            Shape::from_rows(&[&[1, 1, 1]]),
            Err(ShapeError::BadCellCount { found: 3 })
        );
    }

    #[test]
    fn test_colors_are_distinct() {
        let mut colors: Vec<_> = TetrominoType::ALL.iter().map(|t| t.color()).collect();
        colors.sort();
        colors.dedup();
        assert_eq!(colors.len(), 7);
    }
}
