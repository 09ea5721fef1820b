//! Falling piece logic

use crate::board::BOARD_WIDTH;
use crate::tetromino::{Shape, TetrominoType};
use serde::{Deserialize, Serialize};

/// A board coordinate. `x` grows rightward, `y` grows downward from the top row.
///
/// Signed on purpose: candidate positions may sit partly off the board
/// while spawn and rotation checks run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Offset by (dx, dy), saturating at the `i32` range. A saturated
    /// coordinate is far off the board and fails every collision check.
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x.saturating_add(dx), self.y.saturating_add(dy))
    }
}

/// Where every new piece appears: horizontally centered, top row
pub fn spawn_position() -> Position {
    Position::new((BOARD_WIDTH / 2) as i32 - 1, 0)
}

/// A tetromino with its current geometry and top-left anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    /// The type of tetromino
    pub piece_type: TetrominoType,
    /// Current occupancy matrix
    pub shape: Shape,
    /// Top-left corner of the shape matrix on the board
    pub position: Position,
}

impl Piece {
    /// Create a new piece in spawn orientation at the spawn position
    pub fn new(piece_type: TetrominoType) -> Self {
        Self {
            piece_type,
            shape: piece_type.shape(),
            position: spawn_position(),
        }
    }

    /// Same piece anchored somewhere else
    pub fn at(self, position: Position) -> Self {
        Self { position, ..self }
    }

    /// Same piece moved by (dx, dy)
    pub fn moved(self, dx: i32, dy: i32) -> Self {
        self.at(self.position.offset(dx, dy))
    }

    /// Same piece with its shape turned 90° clockwise in place
    pub fn rotated(self) -> Self {
        Self {
            shape: self.shape.rotate_cw(),
            ..self
        }
    }

    /// Display color of this piece
    pub fn color(&self) -> &'static str {
        self.piece_type.color()
    }

    /// Absolute board coordinates of the filled cells if anchored at `position`
    pub fn cells_at(&self, position: Position) -> impl Iterator<Item = Position> + '_ {
        self.shape
            .filled_offsets()
            .map(move |offset| position.offset(offset.x, offset.y))
    }

    /// Absolute board coordinates of the filled cells
    pub fn block_positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.cells_at(self.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_position() {
        let piece = Piece::new(TetrominoType::T);
        assert_eq!(piece.position, Position::new(4, 0));
    }

    #[test]
    fn test_block_positions() {
        let piece = Piece::new(TetrominoType::O);
        let positions: Vec<_> = piece.block_positions().collect();
        assert_eq!(
            positions,
            vec![
                Position::new(4, 0),
                Position::new(5, 0),
                Position::new(4, 1),
                Position::new(5, 1),
            ]
        );
    }

    #[test]
    fn test_rotate_keeps_type_color_and_position() {
        let piece = Piece::new(TetrominoType::L).moved(-2, 3);
        let rotated = piece.rotated();
        assert_eq!(rotated.piece_type, piece.piece_type);
        assert_eq!(rotated.color(), piece.color());
        assert_eq!(rotated.position, piece.position);
        assert_ne!(rotated.shape, piece.shape);
    }

    #[test]
    fn test_moved_does_not_touch_original() {
        let piece = Piece::new(TetrominoType::I);
        let moved = piece.moved(1, 2);
        assert_eq!(piece.position, Position::new(4, 0));
        assert_eq!(moved.position, Position::new(5, 2));
    }
}
