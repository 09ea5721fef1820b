//! What a renderer draws: the board with the falling piece laid over it

use crate::board::{BOARD_HEIGHT, BOARD_WIDTH};
use crate::game::GameState;
use serde::Serialize;

/// One cell of the display grid. The discriminants are the numbers a
/// renderer keys on: 0 empty, 1 placed, 2 falling piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[repr(u8)]
pub enum DisplayCell {
    #[default]
    Empty = 0,
    Placed = 1,
    Falling = 2,
}

pub type DisplayGrid = [[DisplayCell; BOARD_WIDTH]; BOARD_HEIGHT];

/// Overlay the current piece on a copy of the board.
/// Piece cells above the top row are left out.
pub fn display_grid(state: &GameState) -> DisplayGrid {
    let mut grid = [[DisplayCell::Empty; BOARD_WIDTH]; BOARD_HEIGHT];
    for (row, cells) in state.board.rows().iter().enumerate() {
        for (col, cell) in cells.iter().enumerate() {
            if cell.is_placed() {
                grid[row][col] = DisplayCell::Placed;
            }
        }
    }

    if let Some(piece) = &state.current_piece {
        for cell in piece.block_positions() {
            if (0..BOARD_HEIGHT as i32).contains(&cell.y) && (0..BOARD_WIDTH as i32).contains(&cell.x) {
                grid[cell.y as usize][cell.x as usize] = DisplayCell::Falling;
            }
        }
    }

    grid
}
