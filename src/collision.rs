//! Collision checks and piece placement
//!
//! All functions take the board by reference and hand back new values; the
//! input board is never modified.

use crate::board::{BOARD_HEIGHT, BOARD_WIDTH, Board, Cell};
use crate::piece::{Piece, Position};

/// Whether `piece` fits with its anchor at `candidate`.
///
/// A filled cell is out if it lands left of column 0, right of the last
/// column, below the floor, or on a placed cell. Cells above the top row are
/// allowed so a piece can be checked before it has fully entered the board.
pub fn is_valid_position(board: &Board, piece: &Piece, candidate: Position) -> bool {
    piece.cells_at(candidate).all(|cell| {
        if cell.x < 0 || cell.x >= BOARD_WIDTH as i32 || cell.y >= BOARD_HEIGHT as i32 {
            return false;
        }
        cell.y < 0 || !board.is_placed(cell.y, cell.x)
    })
}

/// A copy of `board` with every on-board cell of `piece` marked placed.
/// Cells that fall outside the board are dropped.
pub fn place_on_board(board: &Board, piece: &Piece) -> Board {
    let mut placed = *board;
    for cell in piece.block_positions() {
        placed.set(cell.y, cell.x, Cell::Placed);
    }
    placed
}

/// The lowest position straight below the piece where it still fits.
/// Returns the current position if the piece is already resting.
pub fn hard_drop_landing(board: &Board, piece: &Piece) -> Position {
    let mut landing = piece.position;
    // Ends once any filled cell would pass the floor
    while is_valid_position(board, piece, landing.offset(0, 1)) {
        landing = landing.offset(0, 1);
    }
    landing
}

/// Whether a freshly spawned piece is already blocked where it stands
pub fn is_game_over(board: &Board, spawned: &Piece) -> bool {
    !is_valid_position(board, spawned, spawned.position)
}
