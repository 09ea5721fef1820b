//! Line clearing

use crate::board::{BOARD_HEIGHT, BOARD_WIDTH, Board, Cell, Row};

/// Remove every full row and let the rest fall.
///
/// Surviving rows keep their relative order and settle at the bottom; empty
/// rows refill the top. Returns the new board and how many rows were removed.
pub fn clear_completed_lines(board: &Board) -> (Board, usize) {
    let mut cells: [Row; BOARD_HEIGHT] = [[Cell::Empty; BOARD_WIDTH]; BOARD_HEIGHT];
    let mut write_row = BOARD_HEIGHT;
    let mut lines_cleared = 0;

    // Walk from the floor up so kept rows pack downward
    for row in board.rows().iter().rev() {
        if Board::is_row_full(row) {
            lines_cleared += 1;
        } else {
            write_row -= 1;
            cells[write_row] = *row;
        }
    }

    (Board::from_rows(cells), lines_cleared)
}
