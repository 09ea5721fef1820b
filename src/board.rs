//! Game board representation

use serde::{Deserialize, Serialize};

/// Standard board dimensions
pub const BOARD_WIDTH: usize = 10;
pub const BOARD_HEIGHT: usize = 20;

/// A single row of the board, left to right
pub type Row = [Cell; BOARD_WIDTH];

/// A cell on the board - either empty or holding a placed block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    Placed,
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn is_placed(&self) -> bool {
        matches!(self, Cell::Placed)
    }
}

/// The game board
///
/// Fixed at `BOARD_HEIGHT` rows of `BOARD_WIDTH` cells. Row 0 is the top,
/// row `BOARD_HEIGHT - 1` is the floor. Rows are plain arrays, so every copy
/// of a board owns its own storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    cells: [Row; BOARD_HEIGHT],
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

    /// Build a board from explicit rows (top to bottom)
    pub fn from_rows(cells: [Row; BOARD_HEIGHT]) -> Self {
        Self { cells }
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

    /// Whether the cell at (row, col) is inside the board and placed
    pub fn is_placed(&self, row: i32, col: i32) -> bool {
        self.get(row, col).is_some_and(|cell| cell.is_placed())
    }

    /// All rows, top to bottom
    pub fn rows(&self) -> &[Row; BOARD_HEIGHT] {
        &self.cells
    }

    /// Check if a line is completely filled
    pub fn is_row_full(row: &Row) -> bool {
        row.iter().all(|cell| cell.is_placed())
    }

    /// Check if the board is completely empty
    pub fn is_empty(&self) -> bool {
        self.cells
            .iter()
            .all(|row| row.iter().all(|cell| cell.is_empty()))
    }

    /// Number of placed cells on the whole board
    pub fn placed_count(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|cell| cell.is_placed())
            .count()
    }
}
