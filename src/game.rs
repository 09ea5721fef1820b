//! Core game state and logic
//!
//! [`GameState`] is a plain value. Every transition on [`Engine`] borrows the
//! old state and returns a new one, so a single call is one complete step
//! that a test can inspect before and after. The engine only owns the
//! configuration, including the random source that new pieces are drawn from.

use crate::board::Board;
use crate::collision::{hard_drop_landing, is_game_over, is_valid_position, place_on_board};
use crate::config::EngineConfig;
use crate::lines::clear_completed_lines;
use crate::piece::Piece;
use crate::random::random_piece;
use crate::score::{calculate_level, calculate_score, drop_speed};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Where a game is in its lifecycle, derived from [`GameState`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    NotStarted,
    Running,
    Paused,
    GameOver,
}

/// Player intents the game can process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    MoveLeft,
    MoveRight,
    SoftDrop,
    Rotate,
    HardDrop,
    TogglePause,
}

/// Everything a renderer needs to draw one frame
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GameState {
    /// Placed cells only; the falling piece is never merged in here
    pub board: Board,
    /// Falling piece, absent before the first start and after game over
    pub current_piece: Option<Piece>,
    /// Piece that spawns after the current one is placed
    pub next_piece: Option<Piece>,
    pub score: u64,
    pub lines: u32,
    pub level: u32,
    pub game_over: bool,
    pub paused: bool,
}

impl GameState {
    pub fn status(&self) -> Status {
        if self.game_over {
            Status::GameOver
        } else if self.paused {
            Status::Paused
        } else if self.current_piece.is_some() {
            Status::Running
        } else {
            Status::NotStarted
        }
    }

    /// The falling piece, if player input should currently reach it
    fn active_piece(&self) -> Option<Piece> {
        if self.game_over || self.paused {
            return None;
        }
        self.current_piece
    }
}

/// Applies transitions to [`GameState`] values
#[derive(Debug, Default)]
pub struct Engine {
    config: EngineConfig,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Draw a fresh piece from the configured random source
    pub fn random_piece(&mut self) -> Piece {
        random_piece(self.config.random_source.as_mut())
    }

    /// Level for a cleared-line total under this configuration
    pub fn level_for_lines(&self, total_lines: u32) -> u32 {
        calculate_level(i64::from(total_lines), self.config.lines_per_level)
    }

    /// Milliseconds between automatic drops at `level`
    pub fn drop_speed_ms(&self, level: u32) -> u32 {
        drop_speed(
            level,
            self.config.base_drop_interval_ms,
            self.config.drop_interval_decrement_ms,
        )
    }

    /// How often the host should call [`Engine::soft_drop`] for this state
    pub fn drop_interval(&self, state: &GameState) -> Duration {
        Duration::from_millis(u64::from(self.drop_speed_ms(state.level)))
    }

    /// Start a fresh game, whatever the previous state was
    pub fn start(&mut self) -> GameState {
        let current = self.random_piece();
        let next = self.random_piece();
        GameState {
            board: Board::new(),
            current_piece: Some(current),
            next_piece: Some(next),
            score: 0,
            lines: 0,
            level: 0,
            game_over: false,
            paused: false,
        }
    }

    /// Dispatch a player intent
    pub fn apply(&mut self, state: &GameState, action: Action) -> GameState {
        match action {
            Action::MoveLeft => self.move_piece(state, -1, 0),
            Action::MoveRight => self.move_piece(state, 1, 0),
            Action::SoftDrop => self.soft_drop(state),
            Action::Rotate => self.rotate(state),
            Action::HardDrop => self.hard_drop(state),
            Action::TogglePause => self.toggle_pause(state),
        }
    }

    /// Flip the pause flag; ignored once the game is over
    pub fn toggle_pause(&self, state: &GameState) -> GameState {
        if state.game_over {
            return state.clone();
        }
        GameState {
            paused: !state.paused,
            ..state.clone()
        }
    }

    /// Shift the falling piece; a blocked move leaves the state as it was
    pub fn move_piece(&self, state: &GameState, dx: i32, dy: i32) -> GameState {
        let Some(piece) = state.active_piece() else {
            return state.clone();
        };
        let candidate = piece.position.offset(dx, dy);
        if !is_valid_position(&state.board, &piece, candidate) {
            return state.clone();
        }
        GameState {
            current_piece: Some(piece.at(candidate)),
            ..state.clone()
        }
    }

    /// Turn the falling piece clockwise in place, no kicks
    pub fn rotate(&self, state: &GameState) -> GameState {
        let Some(piece) = state.active_piece() else {
            return state.clone();
        };
        let rotated = piece.rotated();
        if !is_valid_position(&state.board, &rotated, rotated.position) {
            return state.clone();
        }
        GameState {
            current_piece: Some(rotated),
            ..state.clone()
        }
    }

    /// Move down one row, or place the piece if it cannot move
    pub fn soft_drop(&mut self, state: &GameState) -> GameState {
        let Some(piece) = state.active_piece() else {
            return state.clone();
        };
        let below = piece.position.offset(0, 1);
        if is_valid_position(&state.board, &piece, below) {
            return GameState {
                current_piece: Some(piece.at(below)),
                ..state.clone()
            };
        }
        self.place_piece(state, &piece)
    }

    /// Drop to the landing row and place immediately
    pub fn hard_drop(&mut self, state: &GameState) -> GameState {
        let Some(piece) = state.active_piece() else {
            return state.clone();
        };
        let landed = piece.at(hard_drop_landing(&state.board, &piece));
        self.place_piece(state, &landed)
    }

    /// Merge, clear, score, then spawn the next piece.
    ///
    /// The score multiplier uses the level from before this placement, even
    /// when the cleared lines push the level up.
    fn place_piece(&mut self, state: &GameState, piece: &Piece) -> GameState {
        let merged = place_on_board(&state.board, piece);
        let (board, lines_cleared) = clear_completed_lines(&merged);

        let lines = state.lines.saturating_add(lines_cleared as u32);
        let level = self.level_for_lines(lines);
        let score = state
            .score
            .saturating_add(calculate_score(lines_cleared as i64, i64::from(state.level)));

        let current = match state.next_piece {
            Some(next) => next,
            None => self.random_piece(),
        };

        // The piece that could not spawn stays in the preview
        if is_game_over(&board, &current) {
            return GameState {
                board,
                current_piece: None,
                next_piece: Some(current),
                score,
                lines,
                level,
                game_over: true,
                paused: false,
            };
        }

        let next = self.random_piece();
        GameState {
            board,
            current_piece: Some(current),
            next_piece: Some(next),
            score,
            lines,
            level,
            game_over: false,
            paused: state.paused,
        }
    }
}
