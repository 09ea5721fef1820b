//! BLOCKTRIS - a deterministic falling-block puzzle engine
//!
//! The engine ([`board`], [`tetromino`], [`piece`], [`collision`], [`lines`],
//! [`score`], [`game`]) is pure: every transition takes a [`GameState`] and
//! returns the next one, and the only source of nondeterminism is the
//! [`RandomSource`] handed in through [`EngineConfig`].
//!
//! Around it sit the collaborators a front end needs: a display overlay
//! ([`view`]), an auto-drop scheduler ([`timer`]), keyboard intents
//! ([`input`]), settings ([`settings`]) and a high-score table ([`highscore`]).
//!
//! ```
//! use blocktris::{Action, Engine, EngineConfig};
//!
//! let mut engine = Engine::new(EngineConfig::default().with_random_source(|| 0.0));
//! let state = engine.start();
//! let state = engine.apply(&state, Action::HardDrop);
//! assert_eq!(state.board.placed_count(), 4);
//! ```

pub mod board;
pub mod collision;
pub mod config;
pub mod error;
pub mod game;
pub mod highscore;
pub mod input;
pub mod lines;
pub mod piece;
pub mod random;
pub mod score;
pub mod settings;
pub mod tetromino;
pub mod timer;
pub mod view;

pub use board::{BOARD_HEIGHT, BOARD_WIDTH, Board, Cell};
pub use config::EngineConfig;
pub use error::{ShapeError, StorageError};
pub use game::{Action, Engine, GameState, Status};
pub use piece::{Piece, Position};
pub use random::{RandomSource, SeededRandom, SequenceRandom, ThreadRandom};
pub use tetromino::{Shape, TetrominoType};
