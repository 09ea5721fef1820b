//! Random piece generation
//!
//! Each new piece is an independent uniform draw over the seven types. The
//! source of randomness is a capability handed to the engine, never ambient
//! state, so a seeded or scripted source replays a game exactly.

use crate::piece::Piece;
use crate::tetromino::TetrominoType;
use rand::rngs::ThreadRng;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// A source of uniform samples in `[0, 1)`
pub trait RandomSource {
    fn sample(&mut self) -> f64;
}

impl<F> RandomSource for F
where
    F: FnMut() -> f64,
{
    fn sample(&mut self) -> f64 {
        self()
    }
}

/// The system RNG, used when nothing else is configured
#[derive(Debug, Default)]
pub struct ThreadRandom {
    rng: ThreadRng,
}

impl ThreadRandom {
    pub fn new() -> Self {
        Self {
            rng: rand::thread_rng(),
        }
    }
}

impl RandomSource for ThreadRandom {
    fn sample(&mut self) -> f64 {
        self.rng.r#gen::<f64>()
    }
}

/// Deterministic ChaCha8 stream; the same seed yields the same pieces
#[derive(Debug, Clone)]
pub struct SeededRandom {
    rng: ChaCha8Rng,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededRandom {
    fn sample(&mut self) -> f64 {
        self.rng.r#gen::<f64>()
    }
}

/// Replays a fixed list of samples, cycling when it runs out
#[derive(Debug, Clone)]
pub struct SequenceRandom {
    samples: Vec<f64>,
    next: usize,
}

impl SequenceRandom {
    pub fn new(samples: impl Into<Vec<f64>>) -> Self {
        Self {
            samples: samples.into(),
            next: 0,
        }
    }

    /// Samples that pick exactly the given types, in order
    pub fn of_types(types: &[TetrominoType]) -> Self {
        Self::new(types.iter().map(|&t| sample_for(t)).collect::<Vec<_>>())
    }
}

impl RandomSource for SequenceRandom {
    fn sample(&mut self) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }
        let value = self.samples[self.next % self.samples.len()];
        self.next = (self.next + 1) % self.samples.len();
        value
    }
}

/// Map a sample to an index into [`TetrominoType::ALL`] via `floor(sample * 7)`.
///
/// A source that returns exactly 1.0 (or anything past it) would index one
/// beyond the table; such samples clamp to the last type. Negative and NaN
/// samples clamp to the first.
pub fn piece_index(sample: f64) -> usize {
    let count = TetrominoType::ALL.len();
    let scaled = (sample * count as f64).floor();
    if scaled.is_nan() || scaled < 0.0 {
        0
    } else if scaled >= (count - 1) as f64 {
        count - 1
    } else {
        scaled as usize
    }
}

/// Draw one sample and turn it into a freshly spawned piece
pub fn random_piece(source: &mut dyn RandomSource) -> Piece {
    Piece::new(TetrominoType::ALL[piece_index(source.sample())])
}

/// The midpoint sample for a type, handy for scripting sources
pub fn sample_for(piece_type: TetrominoType) -> f64 {
    let index = TetrominoType::ALL
        .iter()
        .position(|&t| t == piece_type)
        .unwrap_or(0);
    (index as f64 + 0.5) / TetrominoType::ALL.len() as f64
}
