//! 7-bag randomizer for piece generation
//!
//! All 7 kinds are shuffled, then dealt out before reshuffling. This
//! prevents long droughts of any one kind.

use crate::tetromino::Kind;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// The 7-bag piece randomizer, generic over its random source
#[derive(Debug, Clone)]
pub struct Bag<R = ChaCha8Rng> {
    /// Remaining kinds of the current fill, dealt from the back
    pieces: Vec<Kind>,
    rng: R,
}

impl Bag<ChaCha8Rng> {
    /// Create a bag seeded from the thread rng
    pub fn new() -> Self {
        Self::with_seed(rand::random())
    }

    /// Create a bag with a reproducible sequence
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(ChaCha8Rng::seed_from_u64(seed))
    }
}

impl Default for Bag<ChaCha8Rng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> Bag<R> {
    /// Create a bag drawing its shuffles from `rng`
    pub fn with_rng(rng: R) -> Self {
        Self {
            pieces: Vec::with_capacity(7),
            rng,
        }
    }

    /// Draw the next kind, reshuffling a full set first if the bag is empty
    pub fn draw(&mut self) -> Kind {
        loop {
            if let Some(kind) = self.pieces.pop() {
                return kind;
            }
            self.refill();
        }
    }

    /// Number of kinds left before the next reshuffle
    pub fn remaining(&self) -> usize {
        self.pieces.len()
    }

    /// Throw away what is left of the current fill
    pub fn clear(&mut self) {
        self.pieces.clear();
    }

    fn refill(&mut self) {
        self.pieces.extend(Kind::all());
        self.pieces.shuffle(&mut self.rng);
        tracing::trace!(order = ?self.pieces, "bag refilled");
    }
}
