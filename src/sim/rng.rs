//! Randomness seam
//!
//! Every random decision in the simulation goes through [`Dice`], so a seeded
//! generator reproduces a run exactly and tests can script the draws.

use rand::Rng;
use rand::SeedableRng;
use rand_pcg::Pcg32;

/// Uniform integer draws in `[0, bound)`. `bound` must be non-zero.
pub trait Dice {
    fn roll(&mut self, bound: u32) -> u32;
}

/// Production dice backed by a seeded PCG stream
#[derive(Debug, Clone)]
pub struct PcgDice {
    rng: Pcg32,
}

impl PcgDice {
    pub fn seeded(seed: u64) -> Self {
        Self { rng: Pcg32::seed_from_u64(seed) }
    }
}

impl Dice for PcgDice {
    fn roll(&mut self, bound: u32) -> u32 {
        self.rng.random_range(0..bound)
    }
}

/// Scripted dice for deterministic tests and replays: yields the given
/// values in order (reduced modulo `bound`), cycling when exhausted.
#[derive(Debug, Clone)]
pub struct SeqDice {
    values: Vec<u32>,
    drawn: usize,
}

impl SeqDice {
    pub fn new(values: Vec<u32>) -> Self {
        assert!(!values.is_empty(), "SeqDice needs at least one value");
        Self { values, drawn: 0 }
    }

    /// Number of draws consumed so far
    pub fn drawn(&self) -> usize {
        self.drawn
    }
}

impl Dice for SeqDice {
    fn roll(&mut self, bound: u32) -> u32 {
        let value = self.values[self.drawn % self.values.len()];
        self.drawn += 1;
        value % bound
    }
}
