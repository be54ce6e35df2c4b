//! Random number sources
//!
//! All spawn and fire decisions draw uniform floats through [`RandomSource`],
//! so a run can be replayed from a seed or scripted outright in tests.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Uniform draws in `[0, 1)`
pub trait RandomSource {
    fn next_f32(&mut self) -> f32;
}

/// Seeded PCG stream used for real play
#[derive(Debug, Clone)]
pub struct SimRng {
    rng: Pcg32,
}

impl SimRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SimRng {
    #[inline]
    fn next_f32(&mut self) -> f32 {
        self.rng.random::<f32>()
    }
}

/// Replays a fixed list of draws, cycling when it runs out
#[derive(Debug, Clone)]
pub struct ScriptedRng {
    values: Vec<f32>,
    cursor: usize,
}

impl ScriptedRng {
    /// An empty list always yields 0.0
    pub fn new(values: Vec<f32>) -> Self {
        Self { values, cursor: 0 }
    }

    pub fn constant(value: f32) -> Self {
        Self::new(vec![value])
    }

    /// Draws taken so far
    pub fn draws(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for ScriptedRng {
    fn next_f32(&mut self) -> f32 {
        if self.values.is_empty() {
            return 0.0;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value
    }
}
