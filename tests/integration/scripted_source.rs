//! Scripted randomness for integration testing.
//!
//! Hands out a fixed sequence of draws so round outcomes are known in
//! advance. Rolls are `draw * 100`, so a draw of `0.6` rolls 60.00.

use std::collections::VecDeque;

use dice::engine::RandomSource;

pub struct ScriptedSource {
    draws: VecDeque<f64>,
    fallback: f64,
    served: usize,
}

impl ScriptedSource {
    /// Serve `draws` in order, then `0.5` forever.
    pub fn new(draws: &[f64]) -> Self {
        Self {
            draws: draws.iter().copied().collect(),
            fallback: 0.5,
            served: 0,
        }
    }

    /// Serve the same draw forever.
    pub fn constant(draw: f64) -> Self {
        Self {
            draws: VecDeque::new(),
            fallback: draw,
            served: 0,
        }
    }

    /// Number of draws handed out so far.
    pub fn served(&self) -> usize {
        self.served
    }
}

impl RandomSource for ScriptedSource {
    fn next(&mut self) -> f64 {
        self.served += 1;
        self.draws.pop_front().unwrap_or(self.fallback)
    }
}
