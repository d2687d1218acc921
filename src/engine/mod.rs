//! Outcome engine: odds and roll resolution.
//!
//! Stateless: every call maps inputs to an `Odds` or an `OutcomeRecord`.

pub mod odds;
pub mod random;
pub mod roller;

pub use odds::{clamp_target, clamped_odds, compute_odds, Odds};
pub use random::{source_from_seed, EntropySource, RandomSource, SeededSource};
pub use roller::{resolve_roll, settle_roll};
