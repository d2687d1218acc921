//! Odds calculation.
//!
//! Maps a target and direction to a win chance and a payout multiplier
//! with the house edge baked into the numerator.

use serde::Serialize;
use std::fmt;

use crate::types::{DiceError, Direction, HOUSE_EDGE_NUMERATOR, TARGET_MAX, TARGET_MIN};

/// Win chance and payout multiplier for one target/direction pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Odds {
    /// Probability of winning, as a percentage in (0, 100).
    pub win_chance: f64,
    /// Payout factor applied to the stake on a win (full precision).
    pub multiplier: f64,
}

impl Odds {
    /// Payout for `bet_amount` if the roll wins, floor-truncated.
    pub fn potential_win(&self, bet_amount: u64) -> u64 {
        (bet_amount as f64 * self.multiplier).floor() as u64
    }

    /// Multiplier rounded to four decimals for display, e.g. `1.9800`.
    pub fn multiplier_label(&self) -> String {
        format!("{:.4}", self.multiplier)
    }

    /// Win chance with two decimals for display, e.g. `49.00`.
    pub fn win_chance_label(&self) -> String {
        format!("{:.2}", self.win_chance)
    }
}

impl fmt::Display for Odds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "win={}% x{}",
            self.win_chance_label(),
            self.multiplier_label()
        )
    }
}

/// Compute the odds for a target and direction.
///
/// `win_chance` is `100 - target` for Over and `target` for Under;
/// `multiplier = 99 / win_chance`.
pub fn compute_odds(target: u8, direction: Direction) -> Result<Odds, DiceError> {
    if !(TARGET_MIN..=TARGET_MAX).contains(&target) {
        return Err(DiceError::TargetOutOfRange(target));
    }
    Ok(odds_in_range(target, direction))
}

/// Odds for any target after clamping it into the playable range.
pub fn clamped_odds(target: i64, direction: Direction) -> Odds {
    odds_in_range(clamp_target(target), direction)
}

/// Caller guarantees `target` is within bounds.
fn odds_in_range(target: u8, direction: Direction) -> Odds {
    let target = f64::from(target);
    let win_chance = match direction {
        Direction::Over => 100.0 - target,
        Direction::Under => target,
    };

    Odds {
        win_chance,
        multiplier: HOUSE_EDGE_NUMERATOR / win_chance,
    }
}

/// Clamp an arbitrary target into the playable range.
pub fn clamp_target(value: i64) -> u8 {
    value.clamp(i64::from(TARGET_MIN), i64::from(TARGET_MAX)) as u8
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
