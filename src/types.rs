//! Shared types for the DICE game.
//!
//! These types form the data model used across all modules.
//! The engine, history, session and dashboard modules depend on them
//! without depending on each other.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Game constants
// ---------------------------------------------------------------------------

/// Lowest target a bet may use.
pub const TARGET_MIN: u8 = 3;

/// Highest target a bet may use.
pub const TARGET_MAX: u8 = 97;

/// Numerator of the payout formula. A fair game would use 100.
pub const HOUSE_EDGE_NUMERATOR: f64 = 99.0;

/// Maximum number of outcomes kept in the history log.
pub const HISTORY_CAP: usize = 50;

/// Balance every session starts with.
pub const INITIAL_BALANCE: u64 = 1000;

/// Quick-pick deposit amounts.
pub const DEPOSIT_PRESETS: [u64; 4] = [100, 250, 500, 1000];

// ---------------------------------------------------------------------------
// Direction
// ---------------------------------------------------------------------------

/// Which side of the target the roll has to land on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Over,
    Under,
}

impl Direction {
    /// The opposite direction.
    pub fn opposite(&self) -> Self {
        match self {
            Direction::Over => Direction::Under,
            Direction::Under => Direction::Over,
        }
    }

    /// Whether `roll` beats `target` in this direction. Landing exactly on
    /// the target loses both ways.
    pub fn beats(&self, roll: f64, target: u8) -> bool {
        let target = f64::from(target);
        match self {
            Direction::Over => roll > target,
            Direction::Under => roll < target,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Over => write!(f, "OVER"),
            Direction::Under => write!(f, "UNDER"),
        }
    }
}

/// Parse a direction (case-insensitive).
impl std::str::FromStr for Direction {
    type Err = DiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "over" | "o" | ">" => Ok(Direction::Over),
            "under" | "u" | "<" => Ok(Direction::Under),
            _ => Err(DiceError::InvalidDirection(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Bet request
// ---------------------------------------------------------------------------

/// A single bet handed to the outcome engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BetRequest {
    pub bet_amount: u64,
    /// Win boundary, 3–97 inclusive.
    pub target: u8,
    pub direction: Direction,
}

impl fmt::Display for BetRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.bet_amount, self.direction, self.target)
    }
}

// ---------------------------------------------------------------------------
// Outcome record
// ---------------------------------------------------------------------------

/// Result of one resolved roll. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutcomeRecord {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub bet_amount: u64,
    /// Uniform draw in [0, 100).
    pub roll: f64,
    pub target: u8,
    pub direction: Direction,
    /// Full-precision multiplier used for the payout.
    pub multiplier: f64,
    pub payout: u64,
}

impl fmt::Display for OutcomeRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let profit = self.profit();
        let sign = if profit >= 0 { "+" } else { "" };
        write!(
            f,
            "{} {:>5.2} {} {:<2} | bet={} x{:.4} | {sign}{profit}",
            self.timestamp.format("%H:%M:%S"),
            self.roll,
            match self.direction {
                Direction::Over => ">",
                Direction::Under => "<",
            },
            self.target,
            self.bet_amount,
            self.multiplier,
        )
    }
}

impl OutcomeRecord {
    /// Whether the roll landed on the winning side of the target.
    pub fn won(&self) -> bool {
        self.direction.beats(self.roll, self.target)
    }

    /// Net result of this round: payout minus stake, saturating at the
    /// `i64` bounds.
    pub fn profit(&self) -> i64 {
        let net = i128::from(self.payout) - i128::from(self.bet_amount);
        i64::try_from(net).unwrap_or(if net.is_negative() { i64::MIN } else { i64::MAX })
    }

    /// Helper to build a record with a fixed timestamp for tests.
    #[cfg(test)]
    pub fn sample(bet_amount: u64, payout: u64) -> Self {
        use chrono::TimeZone;
        OutcomeRecord {
            id: Uuid::new_v4(),
            timestamp: Utc.with_ymd_and_hms(2026, 3, 14, 12, 0, 0).unwrap(),
            bet_amount,
            roll: if payout > 0 { 75.0 } else { 25.0 },
            target: 50,
            direction: Direction::Over,
            multiplier: 1.98,
            payout,
        }
    }
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Domain-specific error types for DICE.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DiceError {
    #[error("Target {0} out of range (3-97)")]
    TargetOutOfRange(u8),

    #[error("Unknown direction: {0}")]
    InvalidDirection(String),

    #[error("Bet amount must be positive")]
    BetNotPositive,

    #[error("Insufficient balance: need {needed}, have {available}")]
    InsufficientBalance { needed: u64, available: u64 },

    #[error("A roll is already in flight")]
    RollInFlight,

    #[error("Deposit amount must be positive")]
    InvalidDeposit,

    #[error("Random source produced {0}, expected a value in [0, 1)")]
    RandomOutOfRange(f64),

    #[error("Roll {0} out of range [0, 100)")]
    RollOutOfRange(f64),
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
