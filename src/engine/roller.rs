//! Roll resolution.
//!
//! Turns a bet request and a uniform draw into an immutable
//! `OutcomeRecord`. Nothing here touches the balance; the session applies
//! the result.

use chrono::Utc;
use tracing::debug;
use uuid::Uuid;

use super::odds::compute_odds;
use super::random::RandomSource;
use crate::types::{BetRequest, DiceError, OutcomeRecord};

/// Draw a roll from `rng` and resolve `request` against it.
pub fn resolve_roll(
    request: &BetRequest,
    rng: &mut dyn RandomSource,
) -> Result<OutcomeRecord, DiceError> {
    let unit = rng.next();
    if !(0.0..1.0).contains(&unit) {
        return Err(DiceError::RandomOutOfRange(unit));
    }
    settle_roll(request, unit * 100.0)
}

/// Resolve `request` for a known roll in `[0, 100)`.
pub fn settle_roll(request: &BetRequest, roll: f64) -> Result<OutcomeRecord, DiceError> {
    if !(0.0..100.0).contains(&roll) {
        return Err(DiceError::RollOutOfRange(roll));
    }
    let odds = compute_odds(request.target, request.direction)?;

    let won = request.direction.beats(roll, request.target);
    let payout = if won {
        odds.potential_win(request.bet_amount)
    } else {
        0
    };

    debug!(
        bet = request.bet_amount,
        target = request.target,
        direction = %request.direction,
        roll = format!("{roll:.2}"),
        multiplier = %odds.multiplier_label(),
        won,
        payout,
        "Roll resolved"
    );

    Ok(OutcomeRecord {
        id: Uuid::new_v4(),
        timestamp: Utc::now(),
        bet_amount: request.bet_amount,
        roll,
        target: request.target,
        direction: request.direction,
        multiplier: odds.multiplier,
        payout,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
