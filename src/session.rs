//! Player session: the balance and bet slip behind every round.
//!
//! The session is the only owner of mutable game state. Each event has a
//! single entry point: `settle` for rolls and `deposit` for top-ups. Slip
//! controls clamp instead of failing, mirroring how the controls behave.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info, warn};

use crate::engine::{clamp_target, clamped_odds, resolve_roll, Odds, RandomSource};
use crate::history::HistoryLog;
use crate::types::{BetRequest, DiceError, Direction, OutcomeRecord, INITIAL_BALANCE};

// ---------------------------------------------------------------------------
// Bet slip
// ---------------------------------------------------------------------------

/// The player's current selection. Always holds a playable target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BetSlip {
    pub bet_amount: u64,
    pub target: u8,
    pub direction: Direction,
}

impl Default for BetSlip {
    fn default() -> Self {
        Self {
            bet_amount: 10,
            target: 50,
            direction: Direction::Over,
        }
    }
}

impl BetSlip {
    fn to_request(self) -> BetRequest {
        BetRequest {
            bet_amount: self.bet_amount,
            target: self.target,
            direction: self.direction,
        }
    }
}

// ---------------------------------------------------------------------------
// Pending roll
// ---------------------------------------------------------------------------

/// A roll that has been started but not yet settled.
///
/// Holds the slip as it was when the roll started; later slip changes
/// don't affect it. Not `Clone`, so it can only be settled once.
#[derive(Debug)]
pub struct PendingRoll {
    request: BetRequest,
}

impl PendingRoll {
    pub fn request(&self) -> &BetRequest {
        &self.request
    }
}

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

/// Read-only copy of the session for the dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub balance: u64,
    pub slip: BetSlip,
    pub odds: Odds,
    pub potential_win: u64,
    pub rolling: bool,
    pub can_roll: bool,
    /// Newest-first.
    pub history: Vec<OutcomeRecord>,
}

impl Default for SessionSnapshot {
    fn default() -> Self {
        Session::new().snapshot()
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Session {
    balance: u64,
    slip: BetSlip,
    history: HistoryLog,
    rolling: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let odds = self.odds();
        write!(
            f,
            "balance={} | bet={} {} {} | {odds} | potential={}{}",
            self.balance,
            self.slip.bet_amount,
            self.slip.direction,
            self.slip.target,
            odds.potential_win(self.slip.bet_amount),
            if self.rolling { " | rolling..." } else { "" },
        )
    }
}

impl Session {
    /// Fresh session with the standard starting balance and slip.
    pub fn new() -> Self {
        Self::with_slip(BetSlip::default())
    }

    /// Fresh session with a custom starting slip. The target is clamped
    /// and the bet limited to the starting balance.
    pub fn with_slip(slip: BetSlip) -> Self {
        let mut session = Self {
            balance: INITIAL_BALANCE,
            slip: BetSlip::default(),
            history: HistoryLog::new(),
            rolling: false,
        };
        session.set_direction(slip.direction);
        session.set_target(i64::from(slip.target));
        session.set_bet(slip.bet_amount);
        session
    }

    // -- Accessors --

    pub fn balance(&self) -> u64 {
        self.balance
    }

    pub fn slip(&self) -> &BetSlip {
        &self.slip
    }

    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    pub fn is_rolling(&self) -> bool {
        self.rolling
    }

    /// Odds for the current slip.
    pub fn odds(&self) -> Odds {
        clamped_odds(i64::from(self.slip.target), self.slip.direction)
    }

    /// Payout the current slip would receive on a win.
    pub fn potential_win(&self) -> u64 {
        self.odds().potential_win(self.slip.bet_amount)
    }

    /// Whether the roll trigger should be enabled.
    pub fn can_roll(&self) -> bool {
        self.validate_roll().is_ok()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let odds = self.odds();
        SessionSnapshot {
            balance: self.balance,
            slip: self.slip,
            odds,
            potential_win: odds.potential_win(self.slip.bet_amount),
            rolling: self.rolling,
            can_roll: self.can_roll(),
            history: self.history.to_vec(),
        }
    }

    // -- Slip controls --

    pub fn set_target(&mut self, target: i64) -> u8 {
        self.slip.target = clamp_target(target);
        self.slip.target
    }

    pub fn adjust_target(&mut self, delta: i64) -> u8 {
        self.set_target(i64::from(self.slip.target).saturating_add(delta))
    }

    pub fn set_direction(&mut self, direction: Direction) {
        self.slip.direction = direction;
    }

    /// Set the bet, limited to the current balance.
    pub fn set_bet(&mut self, amount: u64) -> u64 {
        self.slip.bet_amount = amount.min(self.balance);
        self.slip.bet_amount
    }

    /// Move the bet by `delta`, staying within `[0, balance]`.
    pub fn adjust_bet(&mut self, delta: i64) -> u64 {
        if delta.is_negative() {
            self.lower_bet(delta.unsigned_abs())
        } else {
            self.raise_bet(delta.unsigned_abs())
        }
    }

    pub fn raise_bet(&mut self, amount: u64) -> u64 {
        self.set_bet(self.slip.bet_amount.saturating_add(amount))
    }

    pub fn lower_bet(&mut self, amount: u64) -> u64 {
        self.set_bet(self.slip.bet_amount.saturating_sub(amount))
    }

    /// Bet half the balance, rounded down.
    pub fn half_bet(&mut self) -> u64 {
        self.set_bet(self.balance / 2)
    }

    /// Bet the whole balance.
    pub fn max_bet(&mut self) -> u64 {
        self.set_bet(self.balance)
    }

    // -- Events --

    /// Start a roll with the current slip.
    pub fn begin_roll(&mut self) -> Result<PendingRoll, DiceError> {
        if let Err(e) = self.validate_roll() {
            debug!(error = %e, "Roll refused");
            return Err(e);
        }
        self.rolling = true;
        let request = self.slip.to_request();
        debug!(request = %request, "Roll started");
        Ok(PendingRoll { request })
    }

    /// Resolve a pending roll and apply it to the balance and history.
    pub fn settle(
        &mut self,
        pending: PendingRoll,
        rng: &mut dyn RandomSource,
    ) -> Result<OutcomeRecord, DiceError> {
        self.rolling = false;
        let request = pending.request;

        if request.bet_amount > self.balance {
            warn!(
                bet = request.bet_amount,
                balance = self.balance,
                "Balance fell below the pending bet"
            );
            return Err(DiceError::InsufficientBalance {
                needed: request.bet_amount,
                available: self.balance,
            });
        }

        let record = resolve_roll(&request, rng)?;
        self.apply_outcome(&record);
        Ok(record)
    }

    /// Start and settle a roll in one step.
    pub fn roll(&mut self, rng: &mut dyn RandomSource) -> Result<OutcomeRecord, DiceError> {
        let pending = self.begin_roll()?;
        self.settle(pending, rng)
    }

    /// Credit the balance. Returns the new balance.
    pub fn deposit(&mut self, amount: u64) -> Result<u64, DiceError> {
        if amount == 0 {
            return Err(DiceError::InvalidDeposit);
        }
        self.balance = self.balance.saturating_add(amount);
        info!(amount, balance = self.balance, "Deposit credited");
        Ok(self.balance)
    }

    // -- Internals --

    fn validate_roll(&self) -> Result<(), DiceError> {
        if self.rolling {
            return Err(DiceError::RollInFlight);
        }
        if self.slip.bet_amount == 0 {
            return Err(DiceError::BetNotPositive);
        }
        if self.slip.bet_amount > self.balance {
            return Err(DiceError::InsufficientBalance {
                needed: self.slip.bet_amount,
                available: self.balance,
            });
        }
        Ok(())
    }

    /// Stake out, payout in, record appended.
    fn apply_outcome(&mut self, record: &OutcomeRecord) {
        let balance_before = self.balance;
        // Balances saturate at u64::MAX, the same rule `deposit` follows.
        self.balance = self
            .balance
            .saturating_sub(record.bet_amount)
            .saturating_add(record.payout);
        self.history.push(record.clone());

        info!(
            roll = format!("{:.2}", record.roll),
            target = record.target,
            direction = %record.direction,
            bet = record.bet_amount,
            payout = record.payout,
            balance_before,
            balance_after = self.balance,
            "Round settled"
        );
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
