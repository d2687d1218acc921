//! Cumulative profit series and summary statistics.
//!
//! Both views are recomputed from the stored history on demand; nothing
//! here is cached.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

use crate::types::OutcomeRecord;

/// One point on the cumulative profit chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CumulativePoint {
    /// Zero-based position in chronological order.
    pub sequence_index: usize,
    /// Running sum of `payout - bet` up to and including this round.
    pub cumulative_profit: i64,
    /// Wall-clock label (`HH:MM:SS`, UTC).
    pub timestamp_label: String,
    pub timestamp: DateTime<Utc>,
}

impl CumulativePoint {
    /// Whether the running total is at or above break-even.
    pub fn is_positive(&self) -> bool {
        self.cumulative_profit >= 0
    }
}

/// Build the cumulative profit series from a newest-first history.
///
/// Records are walked oldest-to-newest from a zero baseline, producing one
/// point per record in chronological order.
pub fn aggregate<'a, I>(history_newest_first: I) -> Vec<CumulativePoint>
where
    I: IntoIterator<Item = &'a OutcomeRecord>,
    I::IntoIter: DoubleEndedIterator,
{
    history_newest_first
        .into_iter()
        .rev()
        .enumerate()
        .scan(0i64, |running, (sequence_index, record)| {
            *running = running.saturating_add(record.profit());
            Some(CumulativePoint {
                sequence_index,
                cumulative_profit: *running,
                timestamp_label: record.timestamp.format("%H:%M:%S").to_string(),
                timestamp: record.timestamp,
            })
        })
        .collect()
}

/// Summary figures for the live stats panel.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HistoryStats {
    pub rounds: usize,
    /// Final cumulative profit, 0 for an empty history.
    pub total_profit: i64,
    pub total_wagered: u64,
    /// Rounds that paid more than the stake.
    pub wins: usize,
    /// Rounds that paid nothing.
    pub losses: usize,
}

impl HistoryStats {
    pub fn from_history<'a, I>(history: I) -> Self
    where
        I: IntoIterator<Item = &'a OutcomeRecord>,
    {
        history
            .into_iter()
            .fold(HistoryStats::default(), |mut stats, record| {
                stats.rounds += 1;
                stats.total_profit = stats.total_profit.saturating_add(record.profit());
                stats.total_wagered = stats.total_wagered.saturating_add(record.bet_amount);
                if record.payout > record.bet_amount {
                    stats.wins += 1;
                }
                if record.payout == 0 {
                    stats.losses += 1;
                }
                stats
            })
    }

    /// Wins as a percentage of all rounds. Returns 0.0 if empty.
    pub fn win_rate(&self) -> f64 {
        if self.rounds == 0 {
            0.0
        } else {
            (self.wins as f64 / self.rounds as f64) * 100.0
        }
    }
}

impl fmt::Display for HistoryStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.total_profit >= 0 { "+" } else { "" };
        write!(
            f,
            "profit={sign}{} | wagered={} | rounds={} (W{}/L{}) | win_rate={:.1}%",
            self.total_profit,
            self.total_wagered,
            self.rounds,
            self.wins,
            self.losses,
            self.win_rate(),
        )
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
