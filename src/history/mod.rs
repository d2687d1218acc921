//! Round history: the bounded outcome log and its derived views.

pub mod aggregate;

use serde::Serialize;
use std::collections::VecDeque;

use crate::types::{OutcomeRecord, HISTORY_CAP};

pub use aggregate::{aggregate, CumulativePoint, HistoryStats};

/// Outcomes ordered newest-first, capped at a fixed capacity.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct HistoryLog {
    #[serde(skip)]
    capacity: usize,
    records: VecDeque<OutcomeRecord>,
}

impl Default for HistoryLog {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryLog {
    pub fn new() -> Self {
        Self::with_capacity(HISTORY_CAP)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            records: VecDeque::with_capacity(capacity + 1),
        }
    }

    /// Record a new outcome, evicting the oldest if over capacity.
    /// Returns the evicted record, if any.
    pub fn push(&mut self, record: OutcomeRecord) -> Option<OutcomeRecord> {
        self.records.push_front(record);
        if self.records.len() > self.capacity {
            self.records.pop_back()
        } else {
            None
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Most recent outcome.
    pub fn latest(&self) -> Option<&OutcomeRecord> {
        self.records.front()
    }

    /// Iterate newest-first.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &OutcomeRecord> {
        self.records.iter()
    }

    /// Owned copy, newest-first.
    pub fn to_vec(&self) -> Vec<OutcomeRecord> {
        self.records.iter().cloned().collect()
    }

    /// Cumulative profit series, oldest-first.
    pub fn profit_series(&self) -> Vec<CumulativePoint> {
        aggregate(self.records.iter())
    }

    pub fn stats(&self) -> HistoryStats {
        HistoryStats::from_history(self.records.iter())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
