//! Dashboard API route handlers.
//!
//! All endpoints return JSON built from the last published session
//! snapshot. State is shared via `Arc<DashboardState>`.

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::history::{aggregate, CumulativePoint, HistoryStats};
use crate::session::{BetSlip, SessionSnapshot};
use crate::types::OutcomeRecord;

// ---------------------------------------------------------------------------
// Shared state
// ---------------------------------------------------------------------------

/// Shared state accessible by all route handlers.
pub struct DashboardState {
    snapshot: RwLock<SessionSnapshot>,
}

impl DashboardState {
    pub fn new(initial: SessionSnapshot) -> Self {
        Self {
            snapshot: RwLock::new(initial),
        }
    }

    /// Replace the published snapshot.
    pub async fn publish(&self, snapshot: SessionSnapshot) {
        *self.snapshot.write().await = snapshot;
    }
}

pub type AppState = Arc<DashboardState>;

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct StatusResponse {
    pub balance: u64,
    pub slip: BetSlip,
    pub win_chance: String,
    pub multiplier: String,
    pub potential_win: u64,
    pub rolling: bool,
    pub can_roll: bool,
    pub rounds: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    #[serde(flatten)]
    pub stats: HistoryStats,
    pub win_rate: f64,
}

// ---------------------------------------------------------------------------
// Route handlers
// ---------------------------------------------------------------------------

/// GET /api/status
pub async fn get_status(State(state): State<AppState>) -> Json<StatusResponse> {
    let snap = state.snapshot.read().await;
    Json(StatusResponse {
        balance: snap.balance,
        slip: snap.slip,
        win_chance: snap.odds.win_chance_label(),
        multiplier: snap.odds.multiplier_label(),
        potential_win: snap.potential_win,
        rolling: snap.rolling,
        can_roll: snap.can_roll,
        rounds: snap.history.len(),
    })
}

/// GET /api/history (newest first)
pub async fn get_history(State(state): State<AppState>) -> Json<Vec<OutcomeRecord>> {
    let snap = state.snapshot.read().await;
    Json(snap.history.clone())
}

/// GET /api/profit (cumulative series, oldest first)
pub async fn get_profit(State(state): State<AppState>) -> Json<Vec<CumulativePoint>> {
    let snap = state.snapshot.read().await;
    Json(aggregate(&snap.history))
}

/// GET /api/stats
pub async fn get_stats(State(state): State<AppState>) -> Json<StatsResponse> {
    let snap = state.snapshot.read().await;
    let stats = HistoryStats::from_history(&snap.history);
    Json(StatsResponse {
        win_rate: stats.win_rate(),
        stats,
    })
}

/// GET /health
pub async fn health() -> StatusCode {
    StatusCode::OK
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
