//! Dashboard router fed by a live session.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use std::sync::Arc;
use tower::ServiceExt;

use dice::dashboard::{build_router, DashboardState};
use dice::session::Session;

use crate::scripted_source::ScriptedSource;

async fn fetch(state: &Arc<DashboardState>, uri: &str) -> serde_json::Value {
    let resp = build_router(state.clone())
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = axum::body::to_bytes(resp.into_body(), 1_000_000).await.unwrap();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn test_dashboard_tracks_published_rounds() {
    let mut session = Session::new();
    let state = Arc::new(DashboardState::new(session.snapshot()));

    let before = fetch(&state, "/api/stats").await;
    assert_eq!(before["rounds"], 0);

    let mut rng = ScriptedSource::new(&[0.75, 0.25]);
    session.roll(&mut rng).unwrap();
    session.roll(&mut rng).unwrap();
    state.publish(session.snapshot()).await;

    let status = fetch(&state, "/api/status").await;
    assert_eq!(status["balance"], 999);
    assert_eq!(status["rounds"], 2);

    let history = fetch(&state, "/api/history").await;
    let history = history.as_array().unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0]["payout"], 0);
    assert_eq!(history[1]["payout"], 19);

    let profit = fetch(&state, "/api/profit").await;
    let profit = profit.as_array().unwrap();
    assert_eq!(profit[0]["cumulative_profit"], 9);
    assert_eq!(profit[1]["cumulative_profit"], -1);
    assert_eq!(profit[1]["sequence_index"], 1);
}
