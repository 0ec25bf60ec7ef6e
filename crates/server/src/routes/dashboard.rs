//! Dashboard API handlers.

use axum::{Json, Router, extract::State, routing::get};
use chrono::Utc;
use tracing::instrument;

use gullak_ledger::dashboard::{DashboardService, DashboardSnapshot};

use crate::{error::AppError, state::AppState};

/// Build the dashboard router.
pub fn router() -> Router<AppState> {
    Router::new().route("/api/dashboard", get(snapshot))
}

/// Today's and the trailing-30-day collection totals, the customer count,
/// and the recent-payments feed.
#[instrument(skip(state))]
pub async fn snapshot(State(state): State<AppState>) -> Result<Json<DashboardSnapshot>, AppError> {
    let snapshot = DashboardService::new(state.store()).snapshot(Utc::now()).await?;
    Ok(Json(snapshot))
}
