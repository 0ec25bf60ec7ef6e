//! Range summary API handlers.

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use serde::Deserialize;
use tracing::instrument;

use gullak_core::CollectionDay;
use gullak_ledger::summary::{SummaryRow, SummaryService};

use crate::{error::AppError, state::AppState};

/// Build the summary router.
pub fn router() -> Router<AppState> {
    Router::new().route("/api/summary", get(range_summary))
}

/// Inclusive day range for the summary.
#[derive(Debug, Deserialize)]
pub struct SummaryQuery {
    pub start: CollectionDay,
    pub end: CollectionDay,
}

/// Per-customer totals and remaining balances over a day range.
#[instrument(skip(state))]
pub async fn range_summary(
    State(state): State<AppState>,
    Query(query): Query<SummaryQuery>,
) -> Result<Json<Vec<SummaryRow>>, AppError> {
    let rows = SummaryService::new(state.store())
        .range_summary(query.start, query.end)
        .await?;
    Ok(Json(rows))
}
