//! API route handlers.

use axum::Router;

use crate::state::AppState;

pub mod customers;
pub mod dashboard;
pub mod schedule;
pub mod summary;

/// Build the full API router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(customers::router())
        .merge(schedule::router())
        .merge(summary::router())
        .merge(dashboard::router())
}
