//! Daily schedule API handlers.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post, put},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use gullak_core::{AgentId, CollectionDay, CustomerId, PaymentId};
use gullak_ledger::models::payment::Payment;
use gullak_ledger::payments::PaymentLedger;
use gullak_ledger::schedule::{ScheduleRow, ScheduleService};

use crate::{error::AppError, state::AppState};

/// Build the schedule router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/schedule", get(day_schedule))
        .route("/api/schedule/order", put(save_order))
        .route("/api/schedule/payments", post(record_payment))
}

/// Schedule query parameters.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleQuery {
    pub agent_id: AgentId,
    pub date: CollectionDay,
}

/// One schedule row for display: position, customer identity, and the
/// day's recorded payment if any.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRowView {
    pub serial_number: usize,
    pub customer_id: CustomerId,
    pub name: String,
    pub account_number: String,
    pub amount_paid: Option<Decimal>,
    /// Present once a payment exists, so the client can edit the same
    /// cell again without re-querying.
    pub payment_id: Option<PaymentId>,
}

impl ScheduleRowView {
    fn from_row(serial_number: usize, row: ScheduleRow) -> Self {
        Self {
            serial_number,
            name: row.customer.full_name(),
            account_number: row.customer.account_number.clone(),
            customer_id: row.customer.id,
            amount_paid: row.payment.as_ref().map(|p| p.amount_paid),
            payment_id: row.payment.map(|p| p.id),
        }
    }
}

/// The merged visit schedule for an agent and a calendar day.
#[instrument(skip(state))]
pub async fn day_schedule(
    State(state): State<AppState>,
    Query(query): Query<ScheduleQuery>,
) -> Result<Json<Vec<ScheduleRowView>>, AppError> {
    let rows = ScheduleService::new(state.store())
        .day_schedule(&query.agent_id, query.date)
        .await?;
    let views = rows
        .into_iter()
        .enumerate()
        .map(|(i, row)| ScheduleRowView::from_row(i + 1, row))
        .collect();
    Ok(Json(views))
}

/// Request for saving an agent's visit order.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveOrderRequest {
    pub agent_id: AgentId,
    /// Customer ids in preferred visit sequence; replaces any prior order.
    pub order: Vec<CustomerId>,
}

/// Save an agent's preferred visit order wholesale.
#[instrument(skip(state, body))]
pub async fn save_order(
    State(state): State<AppState>,
    Json(body): Json<SaveOrderRequest>,
) -> Result<StatusCode, AppError> {
    ScheduleService::new(state.store())
        .save_visit_order(&body.agent_id, body.order)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Request for recording one day's installment.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordPaymentRequest {
    pub agent_id: AgentId,
    pub customer_id: CustomerId,
    pub date: CollectionDay,
    pub amount: Decimal,
}

/// Record or replace the payment for a customer on a calendar day.
#[instrument(skip(state, body))]
pub async fn record_payment(
    State(state): State<AppState>,
    Json(body): Json<RecordPaymentRequest>,
) -> Result<Json<Payment>, AppError> {
    let payment = PaymentLedger::new(state.store())
        .record_payment(&body.customer_id, body.date, body.amount, &body.agent_id)
        .await?;
    Ok(Json(payment))
}
