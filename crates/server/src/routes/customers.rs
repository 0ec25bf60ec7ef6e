//! Customer management API handlers.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use gullak_core::{AgentId, CustomerId};
use gullak_ledger::models::customer::{Customer, CustomerUpdate, NewCustomer};
use gullak_ledger::models::payment::Payment;
use gullak_ledger::repo::{CustomerRepository, PaymentRepository};

use crate::{error::AppError, state::AppState};

/// Build the customers router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/customers", get(list).post(create))
        .route("/api/customers/{id}", get(detail).patch(update))
}

/// Search query parameters.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    /// Case-insensitive match over name and account number.
    pub q: Option<String>,
}

/// List enrolled customers, optionally filtered by a search query.
#[instrument(skip(state))]
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<Customer>>, AppError> {
    let customers = CustomerRepository::new(state.store()).list_enrolled().await?;
    let customers = match query.q.as_deref() {
        Some(q) => customers
            .into_iter()
            .filter(|c| c.matches_query(q))
            .collect(),
        None => customers,
    };
    Ok(Json(customers))
}

/// Request for opening a customer account.
///
/// `agentId` identifies the recording agent; it is supplied by whatever
/// authentication layer sits in front of this API.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCustomerRequest {
    pub agent_id: AgentId,
    #[serde(flatten)]
    pub customer: NewCustomer,
}

/// Create a customer account.
#[instrument(skip(state, body))]
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<CreateCustomerRequest>,
) -> Result<(StatusCode, Json<Customer>), AppError> {
    let created = CustomerRepository::new(state.store())
        .create(&body.customer, &body.agent_id)
        .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Customer detail plus full payment history.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDetailResponse {
    pub customer: Customer,
    pub payments: Vec<Payment>,
}

/// Fetch one customer and their payment history.
#[instrument(skip(state))]
pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<CustomerDetailResponse>, AppError> {
    let id = CustomerId::from(id);
    let customer = CustomerRepository::new(state.store())
        .get(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("customer {id}")))?;
    let payments = PaymentRepository::new(state.store()).for_customer(&id).await?;
    Ok(Json(CustomerDetailResponse { customer, payments }))
}

/// Apply a partial update to a customer's detail fields.
#[instrument(skip(state, patch))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<CustomerUpdate>,
) -> Result<StatusCode, AppError> {
    CustomerRepository::new(state.store())
        .update(&CustomerId::from(id), &patch)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
