//! Order lookup and search handlers.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};
use orderdesk_core::{Email, Order, Phone};
use serde::Deserialize;

use crate::error::{AppError, Result};
use crate::fulfillment::CustomerQuery;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/orders", get(search_orders))
        .route("/api/orders/{order_number}", get(track_order))
}

#[derive(Debug, Deserialize)]
struct TrackParams {
    /// Requester email; when present the order must belong to it.
    email: Option<String>,
}

/// `GET /api/orders/{order_number}` - fetch and normalize one order.
async fn track_order(
    State(state): State<AppState>,
    Path(order_number): Path<String>,
    Query(params): Query<TrackParams>,
) -> Result<Json<Order>> {
    let requester = params
        .email
        .as_deref()
        .map(Email::parse)
        .transpose()
        .map_err(|e| AppError::BadRequest(format!("invalid email: {e}")))?;

    let order = state
        .fulfillment()
        .track_order(&order_number, requester.as_ref())
        .await?;
    Ok(Json(order))
}

#[derive(Debug, Deserialize)]
struct SearchParams {
    email: Option<String>,
    phone: Option<String>,
}

/// `GET /api/orders?email=...` or `?phone=...` - a customer's orders,
/// most recent first.
async fn search_orders(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<Order>>> {
    // Email identifies the customer more reliably than phone; prefer it
    // when both arrive.
    let query = if let Some(email) = params.email.as_deref() {
        CustomerQuery::Email(
            Email::parse(email).map_err(|e| AppError::BadRequest(format!("invalid email: {e}")))?,
        )
    } else if let Some(phone) = params.phone.as_deref() {
        CustomerQuery::Phone(
            Phone::parse(phone).map_err(|e| AppError::BadRequest(format!("invalid phone: {e}")))?,
        )
    } else {
        return Err(AppError::BadRequest(
            "provide an email or phone query parameter".to_string(),
        ));
    };

    let orders = state.fulfillment().find_orders_by_customer(&query).await?;
    Ok(Json(orders))
}
