//! Fulfillment proxy client implementation.

use std::sync::Arc;

use orderdesk_core::{Email, Order, Phone, normalize};
use secrecy::ExposeSecret;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::config::FulfillmentConfig;

use super::{FulfillmentError, envelope};

/// How much of an error response body to keep in error messages.
const ERROR_DETAIL_LIMIT: usize = 200;

/// Orders returned per customer search page. The portal shows a customer's
/// recent history; one page at this size covers it.
const SEARCH_PER_PAGE: &str = "100";

/// Customer identity to search orders by: email, or phone as fallback when
/// the customer registered without one.
#[derive(Debug, Clone)]
pub enum CustomerQuery {
    Email(Email),
    Phone(Phone),
}

/// Client for the fulfillment proxy's orders endpoint.
///
/// Cheaply cloneable; holds one `reqwest::Client` behind an `Arc`.
#[derive(Clone)]
pub struct FulfillmentClient {
    inner: Arc<FulfillmentClientInner>,
}

struct FulfillmentClientInner {
    client: reqwest::Client,
    base_url: String,
    api_token: String,
    store_id: String,
}

impl FulfillmentClient {
    /// Create a new fulfillment client.
    #[must_use]
    pub fn new(config: &FulfillmentConfig) -> Self {
        Self {
            inner: Arc::new(FulfillmentClientInner {
                client: reqwest::Client::new(),
                base_url: config.base_url.clone(),
                api_token: config.api_token.expose_secret().to_string(),
                store_id: config.store_id.clone(),
            }),
        }
    }

    /// Fetch one order by its customer-facing order number and normalize it.
    ///
    /// When `requester` is given, the order must belong to that email: the
    /// check compares against the order's customer, shipping, and delivery
    /// emails, case-insensitively. Admin callers pass `None` and skip the
    /// check.
    ///
    /// # Errors
    ///
    /// [`FulfillmentError::NotFound`] when no order matches,
    /// [`FulfillmentError::NotAuthorized`] when the requester check fails,
    /// and transport/status errors from the proxy.
    #[instrument(skip(self, requester))]
    pub async fn track_order(
        &self,
        order_number: &str,
        requester: Option<&Email>,
    ) -> Result<Order, FulfillmentError> {
        let order_number = order_number.trim();
        let payload = self
            .get_orders(&[
                ("store_id", self.inner.store_id.as_str()),
                ("order_number", order_number),
            ])
            .await?;

        let raw = envelope::unwrap_one(&payload)
            .ok_or_else(|| FulfillmentError::NotFound(order_number.to_string()))?;
        let order = normalize(raw);

        if let Some(email) = requester {
            verify_ownership(&order, order_number, email)?;
        }
        Ok(order)
    }

    /// Fetch all orders for one customer, normalized and sorted by creation
    /// time descending (most recent first).
    ///
    /// # Errors
    ///
    /// Transport/status errors from the proxy. An empty result is not an
    /// error.
    #[instrument(skip(self, query))]
    pub async fn find_orders_by_customer(
        &self,
        query: &CustomerQuery,
    ) -> Result<Vec<Order>, FulfillmentError> {
        // The API documents shipping_email as the email filter; phone wants
        // digits only, which the Phone type guarantees.
        let (filter_key, filter_value) = match query {
            CustomerQuery::Email(email) => ("shipping_email", email.as_str()),
            CustomerQuery::Phone(phone) => ("customer_phone", phone.as_str()),
        };
        let payload = self
            .get_orders(&[
                ("store_id", self.inner.store_id.as_str()),
                (filter_key, filter_value),
                ("per_page", SEARCH_PER_PAGE),
                ("page", "1"),
                ("sort", "desc"),
                ("sort_by", "created_at"),
            ])
            .await?;

        let mut orders: Vec<Order> = envelope::unwrap_many(&payload)
            .into_iter()
            .map(normalize)
            .collect();
        // Fetches may race and the proxy's own ordering is best-effort;
        // display order is most recent first.
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        debug!(count = orders.len(), "customer order search complete");
        Ok(orders)
    }

    /// Bearer-token GET against the proxy's orders endpoint.
    async fn get_orders(&self, params: &[(&str, &str)]) -> Result<Value, FulfillmentError> {
        let response = self
            .inner
            .client
            .get(format!("{}/api/orders", self.inner.base_url))
            .bearer_auth(&self.inner.api_token)
            .query(params)
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            let filter = params
                .iter()
                .find(|(key, _)| *key != "store_id")
                .map_or("", |(_, value)| *value);
            return Err(FulfillmentError::NotFound(filter.to_string()));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let detail: String = body.chars().take(ERROR_DETAIL_LIMIT).collect();
            return Err(FulfillmentError::Status {
                status: status.as_u16(),
                detail,
            });
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

/// Reject a tracked order when it carries an email and none of its emails
/// match the requester. Orders without any email pass: the search endpoints
/// scope those by customer instead.
fn verify_ownership(
    order: &Order,
    order_number: &str,
    requester: &Email,
) -> Result<(), FulfillmentError> {
    let order_email = order
        .customer_email
        .as_deref()
        .or(order.shipping_email.as_deref())
        .or(order.shipping_information.delivery_email.as_deref());

    match order_email {
        Some(email) if !requester.matches(email) => Err(FulfillmentError::NotAuthorized {
            order: order_number.to_string(),
            requester: requester.as_str().to_string(),
        }),
        _ => Ok(()),
    }
}
