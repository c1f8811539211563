//! Fetch orders from the live fulfillment proxy.
//!
//! # Usage
//!
//! ```bash
//! orderdesk fetch --order-number R595531189
//! orderdesk fetch --order-number R595531189 --email cliente@example.com
//! orderdesk fetch --email cliente@example.com
//! orderdesk fetch --phone "(11) 98765-4321"
//! ```
//!
//! # Environment Variables
//!
//! - `FULFILLMENT_API_URL` - Base URL of the authenticated proxy
//! - `FULFILLMENT_API_TOKEN` - Bearer token
//! - `FULFILLMENT_STORE_ID` - Store identifier

use orderdesk_core::{Email, EmailError, Phone, PhoneError};
use orderdesk_portal::config::{ConfigError, FulfillmentConfig};
use orderdesk_portal::fulfillment::{CustomerQuery, FulfillmentClient, FulfillmentError};
use thiserror::Error;

/// Errors that can occur during a live fetch.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Proxy settings missing or invalid.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Proxy request failed.
    #[error(transparent)]
    Fulfillment(#[from] FulfillmentError),

    /// The provided email does not parse.
    #[error("invalid email: {0}")]
    Email(#[from] EmailError),

    /// The provided phone does not parse.
    #[error("invalid phone: {0}")]
    Phone(#[from] PhoneError),

    /// Neither an order number nor a customer filter was given.
    #[error("provide --order-number, --email, or --phone")]
    MissingFilter,

    /// Output serialization failed.
    #[error("failed to serialize output: {0}")]
    Json(#[from] serde_json::Error),
}

/// Run a live lookup and print canonical JSON.
///
/// With `--order-number`, tracks that order (the email, when given, must
/// match the order). Otherwise searches by email or phone.
///
/// # Errors
///
/// Configuration, validation, and proxy errors; see [`FetchError`].
pub async fn run(
    order_number: Option<&str>,
    email: Option<&str>,
    phone: Option<&str>,
) -> Result<(), FetchError> {
    let config = FulfillmentConfig::from_env()?;
    let client = FulfillmentClient::new(&config);

    let output = if let Some(order_number) = order_number {
        let requester = email.map(Email::parse).transpose()?;
        let order = client.track_order(order_number, requester.as_ref()).await?;
        serde_json::to_string_pretty(&order)?
    } else {
        let query = match (email, phone) {
            (Some(email), _) => CustomerQuery::Email(Email::parse(email)?),
            (None, Some(phone)) => CustomerQuery::Phone(Phone::parse(phone)?),
            (None, None) => return Err(FetchError::MissingFilter),
        };
        let orders = client.find_orders_by_customer(&query).await?;
        tracing::info!(count = orders.len(), "orders fetched");
        serde_json::to_string_pretty(&orders)?
    };

    print_output(&output);
    Ok(())
}

#[allow(clippy::print_stdout)]
fn print_output(output: &str) {
    println!("{output}");
}
