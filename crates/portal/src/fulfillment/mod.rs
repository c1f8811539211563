//! Fulfillment API client.
//!
//! # Architecture
//!
//! Orders live in an external fulfillment system reached through an
//! authenticated reverse proxy: a bearer-token GET against `/api/orders`,
//! filterable by store id plus either an order number or a customer
//! email/phone. The proxy forwards responses verbatim, so payloads arrive
//! in whatever envelope and field dialect the upstream API version used -
//! [`envelope`] unwraps the envelope, and every raw order goes through
//! `orderdesk_core::normalize` before leaving this module.
//!
//! No local sync and no caching: the fulfillment system is the source of
//! truth and every lookup re-fetches.

mod client;
pub mod envelope;

pub use client::{CustomerQuery, FulfillmentClient};

use thiserror::Error;

/// Errors that can occur when talking to the fulfillment proxy.
#[derive(Debug, Error)]
pub enum FulfillmentError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The proxy answered with a non-success status.
    #[error("fulfillment API returned status {status}: {detail}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, truncated.
        detail: String,
    },

    /// Response body was not valid JSON.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// No order under the requested number.
    #[error("Order not found: {0}")]
    NotFound(String),

    /// The order exists but belongs to a different customer.
    #[error("Order {order} is not associated with {requester}")]
    NotAuthorized {
        /// Order number that was requested.
        order: String,
        /// Email the requester identified with.
        requester: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = FulfillmentError::NotFound("R123".to_string());
        assert_eq!(err.to_string(), "Order not found: R123");

        let err = FulfillmentError::Status {
            status: 503,
            detail: "upstream unavailable".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "fulfillment API returned status 503: upstream unavailable"
        );

        let err = FulfillmentError::NotAuthorized {
            order: "R123".to_string(),
            requester: "a@b.c".to_string(),
        };
        assert_eq!(err.to_string(), "Order R123 is not associated with a@b.c");
    }
}
