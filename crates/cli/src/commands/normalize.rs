//! Normalize a captured payload file.
//!
//! # Usage
//!
//! ```bash
//! orderdesk normalize payload.json
//! cat payload.json | orderdesk normalize
//! orderdesk normalize payload.json --country "México"
//! ```
//!
//! The input may be one raw order object or a full API response envelope;
//! envelopes are unwrapped first. Canonical JSON goes to stdout, normalizer
//! diagnostics go to stderr through tracing.

use std::io::Read;
use std::path::Path;

use orderdesk_core::{Normalizer, Order};
use orderdesk_portal::fulfillment::envelope;
use serde_json::Value;
use thiserror::Error;

/// Errors that can occur while normalizing a payload file.
#[derive(Debug, Error)]
pub enum NormalizeError {
    /// Could not read the input.
    #[error("failed to read payload: {0}")]
    Io(#[from] std::io::Error),

    /// Input was not valid JSON.
    #[error("payload is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Normalize `file` (or stdin) and print canonical JSON.
///
/// # Errors
///
/// Fails only on unreadable input or malformed JSON; the normalization
/// itself is total.
pub fn run(file: Option<&Path>, country: &str) -> Result<(), NormalizeError> {
    let payload = read_payload(file)?;
    let normalizer = Normalizer::new().with_default_country(country);

    let orders: Vec<Order> = raw_orders(&payload)
        .into_iter()
        .map(|raw| normalizer.normalize(raw))
        .collect();

    print_orders(&orders)?;
    Ok(())
}

/// The raw order objects inside `payload`: an unwrapped envelope, or the
/// payload itself when it is not an envelope (normalization is total, so a
/// degenerate payload still yields output plus diagnostics).
fn raw_orders(payload: &Value) -> Vec<&Value> {
    let many = envelope::unwrap_many(payload);
    if !many.is_empty() {
        return many;
    }
    match envelope::unwrap_one(payload) {
        Some(raw) => vec![raw],
        None => vec![payload],
    }
}

fn read_payload(file: Option<&Path>) -> Result<Value, NormalizeError> {
    let text = match file {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };
    Ok(serde_json::from_str(&text)?)
}

#[allow(clippy::print_stdout)]
fn print_orders(orders: &[Order]) -> Result<(), NormalizeError> {
    // A single order prints as an object, matching what callers of the
    // portal's track endpoint see
    let output = match orders {
        [single] => serde_json::to_string_pretty(single)?,
        many => serde_json::to_string_pretty(many)?,
    };
    println!("{output}");
    Ok(())
}
