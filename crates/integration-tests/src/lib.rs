//! Integration tests for Orderdesk.
//!
//! # Running Tests
//!
//! ```bash
//! # Normalizer property tests run everywhere
//! cargo test -p orderdesk-integration-tests
//!
//! # Portal HTTP tests need a running portal plus proxy credentials
//! cargo run -p orderdesk-portal &
//! cargo test -p orderdesk-integration-tests -- --ignored
//! ```
//!
//! # Test Categories
//!
//! - `normalizer_properties` - Cross-crate properties of the normalization
//!   engine (totality, idempotence, date validity, item totals, address
//!   completeness-or-absence) plus concrete payload scenarios
//! - `portal_orders` - HTTP tests against a running portal, `#[ignore]`d
//!   because they require the live fulfillment proxy
