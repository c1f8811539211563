//! The order-data normalization engine.
//!
//! The fulfillment API returns order payloads in several historical shapes:
//! field names, address formats, product-list representations, and date
//! encodings all vary by API version and integration path. [`normalize`]
//! maps any of them onto one canonical [`Order`] used by everything
//! downstream - order search rendering, ticket linkage, chatbot responses.
//!
//! The transform is a total, pure, single-pass function: it never fails and
//! never panics, whatever the input. Each field group degrades to absent
//! independently when its source data is missing or malformed, while the
//! rest of the order still normalizes. Suspiciously empty results emit
//! [`NormalizeDiagnostic`]s through an injected [`DiagnosticSink`].
//!
//! ```
//! use serde_json::json;
//!
//! let order = orderdesk_core::normalize(&json!({
//!     "order_number": "R123",
//!     "order_lines": [{"sku": "A1", "quantity": 2, "price_per_item": "10.50"}],
//!     "created_at": 1_700_000_000,
//! }));
//! assert_eq!(order.items_summary, vec!["2x A1"]);
//! ```

mod address;
mod dates;
mod diagnostics;
mod items;
mod raw;
mod tracking;

pub use diagnostics::{DiagnosticSink, MemorySink, NormalizeDiagnostic, TracingSink};

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::types::{Order, PickupLocation};

use raw::RawObject;

/// Known aliases per date field, in resolution order.
const CREATED_AT: &[&str] = &["created_at", "createdAt", "created", "date_created"];
const UPDATED_AT: &[&str] = &["updated_at", "updatedAt", "updated", "date_modified"];
const SHIPPED_AT: &[&str] = &["shipping_date", "shipped_at", "shipment_date"];
const DELIVERED_AT: &[&str] = &["delivered_at", "delivery_date", "received_at"];

/// Normalize one raw order payload with the default configuration.
///
/// Shorthand for [`Normalizer::default`] with the tracing diagnostic sink;
/// see [`Normalizer`] to override the default country or capture
/// diagnostics.
#[must_use]
pub fn normalize(raw: &Value) -> Order {
    Normalizer::default().normalize(raw)
}

/// Configurable order normalizer.
///
/// The only knob is the default country stamped onto addresses that arrive
/// without one. The source system served a single market and hard-coded
/// `"Brasil"`; that stays the out-of-the-box default, while deployments in
/// other locales override it:
///
/// ```
/// use orderdesk_core::Normalizer;
/// use serde_json::json;
///
/// let normalizer = Normalizer::new().with_default_country("México");
/// let order = normalizer.normalize(&json!({"shipping": {"city": "CDMX"}}));
/// assert_eq!(order.shipping_address.unwrap().country, "México");
/// ```
#[derive(Debug, Clone)]
pub struct Normalizer {
    default_country: String,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self {
            default_country: "Brasil".to_owned(),
        }
    }
}

impl Normalizer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Country stamped onto addresses whose source carries none.
    #[must_use]
    pub fn with_default_country(mut self, country: impl Into<String>) -> Self {
        self.default_country = country.into();
        self
    }

    /// Normalize with diagnostics going to the default tracing sink.
    #[must_use]
    pub fn normalize(&self, raw: &Value) -> Order {
        self.normalize_with(raw, &TracingSink)
    }

    /// Normalize, emitting diagnostics through `sink`.
    #[must_use]
    pub fn normalize_with(&self, raw: &Value, sink: &dyn DiagnosticSink) -> Order {
        self.normalize_at(raw, sink, Utc::now())
    }

    /// Normalize against a fixed reference time.
    ///
    /// `reference_time` is what `created_at` falls back to when the source
    /// value is missing or unparsable; the public entry points pass
    /// `Utc::now()`. Everything else is deterministic in the input.
    #[must_use]
    pub fn normalize_at(
        &self,
        raw: &Value,
        sink: &dyn DiagnosticSink,
        reference_time: DateTime<Utc>,
    ) -> Order {
        let root = RawObject::new(raw);

        let items = items::resolve_items(root);
        let order = Order {
            id: root.display_string(&["id"]).unwrap_or_default(),
            order_number: root
                .display_string(&["order_number", "orderNumber", "number"])
                .unwrap_or_default(),
            status: root.string(&["status", "order_status"]).unwrap_or_default(),
            created_at: root
                .value(CREATED_AT)
                .and_then(dates::coerce_datetime)
                .unwrap_or(reference_time),
            updated_at: root.value(UPDATED_AT).and_then(dates::coerce_datetime),
            shipped_at: root.value(SHIPPED_AT).and_then(dates::coerce_datetime),
            delivered_at: root.value(DELIVERED_AT).and_then(dates::coerce_datetime),
            items: items.items,
            items_summary: items.summary,
            shipping_address: address::resolve_shipping(root, &self.default_country),
            billing_address: address::resolve_billing(root, &self.default_country),
            pickup_location: resolve_pickup(root),
            shipping_information: tracking::resolve_tracking(root),
            total_amount: root.decimal(&["total_amount", "total_price"]),
            currency: root.string(&["currency", "currency_code"]),
            payment_method: root.string(&["payment_method", "paymentMethod"]),
            customer_email: root.string(&["customer_email", "customerEmail"]),
            shipping_email: root.string(&["shipping_email", "shippingEmail"]),
            customer_phone: root.display_string(&["customer_phone", "customerPhone"]),
            receipt_url: root.string(&["receipt_url", "receipt_proof_url"]),
            receipt_image: root.string(&["receipt_image", "receipt_proof_image", "receipt_base64"]),
        };

        if order.items.is_empty() && order.items_summary.is_empty() {
            sink.emit(NormalizeDiagnostic::MissingItems {
                order_ref: order.reference().to_owned(),
                had_order_lines: items.had_order_lines,
                had_products: items.had_products,
                had_items: items.had_items,
                had_items_summary: items.had_items_summary,
            });
        }
        if order.shipping_address.is_none() && order.pickup_location.is_none() {
            sink.emit(NormalizeDiagnostic::MissingAddress {
                order_ref: order.reference().to_owned(),
                checked: address::SHIPPING_CHECKED.to_vec(),
            });
        }

        order
    }
}

/// Pickup point for click-and-collect orders. Present only when the raw
/// object carries at least one recognizable field.
fn resolve_pickup(root: RawObject) -> Option<PickupLocation> {
    let obj = root
        .map(&["pickup_location", "pickupLocation"])
        .map(RawObject::from_map)?;
    let pickup = PickupLocation {
        service_name: obj.display_string(&["service_name"]),
        service_code: obj.display_string(&["service_code"]),
        source: obj.display_string(&["source", "address"]),
        description: obj.display_string(&["description"]),
        distance: obj.display_string(&["distance"]),
    };
    let has_content = [
        &pickup.service_name,
        &pickup.service_code,
        &pickup.source,
        &pickup.description,
    ]
    .into_iter()
    .any(Option::is_some);
    has_content.then_some(pickup)
}
