//! The canonical order model.
//!
//! Every downstream consumer (order search results, ticket linkage, chatbot
//! responses) works against [`Order`], never against a raw fulfillment-API
//! payload. An `Order` is a pure projection: it is built fresh on every fetch
//! by [`crate::normalize`], never persisted, and carries no identity beyond
//! mirroring the source order's id and order number.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A normalized customer order.
///
/// Field invariants are established by the normalizer:
/// - date fields are always valid timestamps or absent, never garbage strings
/// - `items_summary` is derived from `items` when the source did not supply it
/// - addresses are either absent or carry at least one identifying field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Source order id, verbatim.
    #[serde(default)]
    pub id: String,
    /// Customer-facing order number (e.g. "R595531189").
    #[serde(default)]
    pub order_number: String,
    /// Free-text status code. In practice one of the small set mapped by
    /// [`crate::types::OrderStatus`], but not enforced at this layer.
    #[serde(default)]
    pub status: String,

    /// Creation time. Always present: when the source value is missing or
    /// unparsable the normalizer falls back to the time of normalization,
    /// since display logic requires some creation time.
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipped_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivered_at: Option<DateTime<Utc>>,

    /// Line items in source order.
    #[serde(default)]
    pub items: Vec<OrderItem>,
    /// Human-readable item lines, `"{quantity}x {name}"`.
    #[serde(default)]
    pub items_summary: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping_address: Option<Address>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billing_address: Option<Address>,
    /// Click-and-collect pickup point. An order meaningfully has either a
    /// pickup location or a shipping address for delivery-method display,
    /// not both.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pickup_location: Option<PickupLocation>,

    /// Tracking data merged from the delivery-tracking sources.
    #[serde(default)]
    pub shipping_information: TrackingInfo,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_amount: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_phone: Option<String>,

    /// Proof-of-delivery document URL, when the fulfillment API exposes one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receipt_url: Option<String>,
    /// Proof-of-delivery image (URL or base64), when exposed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receipt_image: Option<String>,
}

impl Order {
    /// Best identifier for log/diagnostic output: the id, falling back to
    /// the order number.
    #[must_use]
    pub fn reference(&self) -> &str {
        if self.id.is_empty() {
            &self.order_number
        } else {
            &self.id
        }
    }
}

/// One product entry within an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    #[serde(default)]
    pub sku: String,
    #[serde(default)]
    pub name: String,
    pub quantity: u32,
    /// Price per unit. Serialized as `price`, the canonical wire name.
    #[serde(rename = "price", default, skip_serializing_if = "Option::is_none")]
    pub unit_price: Option<Decimal>,
    /// Line total. Computed as `unit_price * quantity` when the source did
    /// not supply one directly. Serialized as `total`.
    #[serde(rename = "total", default, skip_serializing_if = "Option::is_none")]
    pub line_total: Option<Decimal>,
}

/// Canonical postal address.
///
/// Present only when the source payload carried at least one recognizable
/// address field; the normalizer never emits an all-empty address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub neighborhood: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zip_code: Option<String>,
    /// Never empty: defaults to the normalizer's configured country when the
    /// source address carries none.
    pub country: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub complement: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

impl Address {
    /// True when at least one identifying field (anything except the
    /// defaulted country) is populated.
    #[must_use]
    pub fn has_identifying_field(&self) -> bool {
        [
            &self.street,
            &self.street_number,
            &self.neighborhood,
            &self.city,
            &self.state,
            &self.zip_code,
            &self.complement,
            &self.reference,
        ]
        .into_iter()
        .any(|f| f.as_deref().is_some_and(|s| !s.is_empty()))
    }
}

/// Click-and-collect pickup point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickupLocation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_code: Option<String>,
    /// Street address of the pickup point.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Distance from the customer, e.g. "1.2 km".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<String>,
}

/// Shipment tracking details.
///
/// The `extra` map preserves fields of the raw shipping-information object
/// that the normalizer does not explicitly recognize, so nothing the
/// fulfillment API reports is silently dropped.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TrackingInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracking_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracking_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub courier: Option<String>,
    /// Delivery contact email. Canonical wire name is `email`.
    #[serde(rename = "email", default, skip_serializing_if = "Option::is_none")]
    pub delivery_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_time_arrival: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn minimal_order() -> Order {
        Order {
            id: "123".to_string(),
            order_number: "R123".to_string(),
            status: "shipped".to_string(),
            created_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
            updated_at: None,
            shipped_at: None,
            delivered_at: None,
            items: vec![],
            items_summary: vec![],
            shipping_address: None,
            billing_address: None,
            pickup_location: None,
            shipping_information: TrackingInfo::default(),
            total_amount: None,
            currency: None,
            payment_method: None,
            customer_email: None,
            shipping_email: None,
            customer_phone: None,
            receipt_url: None,
            receipt_image: None,
        }
    }

    #[test]
    fn test_reference_prefers_id() {
        let order = minimal_order();
        assert_eq!(order.reference(), "123");
    }

    #[test]
    fn test_reference_falls_back_to_order_number() {
        let mut order = minimal_order();
        order.id = String::new();
        assert_eq!(order.reference(), "R123");
    }

    #[test]
    fn test_absent_fields_not_serialized() {
        let order = minimal_order();
        let json = serde_json::to_value(&order).unwrap();
        let obj = json.as_object().unwrap();
        assert!(!obj.contains_key("shipping_address"));
        assert!(!obj.contains_key("total_amount"));
        assert!(obj.contains_key("created_at"));
        // items always serialize, even when empty
        assert_eq!(json["items"], serde_json::json!([]));
    }

    #[test]
    fn test_item_wire_names() {
        let item = OrderItem {
            sku: "A1".to_string(),
            name: "Widget".to_string(),
            quantity: 2,
            unit_price: Some(Decimal::new(1050, 2)),
            line_total: Some(Decimal::new(2100, 2)),
        };
        let json = serde_json::to_value(&item).unwrap();
        assert!(json.get("price").is_some());
        assert!(json.get("total").is_some());
        assert!(json.get("unit_price").is_none());
    }

    #[test]
    fn test_tracking_extra_round_trip() {
        let json = serde_json::json!({
            "tracking_number": "BR1",
            "service_id": 42,
        });
        let info: TrackingInfo = serde_json::from_value(json.clone()).unwrap();
        assert_eq!(info.tracking_number.as_deref(), Some("BR1"));
        assert_eq!(info.extra.get("service_id"), Some(&serde_json::json!(42)));
        assert_eq!(serde_json::to_value(&info).unwrap(), json);
    }

    #[test]
    fn test_address_has_identifying_field() {
        let empty = Address {
            street: None,
            street_number: None,
            neighborhood: None,
            city: None,
            state: None,
            zip_code: None,
            country: "Brasil".to_string(),
            complement: None,
            reference: None,
        };
        assert!(!empty.has_identifying_field());

        let with_city = Address {
            city: Some("SP".to_string()),
            ..empty
        };
        assert!(with_city.has_identifying_field());
    }
}
