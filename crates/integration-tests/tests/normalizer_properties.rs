//! Properties of the order normalization engine.
//!
//! These run against the public API of `orderdesk-core`, the way the portal
//! and CLI consume it: every raw payload, however degenerate, must yield a
//! canonical order whose invariants hold.

#![allow(clippy::unwrap_used)]

use chrono::{DateTime, TimeZone, Utc};
use orderdesk_core::{MemorySink, NormalizeDiagnostic, Normalizer, Order};
use rust_decimal::Decimal;
use serde_json::{Value, json};

fn reference_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
}

/// Normalize with a fixed reference time so assertions are deterministic.
fn normalize(raw: &Value) -> Order {
    Normalizer::new().normalize_at(raw, &MemorySink::new(), reference_time())
}

/// A representative battery of payloads across every dialect the engine
/// understands, plus degenerate shapes.
fn payload_battery() -> Vec<Value> {
    vec![
        json!({}),
        json!(null),
        json!("not an object"),
        json!([{"id": 1}]),
        json!({"id": 77, "order_number": "R77", "status": "processing"}),
        json!({
            "order_lines": [{
                "sku": "A1",
                "quantity": 2,
                "price_per_item": "10.50",
                "product": {"name": "Widget"},
            }],
            "created_at": 1_700_000_000,
        }),
        json!({
            "products": [{"sku": "B2", "name": "Gadget", "quantity": 1, "cost": 9.9}],
            "updated_at": "2024-02-02T02:02:02Z",
        }),
        json!({
            "shipping": {
                "address_1": "Rua A, 123",
                "address_2": "Centro",
                "city": "SP",
                "state": "SP",
                "zip_code": "01000-000",
            },
            "billing": {"address1": "Av. B, 9", "city": "SP"},
        }),
        json!({
            "order_number": "R1",
            "created_at": "not-a-date",
            "shipping_date": 1_700_000_000,
            "delivery_tracking": [{"shipping_number": "BR1", "tracking_url": "https://t/1"}],
            "shipping_method": {"carrier_name": "Correios"},
            "total_amount": "199.90",
            "items_summary": ["1x Widget"],
        }),
        json!({
            "pickup_location": {"service_name": "Ponto Centro", "service_code": "PC1"},
            "items": [{"sku": "C3", "quantity": 2, "price": "bogus"}],
        }),
    ]
}

// ============================================================================
// Totality
// ============================================================================

#[test]
fn normalizes_every_battery_payload_without_panicking() {
    for raw in payload_battery() {
        let _ = normalize(&raw);
    }
}

#[test]
fn normalizes_deep_junk_fields() {
    let raw = json!({
        "order_lines": [null, 42, "junk", {"product": null}, {"product": "junk"}],
        "shipping": {"address_1": null},
        "shipping_information": "corrupted",
        "delivery_tracking": [null],
        "pickup_location": [],
        "total_amount": {"amount": 10},
    });
    let order = normalize(&raw);
    // every junk order line still yields a placeholder item
    assert_eq!(order.items.len(), 5);
    assert_eq!(order.total_amount, None);
    assert_eq!(order.shipping_address, None);
}

// ============================================================================
// Idempotence on the canonical shape
// ============================================================================

#[test]
fn renormalizing_canonical_output_is_stable() {
    for raw in payload_battery() {
        let first = normalize(&raw);
        let reencoded = serde_json::to_value(&first).unwrap();
        let second = normalize(&reencoded);
        assert_eq!(first, second, "not idempotent for payload: {raw}");
    }
}

// ============================================================================
// Date validity
// ============================================================================

#[test]
fn every_serialized_date_field_parses_as_rfc3339() {
    for raw in payload_battery() {
        let order = serde_json::to_value(normalize(&raw)).unwrap();
        for field in ["created_at", "updated_at", "shipped_at", "delivered_at"] {
            if let Some(value) = order.get(field) {
                let text = value.as_str().expect("date fields serialize as strings");
                assert!(
                    DateTime::parse_from_rfc3339(text).is_ok(),
                    "invalid {field}: {text}"
                );
            }
        }
    }
}

#[test]
fn unparsable_dates_never_pass_through() {
    let order = serde_json::to_value(normalize(&json!({
        "updated_at": "last tuesday",
        "shipping_date": "soon",
        "delivered_at": {},
    })))
    .unwrap();
    assert!(order.get("updated_at").is_none());
    assert!(order.get("shipped_at").is_none());
    assert!(order.get("delivered_at").is_none());
}

// ============================================================================
// Item total consistency
// ============================================================================

#[test]
fn computed_line_totals_equal_price_times_quantity() {
    for raw in payload_battery() {
        for item in normalize(&raw).items {
            if let (Some(price), Some(total)) = (item.unit_price, item.line_total) {
                assert_eq!(
                    total,
                    price * Decimal::from(item.quantity),
                    "item {} in payload {raw}",
                    item.sku
                );
            }
        }
    }
}

// ============================================================================
// Address completeness-or-absence
// ============================================================================

#[test]
fn addresses_are_absent_or_identifying() {
    for raw in payload_battery() {
        let order = normalize(&raw);
        for address in [order.shipping_address, order.billing_address]
            .into_iter()
            .flatten()
        {
            assert!(
                address.has_identifying_field(),
                "half-populated address from payload {raw}"
            );
        }
    }
}

#[test]
fn contact_only_shipping_object_yields_no_address() {
    let order = normalize(&json!({
        "shipping": {"first_name": "Ana", "last_name": "Lima", "email": "ana@example.com"}
    }));
    assert_eq!(order.shipping_address, None);
}

// ============================================================================
// Concrete scenarios
// ============================================================================

#[test]
fn scenario_order_line_with_epoch_seconds() {
    let order = normalize(&json!({
        "order_lines": [{
            "sku": "A1",
            "quantity": 2,
            "price_per_item": "10.50",
            "product": {"name": "Widget"},
        }],
        "created_at": 1_700_000_000,
    }));

    let item = order.items.first().unwrap();
    assert_eq!(item.sku, "A1");
    assert_eq!(item.name, "Widget");
    assert_eq!(item.quantity, 2);
    assert_eq!(item.unit_price, Some(Decimal::new(1050, 2)));
    assert_eq!(item.line_total, Some(Decimal::new(2100, 2)));
    // epoch seconds scaled to millis before parsing
    assert_eq!(order.created_at.timestamp(), 1_700_000_000);
}

#[test]
fn scenario_combined_address_line_split() {
    let order = normalize(&json!({
        "shipping": {
            "address_1": "Rua A, 123",
            "address_2": "Centro",
            "city": "SP",
            "state": "SP",
            "zip_code": "01000-000",
        }
    }));

    let address = order.shipping_address.unwrap();
    assert_eq!(address.street.as_deref(), Some("Rua A"));
    assert_eq!(address.street_number.as_deref(), Some("123"));
    assert_eq!(address.neighborhood.as_deref(), Some("Centro"));
    assert_eq!(address.city.as_deref(), Some("SP"));
    assert_eq!(address.state.as_deref(), Some("SP"));
    assert_eq!(address.zip_code.as_deref(), Some("01000-000"));
    assert_eq!(address.country, "Brasil");
}

#[test]
fn scenario_invalid_created_at_falls_back_to_reference_time() {
    let order = normalize(&json!({"created_at": "not-a-date"}));
    assert_eq!(order.created_at, reference_time());
}

#[test]
fn scenario_empty_object_degrades_with_diagnostics() {
    let sink = MemorySink::new();
    let order = Normalizer::new().normalize_at(&json!({}), &sink, reference_time());

    assert!(order.items.is_empty());
    assert!(order.items_summary.is_empty());
    assert_eq!(order.shipping_address, None);
    assert_eq!(order.pickup_location, None);

    let events = sink.take();
    assert!(
        events
            .iter()
            .any(|e| matches!(e, NormalizeDiagnostic::MissingItems { .. }))
    );
    assert!(
        events
            .iter()
            .any(|e| matches!(e, NormalizeDiagnostic::MissingAddress { .. }))
    );
}

#[test]
fn scenario_string_total_amount_coerced() {
    let order = normalize(&json!({"total_amount": "199.90"}));
    assert_eq!(order.total_amount, Some(Decimal::new(19990, 2)));
}

#[test]
fn scenario_summary_derived_over_empty_supplied_summary() {
    let order = normalize(&json!({
        "order_lines": [{"sku": "A1", "quantity": 2, "product": {"name": "Widget"}}],
        "items_summary": [],
    }));
    assert_eq!(order.items_summary, vec!["2x Widget"]);
}

// ============================================================================
// Envelope unwrapping composed with normalization
// ============================================================================

#[test]
fn every_envelope_shape_feeds_the_normalizer() {
    use orderdesk_portal::fulfillment::envelope;

    let raw = json!({"order_number": "R9", "status": "shipped"});
    let envelopes = vec![
        json!({"orders": [raw.clone()]}),
        json!({"order": raw.clone()}),
        json!({"data": [raw.clone()]}),
        json!({"results": [raw.clone()]}),
        json!([raw.clone()]),
        raw.clone(),
    ];

    for payload in envelopes {
        let unwrapped = envelope::unwrap_one(&payload).expect("envelope should unwrap");
        let order = normalize(unwrapped);
        assert_eq!(order.order_number, "R9", "payload: {payload}");
        assert_eq!(order.status, "shipped");
    }
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn default_country_is_configurable() {
    let normalizer = Normalizer::new().with_default_country("México");
    let order = normalizer.normalize_at(
        &json!({"shipping": {"city": "CDMX"}}),
        &MemorySink::new(),
        reference_time(),
    );
    assert_eq!(order.shipping_address.unwrap().country, "México");
}
