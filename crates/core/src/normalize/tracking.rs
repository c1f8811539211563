//! Tracking and shipping-info reconciliation.
//!
//! Tracking numbers and URLs arrive as the first entry of a
//! `delivery_tracking` list, or of `return_shipping_labels` when the
//! shipment is a return, or loose on the shipping-information object or the
//! order root. Everything merges onto any pre-existing shipping-information
//! object; fields we do not recognize survive in
//! [`TrackingInfo::extra`](crate::types::TrackingInfo).

use serde_json::Value;

use crate::types::TrackingInfo;

use super::raw::RawObject;

/// Shipping-information keys the normalizer owns; everything else on the
/// raw object is carried through untouched.
const RECOGNIZED_KEYS: &[&str] = &[
    "tracking_url",
    "tracking_number",
    "courier",
    "email",
    "estimated_time_arrival",
];

pub(crate) fn resolve_tracking(root: RawObject) -> TrackingInfo {
    let base = root.child("shipping_information");
    let entry = tracking_entry(root);

    let tracking_url = entry
        .display_string(&["tracking_url"])
        .or_else(|| base.display_string(&["tracking_url"]))
        .or_else(|| root.display_string(&["tracking_url"]))
        .or_else(|| first_string(root, "tracking_urls"));
    let tracking_number = entry
        .display_string(&["shipping_number"])
        .or_else(|| base.display_string(&["tracking_number"]))
        .or_else(|| root.display_string(&["tracking_number"]));
    let courier = root
        .child("shipping_method")
        .display_string(&["carrier_name"])
        .or_else(|| base.display_string(&["courier"]))
        .or_else(|| root.display_string(&["courier", "carrier_name"]));
    let delivery_email = root
        .child("shipping")
        .string(&["email"])
        .or_else(|| base.string(&["email"]))
        .or_else(|| root.string(&["shipping_email"]));
    let estimated_time_arrival = base
        .display_string(&["estimated_time_arrival"])
        .or_else(|| root.display_string(&["estimated_time_arrival"]));

    let extra = root
        .map(&["shipping_information"])
        .map(|map| {
            map.iter()
                .filter(|(key, _)| !RECOGNIZED_KEYS.contains(&key.as_str()))
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect()
        })
        .unwrap_or_default();

    TrackingInfo {
        tracking_url,
        tracking_number,
        courier,
        delivery_email,
        estimated_time_arrival,
        extra,
    }
}

/// First delivery-tracking entry, falling back to the first return label.
fn tracking_entry(root: RawObject<'_>) -> RawObject<'_> {
    root.array(&["delivery_tracking"])
        .and_then(|entries| entries.first())
        .or_else(|| {
            root.array(&["return_shipping_labels"])
                .and_then(|entries| entries.first())
        })
        .map_or_else(RawObject::missing, RawObject::new)
}

fn first_string(root: RawObject, key: &str) -> Option<String> {
    root.array(&[key])
        .and_then(|values| values.first())
        .and_then(Value::as_str)
        .map(str::to_owned)
}
