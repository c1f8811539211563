//! Response envelope unwrapping.
//!
//! The fulfillment API has wrapped order responses four different ways
//! across versions: `{"orders": [...]}`, `{"order": {...}}`,
//! `{"data": [...]}` (or `{"results": [...]}`), a bare array, and - for
//! single-order endpoints - the order object at the payload root. The
//! unwrappers peel any of these so the normalizer always receives one raw
//! order object.

use serde_json::Value;

/// Extract a list of raw orders from any known envelope shape.
///
/// Unknown shapes yield an empty list, never an error - the caller treats
/// that as "no orders found".
#[must_use]
pub fn unwrap_many(payload: &Value) -> Vec<&Value> {
    if let Some(entries) = payload.as_array() {
        return entries.iter().collect();
    }
    for key in ["orders", "data", "results"] {
        if let Some(entries) = payload.get(key).and_then(Value::as_array) {
            return entries.iter().collect();
        }
    }
    Vec::new()
}

/// Extract a single raw order: the first of a wrapped list, a wrapped
/// `order` object, or the payload root when it looks like an order itself.
#[must_use]
pub fn unwrap_one(payload: &Value) -> Option<&Value> {
    if let Some(first) = unwrap_many(payload).into_iter().next() {
        return Some(first);
    }
    if let Some(order) = payload.get("order").filter(|v| v.is_object()) {
        return Some(order);
    }
    if payload.get("id").is_some() || payload.get("order_number").is_some() {
        return Some(payload);
    }
    None
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unwrap_many_bare_array() {
        let payload = json!([{"id": 1}, {"id": 2}]);
        assert_eq!(unwrap_many(&payload).len(), 2);
    }

    #[test]
    fn test_unwrap_many_wrapped_keys() {
        for key in ["orders", "data", "results"] {
            let payload = json!({key: [{"id": 1}]});
            assert_eq!(unwrap_many(&payload).len(), 1, "key {key}");
        }
    }

    #[test]
    fn test_unwrap_many_unknown_shape_is_empty() {
        assert!(unwrap_many(&json!({"message": "no results"})).is_empty());
        assert!(unwrap_many(&json!("text")).is_empty());
    }

    #[test]
    fn test_unwrap_one_prefers_orders_list() {
        let payload = json!({"orders": [{"id": 1}, {"id": 2}], "order": {"id": 3}});
        assert_eq!(unwrap_one(&payload).unwrap()["id"], json!(1));
    }

    #[test]
    fn test_unwrap_one_wrapped_order_object() {
        let payload = json!({"order": {"id": 3}});
        assert_eq!(unwrap_one(&payload).unwrap()["id"], json!(3));
    }

    #[test]
    fn test_unwrap_one_payload_root() {
        let payload = json!({"order_number": "R1", "status": "shipped"});
        assert_eq!(unwrap_one(&payload).unwrap()["order_number"], json!("R1"));
    }

    #[test]
    fn test_unwrap_one_rejects_empty_shapes() {
        assert!(unwrap_one(&json!({"orders": []})).is_none());
        assert!(unwrap_one(&json!({"message": "nothing"})).is_none());
    }
}
