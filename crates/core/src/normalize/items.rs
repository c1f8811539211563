//! Line-item reconciliation.
//!
//! Two product-list representations exist in the wild. The full structure,
//! `order_lines`, wraps each line around a nested `product` object carrying
//! its own name/sku/price; the flatter `products`/`items` lists put those
//! fields on the entry itself. `order_lines` wins when present. A supplied
//! non-empty `items_summary` wins over a derived one, but an empty supplied
//! summary never shadows items we did extract.

use rust_decimal::Decimal;
use serde_json::Value;

use crate::types::OrderItem;

use super::raw::{RawObject, coerce_decimal, coerce_quantity, coerce_string};

/// Fallback display name when a line carries neither name nor sku, in the
/// deployment language of the source system.
const ITEM_PLACEHOLDER: &str = "Produto";

/// Resolved items plus the source-presence flags diagnostics report.
pub(crate) struct ItemsOutcome {
    pub items: Vec<OrderItem>,
    pub summary: Vec<String>,
    pub had_order_lines: bool,
    pub had_products: bool,
    pub had_items: bool,
    pub had_items_summary: bool,
}

pub(crate) fn resolve_items(root: RawObject) -> ItemsOutcome {
    let had_order_lines = root.has("order_lines");
    let mut items = Vec::new();

    // First present source wins even when it is not an array; a malformed
    // winner suppresses the others rather than falling through.
    if let Some(source) = root.value(&["order_lines", "products", "items"])
        && let Some(entries) = source.as_array()
    {
        items = if had_order_lines {
            entries.iter().map(convert_order_line).collect()
        } else {
            entries.iter().map(convert_flat_item).collect()
        };
    }

    let supplied_summary = root.array(&["items_summary"]).map(|entries| {
        entries
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_owned)
            .collect::<Vec<_>>()
    });
    let had_items_summary = supplied_summary.is_some();

    let summary = match supplied_summary {
        Some(supplied) if !supplied.is_empty() => supplied,
        _ => derive_summary(&items),
    };

    ItemsOutcome {
        items,
        summary,
        had_order_lines,
        had_products: root.has("products"),
        had_items: root.has("items"),
        had_items_summary,
    }
}

/// Convert one entry of the full `order_lines` structure.
fn convert_order_line(entry: &Value) -> OrderItem {
    let line = RawObject::new(entry);
    let product = line.child("product");

    let quantity = coerce_quantity(line.value(&["quantity"]));
    // A per-line price override wins over the product's base price; once an
    // override is present, a failed coercion stays absent.
    let unit_price = match line.value(&["price_per_item"]) {
        Some(value) => coerce_decimal(value),
        None => product.decimal(&["price"]),
    };

    let sku = line
        .display_string(&["sku"])
        .or_else(|| product.display_string(&["sku"]))
        .or_else(|| first_product_code(product))
        .unwrap_or_default();
    let name = line
        .string(&["name"])
        .or_else(|| product.string(&["name", "billing_name"]))
        .or_else(|| line.display_string(&["sku"]))
        .unwrap_or_else(|| ITEM_PLACEHOLDER.to_owned());

    OrderItem {
        sku,
        name,
        quantity,
        unit_price,
        line_total: line_total(unit_price, quantity, None),
    }
}

/// Convert one entry of the flatter `products`/`items` lists.
fn convert_flat_item(entry: &Value) -> OrderItem {
    let item = RawObject::new(entry);

    let quantity = coerce_quantity(item.value(&["quantity"]));
    let unit_price = item.decimal(&["price", "unit_price", "cost"]);
    let supplied_total = item.value(&["total", "line_total"]).map(coerce_decimal);

    let sku = item.display_string(&["sku", "SKU"]).unwrap_or_default();
    let name = item
        .string(&["name", "product_name", "title"])
        .or_else(|| item.display_string(&["sku"]))
        .unwrap_or_else(|| ITEM_PLACEHOLDER.to_owned());

    OrderItem {
        sku,
        name,
        quantity,
        unit_price,
        line_total: line_total(unit_price, quantity, supplied_total),
    }
}

/// A directly supplied total wins, even when its coercion failed; otherwise
/// compute `unit_price * quantity` when the unit price is known.
fn line_total(
    unit_price: Option<Decimal>,
    quantity: u32,
    supplied: Option<Option<Decimal>>,
) -> Option<Decimal> {
    match supplied {
        Some(total) => total,
        None => unit_price.map(|price| price * Decimal::from(quantity)),
    }
}

/// Nested `product_codes[0].sku`, an API-version oddity kept for parity.
fn first_product_code(product: RawObject) -> Option<String> {
    product
        .array(&["product_codes"])
        .and_then(|codes| codes.first())
        .map(RawObject::new)
        .and_then(|code| code.value(&["sku"]))
        .and_then(coerce_string)
}

fn derive_summary(items: &[OrderItem]) -> Vec<String> {
    items
        .iter()
        .map(|item| {
            let name = if item.name.is_empty() {
                if item.sku.is_empty() {
                    ITEM_PLACEHOLDER
                } else {
                    &item.sku
                }
            } else {
                &item.name
            };
            format!("{}x {}", item.quantity, name)
        })
        .collect()
}
