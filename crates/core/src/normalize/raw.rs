//! Ordered alias lookup over raw JSON objects.
//!
//! The fulfillment API has shipped the same logical field under several
//! names across integrations and API versions. Rather than scattering
//! optional-chaining through the normalizer, every lookup is an explicit
//! ordered alias list evaluated against the raw object: the first present,
//! non-empty value wins. This keeps the dialect detection auditable and
//! testable on its own.

use rust_decimal::Decimal;
use serde_json::{Map, Value};

/// Read-only accessor over one raw JSON object.
///
/// Wraps `Option<&Map>` so that non-object values (null, strings, arrays)
/// behave as an object with no fields - lookups simply miss. That is what
/// makes the normalizer total over arbitrary input.
#[derive(Debug, Clone, Copy)]
pub(crate) struct RawObject<'a> {
    fields: Option<&'a Map<String, Value>>,
}

impl<'a> RawObject<'a> {
    pub fn new(value: &'a Value) -> Self {
        Self {
            fields: value.as_object(),
        }
    }

    pub const fn from_map(map: &'a Map<String, Value>) -> Self {
        Self { fields: Some(map) }
    }

    pub const fn missing() -> Self {
        Self { fields: None }
    }

    /// First value under `aliases` that is present and non-empty.
    ///
    /// "Empty" follows the source system's field-presence semantics: null,
    /// empty strings, zero, and `false` all read as absent, while empty
    /// arrays and objects are present.
    pub fn value(&self, aliases: &[&str]) -> Option<&'a Value> {
        let fields = self.fields?;
        aliases
            .iter()
            .find_map(|key| fields.get(*key).filter(|v| is_present(v)))
    }

    /// True when `key` holds a non-empty value. Used for diagnostics.
    pub fn has(&self, key: &str) -> bool {
        self.value(&[key]).is_some()
    }

    /// First alias resolving to a non-empty string.
    pub fn string(&self, aliases: &[&str]) -> Option<String> {
        self.value(aliases)
            .and_then(Value::as_str)
            .map(str::to_owned)
    }

    /// First alias resolving to a string or number, rendered as a string.
    /// Ids and house numbers arrive in both encodings.
    pub fn display_string(&self, aliases: &[&str]) -> Option<String> {
        self.value(aliases).and_then(coerce_string)
    }

    /// First alias holding a non-empty value, coerced to a decimal.
    ///
    /// Mirrors the source lookup chains: the first present alias is chosen
    /// *before* coercion, so a malformed value yields `None` rather than
    /// falling through to later aliases.
    pub fn decimal(&self, aliases: &[&str]) -> Option<Decimal> {
        self.value(aliases).and_then(coerce_decimal)
    }

    /// First alias holding an array.
    pub fn array(&self, aliases: &[&str]) -> Option<&'a Vec<Value>> {
        self.value(aliases).and_then(Value::as_array)
    }

    /// First alias holding an object, as a raw map.
    pub fn map(&self, aliases: &[&str]) -> Option<&'a Map<String, Value>> {
        self.value(aliases).and_then(Value::as_object)
    }

    /// Nested object under `key`, or a missing accessor.
    pub fn child(&self, key: &str) -> RawObject<'a> {
        self.map(&[key]).map_or_else(Self::missing, Self::from_map)
    }
}

/// Field-presence check matching the source system's truthiness.
pub(crate) fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Coerce a raw value to a decimal. Strings are trimmed and parsed; failed
/// parses are absent, never zero.
pub(crate) fn coerce_decimal(value: &Value) -> Option<Decimal> {
    match value {
        Value::String(s) => s.trim().parse().ok(),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Some(Decimal::from(i))
            } else if let Some(u) = n.as_u64() {
                Some(Decimal::from(u))
            } else {
                // floats go through their shortest display form, so 9.9
                // stays 9.9 rather than its binary expansion
                n.to_string().parse().ok()
            }
        }
        _ => None,
    }
}

/// Coerce a raw value to display text. Strings pass through, numbers render;
/// anything else is absent.
pub(crate) fn coerce_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Coerce a line quantity. Missing, zero, or malformed quantities default
/// to 1, matching the source behavior.
pub(crate) fn coerce_quantity(value: Option<&Value>) -> u32 {
    let quantity = match value {
        Some(Value::Number(n)) => n.as_u64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    };
    match quantity {
        Some(q) if q > 0 => u32::try_from(q).unwrap_or(u32::MAX),
        _ => 1,
    }
}
