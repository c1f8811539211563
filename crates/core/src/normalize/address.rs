//! Address reconciliation.
//!
//! Three raw dialects have been observed for the same logical address:
//!
//! 1. [`AddressDialect::CombinedUnderscore`] - `address_1`/`address_2`,
//!    where line 1 may pack "street, number" behind a comma and line 2
//!    holds the neighborhood. This is what the fulfillment API sends today.
//! 2. [`AddressDialect::CombinedCamel`] - `address1`/`address2`, the same
//!    layout from an older integration path.
//! 3. [`AddressDialect::Standard`] - discrete `street`/`city` fields, which
//!    is the canonical shape itself; recognizing it keeps re-normalization
//!    stable.
//!
//! A candidate object is classified first, then mapped by exactly one
//! dialect mapping. No match at any checked location means no address at
//! all - never a half-populated default.

use crate::types::Address;

use super::raw::RawObject;

/// Raw keys checked for a shipping address candidate, in order.
const SHIPPING_SOURCES: &[&str] = &[
    "shipping",
    "shipping_address",
    "shippingAddress",
    "address",
    "delivery_address",
    "deliveryAddress",
];

/// Raw keys checked for a billing address candidate, in order.
const BILLING_SOURCES: &[&str] = &["billing", "billing_address", "billingAddress"];

/// Root-level fields whose presence marks a loose, un-nested address.
const ROOT_MARKERS: &[&str] = &["street", "city", "zip_code", "cep", "address_1", "address1"];

/// Every location shipping resolution looks at, for diagnostics.
pub(crate) const SHIPPING_CHECKED: &[&str] = &[
    "shipping",
    "shipping_address",
    "shippingAddress",
    "address",
    "delivery_address",
    "deliveryAddress",
    "shipping_information.address",
    "order root",
];

/// One known raw encoding of an address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AddressDialect {
    CombinedUnderscore,
    CombinedCamel,
    Standard,
}

/// Classify a candidate object by its characteristic non-empty fields.
pub(crate) fn classify(candidate: RawObject) -> Option<AddressDialect> {
    if candidate.value(&["address_1", "address_2"]).is_some() {
        Some(AddressDialect::CombinedUnderscore)
    } else if candidate.value(&["address1", "address2"]).is_some() {
        Some(AddressDialect::CombinedCamel)
    } else if candidate.value(&["street", "city"]).is_some() {
        Some(AddressDialect::Standard)
    } else {
        None
    }
}

/// Resolve the shipping address: aliased candidates, then the nested
/// shipping-information wrapper, then loose fields on the order root.
pub(crate) fn resolve_shipping(root: RawObject, default_country: &str) -> Option<Address> {
    let candidate = root
        .map(SHIPPING_SOURCES)
        .or_else(|| root.child("shipping_information").map(&["address"]));

    if let Some(map) = candidate {
        let obj = RawObject::from_map(map);
        if let Some(dialect) = classify(obj) {
            return Some(map_dialect(obj, dialect, default_country));
        }
    }
    resolve_root_loose(root, default_country)
}

/// Resolve the billing address. Same dialect algorithm, no root fallback:
/// loose root fields describe the delivery destination.
pub(crate) fn resolve_billing(root: RawObject, default_country: &str) -> Option<Address> {
    let map = root.map(BILLING_SOURCES)?;
    let obj = RawObject::from_map(map);
    let dialect = classify(obj)?;
    Some(map_dialect(obj, dialect, default_country))
}

fn map_dialect(obj: RawObject, dialect: AddressDialect, default_country: &str) -> Address {
    match dialect {
        AddressDialect::CombinedUnderscore => map_combined_underscore(obj, default_country),
        AddressDialect::CombinedCamel => map_combined_camel(obj, default_country),
        AddressDialect::Standard => map_standard(obj, default_country),
    }
}

/// Split a combined address line at its first comma: "Rua A, 123" becomes
/// street "Rua A" and number "123".
fn split_street_line(line: &str) -> (Option<String>, Option<String>) {
    match line.split_once(',') {
        Some((street, number)) => (trimmed(street), trimmed(number)),
        None => (trimmed(line), None),
    }
}

fn trimmed(s: &str) -> Option<String> {
    let s = s.trim();
    if s.is_empty() { None } else { Some(s.to_owned()) }
}

fn map_combined_underscore(obj: RawObject, default_country: &str) -> Address {
    let line1 = obj.display_string(&["address_1"]).unwrap_or_default();
    let (street, street_number) = split_street_line(&line1);
    Address {
        street: street.or_else(|| obj.display_string(&["street", "street_name", "logradouro"])),
        street_number: street_number
            .or_else(|| obj.display_string(&["number", "street_number", "streetNumber"])),
        neighborhood: obj.display_string(&[
            "address_2",
            "neighborhood",
            "neighbourhood",
            "district",
            "bairro",
        ]),
        city: obj.display_string(&["city", "cidade"]),
        state: obj.display_string(&["state", "province", "estado"]),
        zip_code: obj.display_string(&["zip_code", "zipCode", "postal_code", "postalCode", "cep"]),
        country: obj
            .display_string(&["country", "pais", "country_code"])
            .unwrap_or_else(|| default_country.to_owned()),
        complement: obj.display_string(&["complement", "complemento"]),
        reference: obj.display_string(&["reference", "referencia"]),
    }
}

fn map_combined_camel(obj: RawObject, default_country: &str) -> Address {
    let line1 = obj.display_string(&["address1"]).unwrap_or_default();
    let (street, street_number) = split_street_line(&line1);
    Address {
        street: street.or_else(|| obj.display_string(&["street", "street_name", "logradouro"])),
        street_number: street_number
            .or_else(|| obj.display_string(&["street_number", "streetNumber", "number"])),
        neighborhood: obj.display_string(&[
            "address2",
            "neighborhood",
            "neighbourhood",
            "district",
            "bairro",
        ]),
        city: obj.display_string(&["city", "cidade"]),
        state: obj.display_string(&["province", "state", "estado"]),
        zip_code: obj.display_string(&["zip_code", "zipCode", "postal_code", "postalCode", "cep"]),
        country: obj
            .display_string(&["country", "pais", "country_code"])
            .unwrap_or_else(|| default_country.to_owned()),
        complement: obj.display_string(&["complement", "complemento", "address_line2"]),
        reference: obj.display_string(&["reference", "referencia", "address_reference"]),
    }
}

fn map_standard(obj: RawObject, default_country: &str) -> Address {
    Address {
        street: obj.display_string(&["street", "street_name", "logradouro", "address_line1"]),
        street_number: obj
            .display_string(&["street_number", "streetNumber", "number", "address_number"]),
        neighborhood: obj
            .display_string(&["neighborhood", "neighbourhood", "district", "bairro"]),
        city: obj.display_string(&["city", "cidade"]),
        state: obj.display_string(&["state", "estado", "province"]),
        zip_code: obj.display_string(&["zip_code", "zipCode", "postal_code", "postalCode", "cep"]),
        country: obj
            .display_string(&["country", "pais", "country_code"])
            .unwrap_or_else(|| default_country.to_owned()),
        complement: obj.display_string(&["complement", "complemento", "address_line2"]),
        reference: obj.display_string(&["reference", "referencia", "address_reference"]),
    }
}

/// Map loose address fields sitting directly on the order root, seen in
/// payloads from the oldest integration path.
fn resolve_root_loose(root: RawObject, default_country: &str) -> Option<Address> {
    if !ROOT_MARKERS.iter().any(|key| root.has(key)) {
        return None;
    }
    Some(Address {
        street: root.display_string(&["address_1", "address1", "street", "street_name", "logradouro"]),
        street_number: root.display_string(&["street_number", "streetNumber", "number"]),
        neighborhood: root.display_string(&[
            "address_2",
            "address2",
            "neighborhood",
            "neighbourhood",
            "district",
            "bairro",
        ]),
        city: root.display_string(&["city", "cidade"]),
        state: root.display_string(&["province", "state", "estado"]),
        zip_code: root.display_string(&["zip_code", "zipCode", "postal_code", "postalCode", "cep"]),
        country: root
            .display_string(&["country", "pais", "country_code"])
            .unwrap_or_else(|| default_country.to_owned()),
        complement: root.display_string(&["complement", "complemento"]),
        reference: root.display_string(&["reference", "referencia"]),
    })
}
