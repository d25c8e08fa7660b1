//! Reconciles heterogeneous address candidates into an [`AddressRecord`].

use serde_json::{Map, Value};

use crate::platform::{ADDRESS_FRAGMENTS, ADDRESS_KEYS};
use crate::search::find_candidates;
use crate::types::{AddressRecord, Candidate};

/// Normalize a single candidate.
///
/// A string becomes the full address verbatim. For a mapping, every string
/// value under an address-like key is joined with `", "` in key order; then
/// `latitude`/`longitude`, `lat`/`lng`, `FullAddress` and `fullAddress` are
/// applied in that order, each overriding what came before. Coordinate pairs
/// that do not parse as numbers are ignored.
#[must_use]
pub fn normalize_candidate(candidate: Candidate<'_>) -> AddressRecord {
    match candidate {
        Candidate::Text(text) => AddressRecord::from_address(text),
        Candidate::Mapping(map) => normalize_mapping(map),
    }
}

fn normalize_mapping(map: &Map<String, Value>) -> AddressRecord {
    let mut record = AddressRecord::default();

    for (key, value) in map {
        let lowered = key.to_lowercase();
        if !ADDRESS_FRAGMENTS.iter().any(|f| lowered.contains(f)) {
            continue;
        }
        let Some(part) = value.as_str() else {
            continue;
        };
        record.full_address = match record.full_address.take() {
            Some(existing) if !existing.is_empty() => Some(format!("{existing}, {part}")),
            _ => Some(part.to_owned()),
        };
    }

    for (lat_key, lon_key) in [("latitude", "longitude"), ("lat", "lng")] {
        if let Some((lat, lon)) = coordinate_pair(map, lat_key, lon_key) {
            record.latitude = Some(lat);
            record.longitude = Some(lon);
        }
    }

    // `fullAddress` is applied last so it wins over `FullAddress`.
    for key in ["FullAddress", "fullAddress"] {
        if let Some(value) = map.get(key) {
            record.full_address = value.as_str().map(str::to_owned);
        }
    }

    record
}

fn coordinate_pair(map: &Map<String, Value>, lat_key: &str, lon_key: &str) -> Option<(f64, f64)> {
    let lat = map.get(lat_key)?;
    let lon = map.get(lon_key)?;
    Some((coerce_f64(lat)?, coerce_f64(lon)?))
}

/// Numeric JSON values and numeric strings (surrounding whitespace allowed).
pub(crate) fn coerce_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// First useful record among `candidates`, in order.
#[must_use]
pub fn first_useful<'a, I>(candidates: I) -> Option<AddressRecord>
where
    I: IntoIterator<Item = Candidate<'a>>,
{
    candidates
        .into_iter()
        .map(normalize_candidate)
        .find(AddressRecord::is_useful)
}

/// Deep-search one parsed JSON document and return its first useful record.
#[must_use]
pub fn best_from_json(value: &Value) -> Option<AddressRecord> {
    first_useful(find_candidates(value, ADDRESS_KEYS))
}

/// Resolve an ordered sequence of parsed documents to the first useful
/// record. Empty documents (`null`, `{}`, `[]`, `""`, `0`, `false`) are
/// skipped.
#[must_use]
pub fn best_from_documents(documents: &[Value]) -> Option<AddressRecord> {
    documents
        .iter()
        .filter(|doc| !is_empty_document(doc))
        .find_map(best_from_json)
}

pub(crate) fn is_empty_document(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f.abs() < f64::EPSILON),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
