//! Recursive key search over parsed JSON.

use serde_json::Value;

use crate::types::Candidate;

/// Collect every value attached to a key in `keys` (compared
/// case-insensitively) at any depth of `value`.
///
/// Matching values are still descended into, so nested matches follow their
/// parent in the output. Values that cannot carry an address (numbers,
/// booleans, arrays, null) are not returned as candidates.
#[must_use]
pub fn find_candidates<'a>(value: &'a Value, keys: &[&str]) -> Vec<Candidate<'a>> {
    let mut found = Vec::new();
    collect(value, keys, &mut found);
    found
}

fn collect<'a>(value: &'a Value, keys: &[&str], out: &mut Vec<Candidate<'a>>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                if keys.iter().any(|k| k.eq_ignore_ascii_case(key)) {
                    if let Some(candidate) = Candidate::from_value(child) {
                        out.push(candidate);
                    }
                }
                collect(child, keys, out);
            }
        }
        Value::Array(items) => {
            for item in items {
                collect(item, keys, out);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::platform::ADDRESS_KEYS;

    #[test]
    fn finds_keys_at_any_depth_in_order() {
        let doc = json!({
            "Listing": {
                "FullAddress": "1 Elm St",
                "units": [{"geo": {"lat": 1.0, "lng": 2.0}}]
            },
            "address": "2 Oak Ave"
        });

        let found = find_candidates(&doc, ADDRESS_KEYS);
        assert_eq!(found.len(), 3);
        assert_eq!(found[0], Candidate::Text("1 Elm St"));
        assert!(matches!(found[1], Candidate::Mapping(m) if m.contains_key("lat")));
        assert_eq!(found[2], Candidate::Text("2 Oak Ave"));
    }

    #[test]
    fn descends_into_matched_values() {
        let doc = json!({"location": {"address": {"streetAddress": "5 Oak Ave"}}});
        let found = find_candidates(&doc, ADDRESS_KEYS);
        // location, address, streetAddress
        assert_eq!(found.len(), 3);
        assert_eq!(found[2], Candidate::Text("5 Oak Ave"));
    }

    #[test]
    fn keeps_duplicates() {
        let doc = json!([{"address": "x"}, {"address": "x"}]);
        assert_eq!(find_candidates(&doc, ADDRESS_KEYS).len(), 2);
    }

    #[test]
    fn ignores_numeric_values_under_matching_keys() {
        let doc = json!({"latitude": 40.1, "lat": "40.1"});
        let found = find_candidates(&doc, ADDRESS_KEYS);
        assert_eq!(found, vec![Candidate::Text("40.1")]);
    }

    #[test]
    fn scalar_root_yields_nothing() {
        assert!(find_candidates(&json!("address"), ADDRESS_KEYS).is_empty());
    }
}
