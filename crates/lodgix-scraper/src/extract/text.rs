//! Strategy 4: regex scan of the raw page text.

use std::sync::LazyLock;

use regex::Regex;

use crate::types::AddressRecord;

static ADDRESS_RES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r#"(?i)FullAddress"\s*:\s*"([^"]+)""#,
        r#"(?i)fullAddress"\s*:\s*"([^"]+)""#,
        r#"(?i)address"\s*:\s*\{[^}]*"streetAddress"\s*:\s*"([^"]+)""#,
        r#"(?i)address"\s*:\s*"([^"]+)""#,
    ]
    .iter()
    .map(|p| Regex::new(p).expect("valid regex"))
    .collect()
});
static LATITUDE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)Latitude"\s*:\s*([0-9.\-]+)"#).expect("valid regex"));
static LONGITUDE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)Longitude"\s*:\s*([0-9.\-]+)"#).expect("valid regex"));
static GEO_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)geo"\s*:\s*\{\s*"latitude"\s*:\s*([0-9.\-]+)\s*,\s*"longitude"\s*:\s*([0-9.\-]+)\s*\}"#,
    )
    .expect("valid regex")
});

/// Look for JSON-style address or coordinate fields anywhere in `text`.
///
/// Address patterns are tried first (`FullAddress`, `fullAddress`, nested
/// `address.streetAddress`, bare `address`), the first match winning. Failing
/// that, a `Latitude`/`Longitude` pair, then a `geo: {latitude, longitude}`
/// object. The returned record holds an address or coordinates, never both;
/// the address is trimmed and may therefore be empty.
#[must_use]
pub fn find_address_in_text(text: &str) -> Option<AddressRecord> {
    for re in ADDRESS_RES.iter() {
        if let Some(m) = re.captures(text).and_then(|cap| cap.get(1)) {
            return Some(AddressRecord::from_address(m.as_str().trim()));
        }
    }

    let latitude = first_group(&LATITUDE_RE, text).and_then(|s| s.parse::<f64>().ok());
    let longitude = first_group(&LONGITUDE_RE, text).and_then(|s| s.parse::<f64>().ok());
    if let (Some(lat), Some(lon)) = (latitude, longitude) {
        return Some(AddressRecord::from_coordinates(lat, lon));
    }

    let cap = GEO_RE.captures(text)?;
    let lat = cap.get(1)?.as_str().parse::<f64>().ok()?;
    let lon = cap.get(2)?.as_str().parse::<f64>().ok()?;
    Some(AddressRecord::from_coordinates(lat, lon))
}

fn first_group<'h>(re: &Regex, text: &'h str) -> Option<&'h str> {
    re.captures(text).and_then(|cap| cap.get(1)).map(|m| m.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_address_pair_wins() {
        let text = r#"{"address": "ignored", "FullAddress": "8 Dune Ln, Gulf Shores, AL"}"#;
        let record = find_address_in_text(text).unwrap();
        assert_eq!(
            record.full_address.as_deref(),
            Some("8 Dune Ln, Gulf Shores, AL")
        );
        assert_eq!(record.latitude, None);
    }

    #[test]
    fn nested_street_address_is_found() {
        let text = r#"{"address": {"@type": "PostalAddress", "streetAddress": "5 Oak Ave"}}"#;
        let record = find_address_in_text(text).unwrap();
        assert_eq!(record.full_address.as_deref(), Some("5 Oak Ave"));
    }

    #[test]
    fn address_is_trimmed() {
        let record = find_address_in_text(r#""address": "  12 Bay St  ""#).unwrap();
        assert_eq!(record.full_address.as_deref(), Some("12 Bay St"));
    }

    #[test]
    fn address_takes_precedence_over_coordinates() {
        let text = r#""Latitude": 1.0, "Longitude": 2.0, "address": "3 Elm""#;
        let record = find_address_in_text(text).unwrap();
        assert_eq!(record.full_address.as_deref(), Some("3 Elm"));
        assert_eq!(record.latitude, None);
        assert_eq!(record.longitude, None);
    }

    #[test]
    fn latitude_longitude_pair_is_parsed() {
        let text = r#"var p = {"Latitude": 40.5, "Longitude": -74.3};"#;
        let record = find_address_in_text(text).unwrap();
        assert_eq!(record.full_address, None);
        assert_eq!(record.latitude, Some(40.5));
        assert_eq!(record.longitude, Some(-74.3));
    }

    #[test]
    fn malformed_pair_falls_through_to_geo() {
        let text = r#""Latitude": 1.2.3, "Longitude": 4, "geo": {"latitude": 30.2, "longitude": -87.1}"#;
        let record = find_address_in_text(text).unwrap();
        assert_eq!(record.latitude, Some(30.2));
        assert_eq!(record.longitude, Some(-87.1));
    }

    #[test]
    fn lone_latitude_is_not_enough() {
        assert!(find_address_in_text(r#""Latitude": 40.5"#).is_none());
    }

    #[test]
    fn plain_text_yields_nothing() {
        assert!(find_address_in_text("<p>Welcome to the cabin</p>").is_none());
    }
}
