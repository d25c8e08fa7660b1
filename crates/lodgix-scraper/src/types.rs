//! Domain types for property address extraction.

use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

/// Canonical address/coordinate record produced by normalization.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AddressRecord {
    pub full_address: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl AddressRecord {
    /// Record holding only a free-form address.
    #[must_use]
    pub fn from_address(address: impl Into<String>) -> Self {
        Self {
            full_address: Some(address.into()),
            ..Self::default()
        }
    }

    /// Record holding only a coordinate pair.
    #[must_use]
    pub fn from_coordinates(latitude: f64, longitude: f64) -> Self {
        Self {
            full_address: None,
            latitude: Some(latitude),
            longitude: Some(longitude),
        }
    }

    /// A record is useful when it carries a non-empty address or both
    /// coordinates.
    #[must_use]
    pub fn is_useful(&self) -> bool {
        let has_address = self.full_address.as_deref().is_some_and(|a| !a.is_empty());
        has_address || (self.latitude.is_some() && self.longitude.is_some())
    }
}

/// Tag of the extraction strategy that produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Approach {
    JsonLd,
    InlineJson,
    ApiCrawl,
    RegexText,
    HtmlFallback,
}

impl Approach {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Approach::JsonLd => "json-ld",
            Approach::InlineJson => "inline-json",
            Approach::ApiCrawl => "api-crawl",
            Approach::RegexText => "regex-text",
            Approach::HtmlFallback => "html-fallback",
        }
    }
}

impl std::fmt::Display for Approach {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Note recorded when every strategy ran without a useful record.
pub const NO_RESULT_NOTE: &str = "no-address-found";

/// Outcome of extracting one page.
///
/// Serializes with the field names used by the JSON and CSV outputs
/// (`SourceUrl`, `Timestamp`, `Approach`, ...).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ExtractionResult {
    pub source_url: String,
    pub timestamp: String,
    pub approach: Option<Approach>,
    pub success: bool,
    pub full_address: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub notes: Option<String>,
}

impl ExtractionResult {
    /// Fresh, unsuccessful result stamped with the current UTC time.
    #[must_use]
    pub fn new(source_url: impl Into<String>) -> Self {
        Self {
            source_url: source_url.into(),
            timestamp: now_timestamp(),
            approach: None,
            success: false,
            full_address: None,
            latitude: None,
            longitude: None,
            notes: None,
        }
    }

    /// Unsuccessful result carrying only a diagnostic note.
    #[must_use]
    pub fn failed(source_url: impl Into<String>, note: impl Into<String>) -> Self {
        let mut result = Self::new(source_url);
        result.notes = Some(note.into());
        result
    }

    /// Copy a strategy's record into the result and return whether it was
    /// useful. Unuseful records still overwrite the address fields.
    pub fn apply(&mut self, approach: Approach, record: AddressRecord) -> bool {
        self.approach = Some(approach);
        self.success = record.is_useful();
        self.full_address = record.full_address;
        self.latitude = record.latitude;
        self.longitude = record.longitude;
        self.success
    }
}

/// Current UTC time as an ISO-8601 string with microsecond precision.
#[must_use]
pub fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// A value of interest found during extraction, before normalization.
///
/// Only strings and mappings can carry an address; every other JSON shape
/// is dropped when a candidate is built.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Candidate<'a> {
    Text(&'a str),
    Mapping(&'a Map<String, Value>),
}

impl<'a> Candidate<'a> {
    #[must_use]
    pub fn from_value(value: &'a Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(Candidate::Text(s)),
            Value::Object(map) => Some(Candidate::Mapping(map)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_address_is_not_useful() {
        assert!(!AddressRecord::from_address("").is_useful());
        assert!(AddressRecord::from_address("1 Elm St").is_useful());
    }

    #[test]
    fn single_coordinate_is_not_useful() {
        let record = AddressRecord {
            latitude: Some(1.0),
            ..AddressRecord::default()
        };
        assert!(!record.is_useful());
        assert!(AddressRecord::from_coordinates(0.0, 0.0).is_useful());
    }

    #[test]
    fn result_serializes_with_pascal_case_keys_in_order() {
        let mut result = ExtractionResult::new("https://example.com");
        result.timestamp = "2024-01-01T00:00:00.000000Z".to_owned();
        result.apply(Approach::JsonLd, AddressRecord::from_address("1 Elm St"));

        let json = serde_json::to_string(&result).unwrap();
        assert_eq!(
            json,
            r#"{"SourceUrl":"https://example.com","Timestamp":"2024-01-01T00:00:00.000000Z","Approach":"json-ld","Success":true,"FullAddress":"1 Elm St","Latitude":null,"Longitude":null,"Notes":null}"#
        );
    }

    #[test]
    fn approach_tags_match_display() {
        for approach in [
            Approach::JsonLd,
            Approach::InlineJson,
            Approach::ApiCrawl,
            Approach::RegexText,
            Approach::HtmlFallback,
        ] {
            let json = serde_json::to_value(approach).unwrap();
            assert_eq!(json, Value::String(approach.to_string()));
        }
    }

    #[test]
    fn candidate_drops_non_text_values() {
        assert!(Candidate::from_value(&serde_json::json!(4.2)).is_none());
        assert!(Candidate::from_value(&serde_json::json!([1, 2])).is_none());
        assert!(matches!(
            Candidate::from_value(&serde_json::json!("x")),
            Some(Candidate::Text("x"))
        ));
    }
}
