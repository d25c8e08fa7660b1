//! Static tables describing the rental platform and the key names that
//! signal address data.

use std::borrow::Cow;

/// Key names (compared lower-cased) whose values are collected by deep key
/// search.
pub const ADDRESS_KEYS: &[&str] = &[
    "fulladdress",
    "address",
    "streetaddress",
    "formattedaddress",
    "location",
    "latlon",
    "geo",
    "latitude",
    "lat",
];

/// Substrings of a lower-cased mapping key whose string value contributes to
/// the composed full address.
pub const ADDRESS_FRAGMENTS: &[&str] = &["street", "address", "fulladdress", "formatted", "line1"];

/// Quoted key names that mark a brace-delimited fragment as worth parsing.
pub const OBJECT_HINTS: &[&str] = &[r#""address""#, r#""Latitude""#, r#""latitude""#, r#""FullAddress""#];

/// Assignment patterns for embedded page state. `{platform}` is replaced by
/// the escaped platform name and matched case-insensitively; capture group 1
/// is the object literal.
const STATE_PATTERNS: &[&str] = &[
    r"window\.__INITIAL_STATE__\s*=\s*(\{.*?\});",
    r"window\.__DATA__\s*=\s*(\{.*?\});",
    r"var\s+(?i:{platform})Data\s*=\s*(\{.*?\});",
    r"window\.__(?i:{platform})__\s*=\s*(\{.*?\});",
    r#"=\s*(\{\s*"Listing"[\s\S]*?\})\s*;"#,
];

/// The vacation-rental platform whose pages and data API are targeted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Platform {
    name: Cow<'static, str>,
}

impl Platform {
    pub const LODGIX: Platform = Platform {
        name: Cow::Borrowed("lodgix"),
    };

    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Cow::Owned(name.into()),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Embedded-state regex sources with the platform name filled in.
    #[must_use]
    pub fn state_patterns(&self) -> Vec<String> {
        let escaped = regex::escape(&self.name);
        STATE_PATTERNS
            .iter()
            .map(|p| format!("(?s){}", p.replace("{platform}", &escaped)))
            .collect()
    }
}

impl Default for Platform {
    fn default() -> Self {
        Self::LODGIX
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_patterns_compile_for_awkward_names() {
        let platform = Platform::new("acme.rentals+");
        for source in platform.state_patterns() {
            assert!(regex::Regex::new(&source).is_ok(), "bad pattern: {source}");
        }
    }

    #[test]
    fn state_patterns_embed_platform_name() {
        let patterns = Platform::new("guesty").state_patterns();
        assert!(patterns.iter().any(|p| p.contains("(?i:guesty)Data")));
        assert!(patterns.iter().all(|p| !p.contains("{platform}")));
    }
}
