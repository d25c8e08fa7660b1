//! Strategy 5: visible page text and `<meta>` tags.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use scraper::{Html, Selector};

use crate::types::AddressRecord;

static META_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("meta").expect("valid selector"));

/// House number, street, city, five-digit ZIP.
static POSTAL_ADDRESS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d{1,5}\s+[A-Za-z0-9][^,\n]{5,},\s*[A-Za-z ]{2,30}\s*\d{5})")
        .expect("valid regex")
});

/// Meta keys whose presence makes the page worth checking for coordinates.
const GEO_META_KEYS: &[&str] = &[
    "og:street-address",
    "og:locality",
    "og:region",
    "og:postal-code",
    "og:latitude",
    "og:longitude",
    "geo.position",
    "icbm",
];

const HIDDEN_ELEMENTS: &[&str] = &["script", "style", "noscript", "template"];

/// Last-resort extraction from rendered text and meta tags.
///
/// Returns a US-style postal address found in the visible text, or else a
/// coordinate-only record built from `og:latitude`/`og:longitude` style meta
/// tags (falling back to a combined `geo.position` or `ICBM` value).
#[must_use]
pub fn parse_html_fallback(html: &str) -> Option<AddressRecord> {
    let document = Html::parse_document(html);

    let text = visible_text(&document);
    if let Some(m) = POSTAL_ADDRESS_RE.find(&text) {
        return Some(AddressRecord::from_address(m.as_str().trim()));
    }

    let meta = meta_values(&document);
    if !GEO_META_KEYS.iter().any(|key| meta.contains_key(*key)) {
        return None;
    }

    let pick = |keys: &[&str]| keys.iter().find_map(|k| meta.get(*k)).map(String::as_str);
    let latitude = pick(&["og:latitude", "latitude", "og:lat"]);
    let longitude = pick(&["og:longitude", "longitude", "og:lon"]);

    let pair = match (latitude, longitude) {
        (Some(lat), Some(lon)) => parse_pair(lat, lon),
        _ => None,
    };
    let pair = pair
        .or_else(|| meta.get("geo.position").and_then(|v| split_pair(v, ';')))
        .or_else(|| meta.get("icbm").and_then(|v| split_pair(v, ',')));

    pair.map(|(lat, lon)| AddressRecord::from_coordinates(lat, lon))
}

/// Non-empty text nodes outside scripts and styles, trimmed and joined with
/// newlines in document order.
fn visible_text(document: &Html) -> String {
    let mut blocks: Vec<&str> = Vec::new();
    for node in document.tree.root().descendants() {
        let Some(text) = node.value().as_text() else {
            continue;
        };
        let hidden = node
            .parent()
            .and_then(|parent| parent.value().as_element())
            .is_some_and(|el| HIDDEN_ELEMENTS.contains(&el.name()));
        if hidden {
            continue;
        }
        let trimmed = text.trim();
        if !trimmed.is_empty() {
            blocks.push(trimmed);
        }
    }
    blocks.join("\n")
}

/// Lower-cased `name` (or `property`) to `content`; later tags win.
fn meta_values(document: &Html) -> HashMap<String, String> {
    let mut meta = HashMap::new();
    for element in document.select(&META_SELECTOR) {
        let attrs = element.value();
        let key = attrs
            .attr("name")
            .filter(|n| !n.is_empty())
            .or_else(|| attrs.attr("property"))
            .unwrap_or_default();
        let content = attrs.attr("content").unwrap_or_default();
        if !key.is_empty() && !content.is_empty() {
            meta.insert(key.to_lowercase(), content.to_owned());
        }
    }
    meta
}

fn parse_pair(lat: &str, lon: &str) -> Option<(f64, f64)> {
    Some((lat.trim().parse().ok()?, lon.trim().parse().ok()?))
}

fn split_pair(value: &str, separator: char) -> Option<(f64, f64)> {
    let (lat, lon) = value.split_once(separator)?;
    parse_pair(lat, lon)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_postal_address_in_visible_text() {
        let html = r"
            <html><body>
              <h1>Seaside Cottage</h1>
              <p>1234 Gulf Shore Boulevard, Naples 34102</p>
            </body></html>
        ";
        let record = parse_html_fallback(html).unwrap();
        assert_eq!(
            record.full_address.as_deref(),
            Some("1234 Gulf Shore Boulevard, Naples 34102")
        );
    }

    #[test]
    fn ignores_addresses_inside_scripts() {
        let html = r#"
            <html><body>
              <script>var a = "1234 Gulf Shore Boulevard, Naples 34102";</script>
              <p>Welcome</p>
            </body></html>
        "#;
        assert!(parse_html_fallback(html).is_none());
    }

    #[test]
    fn reads_og_coordinates() {
        let html = r#"
            <html><head>
              <meta property="og:latitude" content="51.5">
              <meta property="og:longitude" content="-0.12">
            </head><body><p>Flat</p></body></html>
        "#;
        let record = parse_html_fallback(html).unwrap();
        assert_eq!(record.full_address, None);
        assert_eq!(record.latitude, Some(51.5));
        assert_eq!(record.longitude, Some(-0.12));
    }

    #[test]
    fn plain_latitude_meta_needs_a_geo_trigger() {
        let html = r#"
            <meta name="latitude" content="10.0">
            <meta name="longitude" content="20.0">
        "#;
        assert!(parse_html_fallback(html).is_none());

        let triggered = format!(r#"{html}<meta property="og:locality" content="Destin">"#);
        let record = parse_html_fallback(&triggered).unwrap();
        assert_eq!(record.latitude, Some(10.0));
        assert_eq!(record.longitude, Some(20.0));
    }

    #[test]
    fn splits_geo_position_and_icbm() {
        let geo = r#"<meta name="geo.position" content="30.39;-86.49">"#;
        let record = parse_html_fallback(geo).unwrap();
        assert_eq!(record.latitude, Some(30.39));
        assert_eq!(record.longitude, Some(-86.49));

        let icbm = r#"<meta name="ICBM" content="30.39, -86.49">"#;
        let record = parse_html_fallback(icbm).unwrap();
        assert_eq!(record.latitude, Some(30.39));
    }

    #[test]
    fn unparseable_meta_coordinates_yield_nothing() {
        let html = r#"
            <meta property="og:latitude" content="north">
            <meta property="og:longitude" content="west">
        "#;
        assert!(parse_html_fallback(html).is_none());
    }
}
