//! Strategy 1: schema.org JSON-LD blocks.

use std::sync::LazyLock;

use scraper::{Html, Selector};
use serde_json::Value;

static LD_JSON_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"script[type="application/ld+json"]"#).expect("valid selector")
});

/// Parse every `<script type="application/ld+json">` block of `html`.
///
/// Blocks holding an array are flattened so the result is one ordered
/// sequence of documents. Blocks that are empty or not valid JSON are
/// skipped.
#[must_use]
pub fn extract_jsonld_documents(html: &str) -> Vec<Value> {
    let document = Html::parse_document(html);
    let mut documents = Vec::new();

    for script in document.select(&LD_JSON_SELECTOR) {
        let raw: String = script.text().collect();
        let raw = raw.trim();
        if raw.is_empty() {
            continue;
        }

        match serde_json::from_str::<Value>(raw) {
            Ok(Value::Array(items)) => documents.extend(items),
            Ok(value) => documents.push(value),
            Err(err) => {
                tracing::debug!(error = %err, "skipping malformed JSON-LD block");
            }
        }
    }

    documents
}
