//! Strategy 2: JSON embedded in page scripts.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::platform::{Platform, OBJECT_HINTS};

/// Brace-delimited fragments shorter than this are not worth parsing.
const MIN_OBJECT_LEN: usize = 200;

static BARE_KEY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\w+):").expect("valid regex"));

/// Recover JSON objects embedded in raw page text.
///
/// Known state assignments (`window.__INITIAL_STATE__ = {...};` and the
/// platform's own globals) are tried first, strictly and then with bare keys
/// quoted. Then every top-level balanced `{...}` fragment of at least
/// [`MIN_OBJECT_LEN`] bytes that mentions an address or latitude key is
/// parsed strictly. Fragments that fail to parse are dropped.
#[must_use]
pub fn try_extract_candidates(page_text: &str, platform: &Platform) -> Vec<Value> {
    let mut objects = Vec::new();

    for source in platform.state_patterns() {
        let re = match Regex::new(&source) {
            Ok(re) => re,
            Err(err) => {
                tracing::debug!(pattern = %source, error = %err, "skipping state pattern");
                continue;
            }
        };
        for cap in re.captures_iter(page_text) {
            let Some(literal) = cap.get(1) else {
                continue;
            };
            if let Some(value) = parse_lenient(literal.as_str()) {
                objects.push(value);
            }
        }
    }

    for fragment in balanced_objects(page_text) {
        if fragment.len() < MIN_OBJECT_LEN {
            continue;
        }
        if !OBJECT_HINTS.iter().any(|hint| fragment.contains(hint)) {
            continue;
        }
        if let Ok(value) = serde_json::from_str::<Value>(fragment) {
            objects.push(value);
        }
    }

    objects
}

/// Strict parse, then a retry with `key:` rewritten to `"key":`.
fn parse_lenient(literal: &str) -> Option<Value> {
    if let Ok(value) = serde_json::from_str(literal) {
        return Some(value);
    }
    let repaired = BARE_KEY_RE.replace_all(literal, r#""${1}":"#);
    serde_json::from_str(&repaired).ok()
}

/// Top-level, non-overlapping balanced `{...}` fragments of `text`, in order.
///
/// Quotes are honoured only inside braces, so stray quotes in markup do not
/// hide later objects. Double, single and backtick quotes all delimit
/// strings. A closing `</script` tag ends any open string and drops any
/// unclosed braces, so an unbalanced quote cannot leak into the next script.
/// An opening brace that is never closed is passed over and the braces
/// nested inside it are still considered.
pub(crate) fn balanced_objects(text: &str) -> Vec<&str> {
    let bytes = text.as_bytes();
    let mut open: Vec<usize> = Vec::new();
    let mut pairs: Vec<(usize, usize)> = Vec::new();
    let mut quote: Option<u8> = None;
    let mut escape = false;

    for (i, &byte) in bytes.iter().enumerate() {
        if byte == b'<' && is_script_end(&bytes[i..]) {
            quote = None;
            escape = false;
            open.clear();
            continue;
        }
        if let Some(q) = quote {
            if escape {
                escape = false;
            } else if byte == b'\\' {
                escape = true;
            } else if byte == q {
                quote = None;
            }
            continue;
        }
        match byte {
            b'"' | b'\'' | b'`' if !open.is_empty() => quote = Some(byte),
            b'{' => open.push(i),
            b'}' => {
                if let Some(start) = open.pop() {
                    pairs.push((start, i));
                }
            }
            _ => {}
        }
    }

    pairs.sort_unstable();

    let mut fragments = Vec::new();
    let mut cursor = 0;
    for (start, end) in pairs {
        if start < cursor {
            continue;
        }
        fragments.push(&text[start..=end]);
        cursor = end + 1;
    }
    fragments
}

fn is_script_end(rest: &[u8]) -> bool {
    const CLOSE: &[u8] = b"</script";
    rest.len() >= CLOSE.len() && rest[..CLOSE.len()].eq_ignore_ascii_case(CLOSE)
}
