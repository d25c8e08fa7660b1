//! Discovery of data-API URLs referenced from page markup.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::platform::Platform;

static PUBLIC_API_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)["'](https?://[^"']*public-api[^"']*)["']"#).expect("valid regex")
});
static BARE_URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"https?://[^\s'"<>]+"#).expect("valid regex"));

/// Collect candidate data endpoints from `html`, deduplicated in first-seen
/// order.
///
/// Sources, in order: quoted absolute URLs naming the platform, quoted
/// root-relative paths naming the platform (joined onto `base_url` with one
/// trailing slash trimmed), quoted absolute `public-api` URLs, and any bare
/// URL containing `/api`, `public-api`, or the platform name.
#[must_use]
pub fn discover_endpoints(html: &str, base_url: &str, platform: &Platform) -> Vec<String> {
    let name = regex::escape(platform.name());
    let (Some(absolute_re), Some(relative_re)) = (
        platform_regex(&format!(r#"(?i)["'](https?://[^"']*{name}[^"']*)["']"#)),
        platform_regex(&format!(r#"(?i)["'](/[^"']*{name}[^"']*)["']"#)),
    ) else {
        return Vec::new();
    };

    let mut urls: Vec<String> = Vec::new();

    urls.extend(captures(&absolute_re, html).into_iter().map(str::to_owned));

    let base = base_url.strip_suffix('/').unwrap_or(base_url);
    urls.extend(
        captures(&relative_re, html)
            .into_iter()
            .map(|path| format!("{base}{path}")),
    );

    urls.extend(captures(&PUBLIC_API_RE, html).into_iter().map(str::to_owned));

    let lowered_name = platform.name().to_lowercase();
    urls.extend(
        BARE_URL_RE
            .find_iter(html)
            .map(|m| m.as_str())
            .filter(|url| {
                url.contains("/api")
                    || url.contains("public-api")
                    || url.to_lowercase().contains(&lowered_name)
            })
            .map(str::to_owned),
    );

    dedup_preserving_order(urls)
}

fn platform_regex(source: &str) -> Option<Regex> {
    match Regex::new(source) {
        Ok(re) => Some(re),
        Err(err) => {
            tracing::warn!(error = %err, "skipping endpoint discovery: platform pattern rejected");
            None
        }
    }
}

fn captures<'h>(re: &Regex, haystack: &'h str) -> Vec<&'h str> {
    re.captures_iter(haystack)
        .filter_map(|cap| cap.get(1).map(|m| m.as_str()))
        .collect()
}

fn dedup_preserving_order(urls: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    urls.into_iter()
        .filter(|url| seen.insert(url.clone()))
        .collect()
}
