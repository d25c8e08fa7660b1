//! Per-page extraction cascade.
//!
//! Tries strategies in priority order (JSON-LD, inline JSON, data API
//! endpoints, regex text scan, HTML fallback) and stops at the first one
//! that yields a useful record.

use crate::client::PageClient;
use crate::error::ScraperError;
use crate::extract::{
    discover_endpoints, extract_jsonld_documents, find_address_in_text, parse_html_fallback,
    try_extract_candidates,
};
use crate::normalize::best_from_documents;
use crate::platform::Platform;
use crate::probe::probe_endpoints;
use crate::types::{Approach, ExtractionResult, NO_RESULT_NOTE};

/// Fetch `url` and run the extraction cascade over it.
///
/// Fetch failures (transport errors and HTTP statuses of 400 and above) are
/// reported in the result's notes without running any strategy.
///
/// # Errors
///
/// Returns [`ScraperError::InvalidUrl`] if `url` is not an absolute
/// `http`/`https` URL.
pub async fn extract_page(
    client: &PageClient,
    url: &str,
    platform: &Platform,
) -> Result<ExtractionResult, ScraperError> {
    validate_url(url)?;

    let page = match client.fetch(url).await {
        Ok(page) => page,
        Err(err) => {
            tracing::warn!(url, error = %err, "page fetch failed");
            return Ok(ExtractionResult::failed(url, format!("fetch-error:{err}")));
        }
    };
    if page.is_error_status() {
        tracing::warn!(url, status = page.status, "page returned error status");
        return Ok(ExtractionResult::failed(
            url,
            format!("http-status-{}", page.status),
        ));
    }

    Ok(extract_from_html(client, url, &page.body, platform).await)
}

/// Run the cascade over already-fetched page markup.
///
/// `client` is only used to probe data endpoints discovered in `html`.
pub async fn extract_from_html(
    client: &PageClient,
    url: &str,
    html: &str,
    platform: &Platform,
) -> ExtractionResult {
    let mut result = ExtractionResult::new(url);

    // Strategy 1: JSON-LD blocks
    let documents = extract_jsonld_documents(html);
    tracing::debug!(url, count = documents.len(), "parsed JSON-LD blocks");
    if let Some(record) = best_from_documents(&documents) {
        if result.apply(Approach::JsonLd, record) {
            return finish(result);
        }
    }

    // Strategy 2: state objects and large JSON fragments in scripts
    let objects = try_extract_candidates(html, platform);
    tracing::debug!(url, count = objects.len(), "parsed inline JSON objects");
    if let Some(record) = best_from_documents(&objects) {
        if result.apply(Approach::InlineJson, record) {
            return finish(result);
        }
    }

    // Strategy 3: data API endpoints referenced by the page
    let endpoints = discover_endpoints(html, url, platform);
    tracing::debug!(url, count = endpoints.len(), "discovered candidate endpoints");
    let report = probe_endpoints(client, &endpoints).await;
    if let Some(endpoint) = &report.endpoint {
        result.notes = Some(format!("called-endpoint:{endpoint}"));
    }
    if let Some(record) = report.record {
        if result.apply(Approach::ApiCrawl, record) {
            return finish(result);
        }
    }

    // Strategy 4: JSON-looking fields anywhere in the raw text
    if let Some(record) = find_address_in_text(html) {
        if result.apply(Approach::RegexText, record) {
            return finish(result);
        }
    }

    // Strategy 5: visible postal address or geo meta tags
    if let Some(record) = parse_html_fallback(html) {
        if result.apply(Approach::HtmlFallback, record) {
            return finish(result);
        }
    }

    tracing::warn!(url, "no address found");
    result.notes = Some(NO_RESULT_NOTE.to_owned());
    result
}

fn finish(result: ExtractionResult) -> ExtractionResult {
    tracing::info!(
        url = %result.source_url,
        approach = ?result.approach.map(Approach::as_str),
        "address extracted"
    );
    result
}

fn validate_url(url: &str) -> Result<(), ScraperError> {
    let parsed = reqwest::Url::parse(url).map_err(|e| ScraperError::InvalidUrl {
        url: url.to_owned(),
        reason: e.to_string(),
    })?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(ScraperError::InvalidUrl {
            url: url.to_owned(),
            reason: format!("unsupported scheme `{other}`"),
        }),
    }
}
