//! Querying discovered data endpoints for address data.

use std::collections::HashSet;

use serde_json::Value;

use crate::client::PageClient;
use crate::normalize::{best_from_json, is_empty_document};
use crate::types::AddressRecord;

/// What the probe loop learned.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProbeReport {
    /// The last endpoint whose JSON body was searched; the winning endpoint
    /// when `record` is set.
    pub endpoint: Option<String>,
    /// First useful record, if any endpoint produced one.
    pub record: Option<AddressRecord>,
}

/// Probe `endpoints` in order until one yields a useful record.
///
/// Each URL is fetched at most once. Fetch failures, error statuses,
/// unparseable bodies and empty JSON documents are skipped.
pub async fn probe_endpoints(client: &PageClient, endpoints: &[String]) -> ProbeReport {
    let mut report = ProbeReport::default();
    let mut tried: HashSet<&str> = HashSet::new();

    for endpoint in endpoints {
        if !tried.insert(endpoint.as_str()) {
            continue;
        }

        tracing::debug!(endpoint = %endpoint, "probing endpoint");
        let Some(body) = call_endpoint(client, endpoint).await else {
            continue;
        };
        if is_empty_document(&body) {
            continue;
        }

        report.endpoint = Some(endpoint.clone());
        if let Some(record) = best_from_json(&body) {
            report.record = Some(record);
            return report;
        }
    }

    report
}

/// Fetch `url` and parse its body as JSON, or `None` on any failure.
pub async fn call_endpoint(client: &PageClient, url: &str) -> Option<Value> {
    let page = match client.fetch(url).await {
        Ok(page) => page,
        Err(err) => {
            tracing::debug!(url, error = %err, "endpoint fetch failed");
            return None;
        }
    };
    if page.is_error_status() {
        tracing::debug!(url, status = page.status, "endpoint returned error status");
        return None;
    }

    match serde_json::from_str::<Value>(&page.body) {
        Ok(value) => Some(value),
        Err(_) if page.declares_json() => {
            // Some APIs prefix their JSON with a byte-order mark.
            let stripped = page.body.trim_start_matches('\u{feff}');
            serde_json::from_str(stripped).ok()
        }
        Err(_) => None,
    }
}
