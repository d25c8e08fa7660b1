//! Sequential batch driver: one cascade per URL, in input order.

use std::path::Path;

use anyhow::Context;
use lodgix_scraper::{extract_page, ExtractionResult, PageClient, Platform};

use crate::output::{json_file_name, write_json_result};

/// Gather input URLs: the single `--url` first, then the non-blank lines of
/// the `--list` file.
pub(crate) fn collect_urls(url: Option<&str>, list: Option<&Path>) -> anyhow::Result<Vec<String>> {
    let mut urls = Vec::new();
    if let Some(url) = url {
        urls.push(url.to_owned());
    }
    if let Some(list) = list {
        urls.extend(load_url_list(list)?);
    }
    Ok(urls)
}

fn load_url_list(path: &Path) -> anyhow::Result<Vec<String>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read URL list {}", path.display()))?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_owned)
        .collect())
}

/// Extract every URL in turn, writing each result to `json_dir` as soon as
/// it is known. A page that fails unexpectedly becomes an unsuccessful
/// result with an `error:` note; the batch always continues.
///
/// # Errors
///
/// Returns an error only if a result file cannot be written.
pub(crate) async fn run_batch(
    client: &PageClient,
    urls: &[String],
    platform: &Platform,
    json_dir: &Path,
) -> anyhow::Result<Vec<ExtractionResult>> {
    let mut results = Vec::with_capacity(urls.len());

    for (index, url) in urls.iter().enumerate() {
        tracing::info!(url = %url, position = index + 1, total = urls.len(), "processing page");

        let result = match extract_page(client, url, platform).await {
            Ok(result) => result,
            Err(err) => {
                tracing::warn!(url = %url, error = %err, "page processing failed");
                ExtractionResult::failed(url.as_str(), format!("error:{err}"))
            }
        };

        write_json_result(&result, &json_dir.join(json_file_name(url)))?;
        results.push(result);
    }

    Ok(results)
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn scratch_dir(name: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!("lodgix-cli-{}-{name}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn collect_urls_puts_single_url_first_and_skips_blank_lines() {
        let dir = scratch_dir("list");
        std::fs::create_dir_all(&dir).unwrap();
        let list = dir.join("urls.txt");
        std::fs::write(&list, "https://a.example/1\n\n   \n  https://b.example/2  \n").unwrap();

        let urls = collect_urls(Some("https://first.example"), Some(&list)).unwrap();
        assert_eq!(
            urls,
            vec![
                "https://first.example",
                "https://a.example/1",
                "https://b.example/2",
            ]
        );
    }

    #[test]
    fn collect_urls_reports_missing_list_file() {
        let missing = scratch_dir("missing").join("nope.txt");
        let err = collect_urls(None, Some(&missing)).unwrap_err();
        assert!(err.to_string().contains("failed to read URL list"));
    }

    #[tokio::test]
    async fn run_batch_continues_past_failing_pages() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/cabin"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"<script type="application/ld+json">{"address": "3 Lake Rd"}</script>"#,
            ))
            .mount(&server)
            .await;

        let good = format!("{}/cabin", server.uri());
        let urls = vec!["not a url".to_owned(), good];
        let json_dir = scratch_dir("batch").join("json");
        let client = PageClient::new(5, "lodgix-test/0.1").unwrap();

        let results = run_batch(&client, &urls, &Platform::LODGIX, &json_dir)
            .await
            .unwrap();

        assert_eq!(results.len(), 2);
        assert!(!results[0].success);
        assert!(results[0]
            .notes
            .as_deref()
            .is_some_and(|n| n.starts_with("error:")));
        assert!(results[1].success);
        assert_eq!(results[1].full_address.as_deref(), Some("3 Lake Rd"));

        for url in &urls {
            assert!(json_dir.join(json_file_name(url)).exists(), "missing JSON for {url}");
        }
    }
}
