//! Thin HTTP client used for page fetches and endpoint probes.

use std::time::Duration;

use reqwest::Client;

use crate::error::ScraperError;

pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120 Safari/537.36";

/// A fetched response: status, decoded body, and declared content type.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub status: u16,
    pub body: String,
    pub content_type: Option<String>,
}

impl FetchedPage {
    /// Statuses of 400 and above are treated as failures.
    #[must_use]
    pub fn is_error_status(&self) -> bool {
        self.status >= 400
    }

    #[must_use]
    pub fn declares_json(&self) -> bool {
        self.content_type
            .as_deref()
            .is_some_and(|ct| ct.to_ascii_lowercase().contains("application/json"))
    }
}

/// HTTP client with a fixed per-request timeout and browser `User-Agent`.
///
/// Non-2xx responses are returned as data, not errors; only transport
/// failures (DNS, TLS, timeout, body decoding) surface as `Err`.
#[derive(Debug, Clone)]
pub struct PageClient {
    client: Client,
    user_agent: String,
}

impl PageClient {
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;
        Ok(Self {
            client,
            user_agent: user_agent.to_owned(),
        })
    }

    /// GET `url` and read the whole body as text.
    ///
    /// # Errors
    ///
    /// Returns the transport error if the request or body read fails.
    pub async fn fetch(&self, url: &str) -> Result<FetchedPage, reqwest::Error> {
        let response = self
            .client
            .get(url)
            .header(reqwest::header::USER_AGENT, &self.user_agent)
            .send()
            .await?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        let body = response.text().await?;

        Ok(FetchedPage {
            status,
            body,
            content_type,
        })
    }
}
