use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unfetchable URL \"{url}\": {reason}")]
    InvalidUrl { url: String, reason: String },
}
